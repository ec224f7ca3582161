use crate::archive;
use crate::assets::Inliner;
use crate::cli::Cli;
use crate::compose::{self, Config};
use crate::css;
use crate::error::Error;
use crate::pages;
use crate::transform;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Run the full conversion pipeline: extract the archive, locate and order
/// the pages, resolve CSS fonts, transform each page, compose the document
/// and write it out in one shot.
///
/// The document is built entirely in memory and written last, so a failing
/// run never leaves a partial output file behind. The extracted archive
/// lives in a temporary directory that is removed on every exit path.
pub fn convert(cli: &Cli) -> Result<()> {
    let config = build_config(cli);

    let extracted = archive::extract(&cli.input)
        .with_context(|| format!("Failed to extract EPUB: {}", cli.input.display()))?;
    let package_root = archive::find_package_root(extracted.path())?;

    let page_files = pages::find_pages(&package_root)?;
    if page_files.is_empty() {
        return Err(Error::NoPagesFound.into());
    }

    let mut inliner = Inliner::new(cli.lenient);

    let stylesheet = css::load_css(&package_root)?;
    let stylesheet = css::resolve_fonts(&stylesheet, &package_root, &mut inliner)
        .context("Failed to embed fonts from the book stylesheet")?;

    let mut fragments = Vec::with_capacity(page_files.len());
    for page in &page_files {
        let fragment = transform::transform(page, &package_root, &mut inliner, &config)
            .with_context(|| format!("Failed to transform {}", page.path.display()))?;
        fragments.push(fragment);
    }

    let document = compose::compose(&stylesheet, &fragments, &config);

    let output_path = resolve_output_path(cli);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output_path, document)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    eprintln!(
        "Converted {} pages to {}",
        fragments.len(),
        output_path.display()
    );

    Ok(())
}

fn build_config(cli: &Cli) -> Config {
    let title = cli.title.clone().unwrap_or_else(|| {
        cli.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Converted EPUB".to_string())
    });
    Config {
        page_width: cli.page_width,
        page_height: cli.page_height,
        label_format: if cli.no_page_labels {
            None
        } else {
            Some(cli.label_format.clone())
        },
        background: cli.background.clone(),
        title,
    }
}

fn resolve_output_path(cli: &Cli) -> PathBuf {
    match &cli.output {
        Some(path) => path.clone(),
        None => cli.input.with_extension("html"),
    }
}
