use crate::assets::{try_replace_all, Inliner};
use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\(([^)]+)\)").unwrap());

/// Concatenate every stylesheet under `css/`, sorted by path so the output
/// is stable across filesystems. A missing directory yields an empty
/// stylesheet; CSS is optional, embedding is not.
pub fn load_css(package_root: &Path) -> Result<String> {
    let css_dir = package_root.join("css");
    if !css_dir.is_dir() {
        return Ok(String::new());
    }
    let mut files = Vec::new();
    collect_stylesheets(&css_dir, &mut files)?;
    files.sort();

    let mut sheets = Vec::with_capacity(files.len());
    for file in &files {
        sheets.push(std::fs::read_to_string(file)?);
    }
    Ok(sheets.join("\n"))
}

fn collect_stylesheets(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_stylesheets(&path, out)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css") || ext.eq_ignore_ascii_case("scss"))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Rewrite each `url(...)` that points into `fonts/` as a data URI.
/// Absolute URLs, existing data URIs and non-font urls pass through
/// untouched, so an already-resolved stylesheet is never double-encoded.
pub fn resolve_fonts(css: &str, package_root: &Path, inliner: &mut Inliner) -> Result<String> {
    try_replace_all(&CSS_URL, css, |caps| {
        let raw = caps[1].trim().trim_matches(|c| c == '\'' || c == '"');
        if raw.starts_with("data:") || raw.contains("://") {
            return Ok(caps[0].to_string());
        }
        let Some(name) = font_file_name(raw) else {
            return Ok(caps[0].to_string());
        };
        let path = package_root.join("fonts").join(name);
        match inliner.inline(&path, raw)? {
            Some(uri) => Ok(format!("url({uri})")),
            None => Ok(caps[0].to_string()),
        }
    })
}

/// The filename for references whose path runs through a `fonts/`
/// directory, with any `../` prefixes stripped. `None` for anything else.
fn font_file_name(reference: &str) -> Option<&str> {
    let trimmed = reference.trim_start_matches("../");
    let rest = trimmed.strip_prefix("fonts/")?;
    rest.rsplit('/').next()
}
