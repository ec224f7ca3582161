use crate::error::Result;
use std::path::{Path, PathBuf};

/// A single fixed-layout page. Markup is loaded lazily by the transformer.
#[derive(Debug, Clone)]
pub struct PageDescriptor {
    pub index: u32,
    pub path: PathBuf,
}

/// True for any filename of the shape `page-*.xhtml`, parseable or not.
pub(crate) fn looks_like_page(name: &str) -> bool {
    name.starts_with("page-") && name.ends_with(".xhtml")
}

fn parse_index(name: &str) -> Option<u32> {
    let digits = name.strip_prefix("page-")?.strip_suffix(".xhtml")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// List the page files directly inside the package root, sorted by numeric
/// index ascending (`page-10` after `page-2`).
///
/// Files that look like pages but have an unparsable number are skipped
/// with a warning. If two filenames parse to the same index (`page-1` vs
/// `page-01`), the lexicographically first one wins and the other is
/// skipped with a warning.
pub fn find_pages(package_root: &Path) -> Result<Vec<PageDescriptor>> {
    let mut named = Vec::new();
    for entry in std::fs::read_dir(package_root)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !looks_like_page(name) {
            continue;
        }
        match parse_index(name) {
            Some(index) => named.push((name.to_string(), index, path)),
            None => eprintln!("Warning: skipping {name}: cannot parse page number"),
        }
    }

    // Pre-sort by filename so the duplicate-index policy does not depend
    // on filesystem listing order.
    named.sort_by(|a, b| a.0.cmp(&b.0));

    let mut pages: Vec<PageDescriptor> = Vec::new();
    for (name, index, path) in named {
        if pages.iter().any(|page| page.index == index) {
            eprintln!("Warning: skipping {name}: duplicate page index {index}");
            continue;
        }
        pages.push(PageDescriptor { index, path });
    }
    pages.sort_by_key(|page| page.index);
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(files: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for file in files {
            fs::write(tmp.path().join(file), "").unwrap();
        }
        tmp
    }

    #[test]
    fn sorts_numerically_not_lexicographically() {
        let tmp = root_with(&["page-2.xhtml", "page-10.xhtml", "page-1.xhtml"]);
        let pages = find_pages(tmp.path()).unwrap();
        let indices: Vec<u32> = pages.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 10]);
    }

    #[test]
    fn ignores_non_page_files_and_warns_on_malformed() {
        let tmp = root_with(&[
            "page-1.xhtml",
            "page-cover.xhtml",
            "toc.xhtml",
            "book.css",
        ]);
        let pages = find_pages(tmp.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 1);
    }

    #[test]
    fn first_filename_wins_on_duplicate_index() {
        let tmp = root_with(&["page-01.xhtml", "page-1.xhtml"]);
        let pages = find_pages(tmp.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].path.ends_with("page-01.xhtml"));
    }

    #[test]
    fn gaps_are_preserved() {
        let tmp = root_with(&["page-3.xhtml", "page-1.xhtml"]);
        let pages = find_pages(tmp.path()).unwrap();
        let indices: Vec<u32> = pages.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn empty_root_yields_empty_list() {
        let tmp = root_with(&[]);
        assert!(find_pages(tmp.path()).unwrap().is_empty());
    }
}
