use crate::error::{Error, Result};
use crate::pages;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Extract the ePub ZIP into a fresh temporary directory.
///
/// The directory is removed when the returned handle is dropped, so the
/// extracted tree never outlives the run, even on error paths.
pub fn extract(epub_path: &Path) -> Result<TempDir> {
    let file = File::open(epub_path)?;
    let mut archive = ZipArchive::new(file)?;
    let dir = TempDir::new()?;
    archive.extract(dir.path())?;
    Ok(dir)
}

/// Locate the package root: the directory inside the extracted tree that
/// holds the `page-*.xhtml` files (commonly `OPS` in Apple exports).
pub fn find_package_root(extracted: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    collect_page_dirs(extracted, &mut candidates)?;
    candidates.sort();
    candidates.dedup();

    // Prefer a directory that actually holds page-1.xhtml; fall back to
    // the first directory (in sorted order) with any page file at all.
    if let Some(dir) = candidates
        .iter()
        .find(|dir| dir.join("page-1.xhtml").is_file())
    {
        return Ok(dir.clone());
    }
    candidates.into_iter().next().ok_or(Error::PackageRootNotFound)
}

fn collect_page_dirs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_page_dirs(&path, out)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(pages::looks_like_page)
        {
            out.push(dir.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_nested_package_root() {
        let tmp = TempDir::new().unwrap();
        let ops = tmp.path().join("OPS");
        fs::create_dir_all(&ops).unwrap();
        fs::write(ops.join("page-1.xhtml"), "<body></body>").unwrap();
        fs::write(tmp.path().join("mimetype"), "application/epub+zip").unwrap();

        let root = find_package_root(tmp.path()).unwrap();
        assert_eq!(root, ops);
    }

    #[test]
    fn prefers_directory_with_page_one() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("page-7.xhtml"), "").unwrap();
        fs::write(b.join("page-1.xhtml"), "").unwrap();

        let root = find_package_root(tmp.path()).unwrap();
        assert_eq!(root, b);
    }

    #[test]
    fn fails_without_any_pages() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("mimetype"), "application/epub+zip").unwrap();

        let err = find_package_root(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::PackageRootNotFound));
    }
}
