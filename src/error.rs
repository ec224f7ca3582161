//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Malformed page names and duplicate page indices are deliberately not
/// represented here: those files are skipped with a warning so stray
/// entries in an archive don't kill the whole run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no directory containing page-*.xhtml files found in the archive")]
    PackageRootNotFound,

    #[error("package root contains no usable page files")]
    NoPagesFound,

    #[error("page {page} has no <body> element")]
    MissingBody { page: String },

    #[error("referenced asset not found: {reference}")]
    AssetNotFound { reference: String },

    #[error("unsupported asset type: {}", path.display())]
    UnsupportedAssetType { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
