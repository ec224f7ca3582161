//! Convert fixed-layout EPUB books into a single self-contained HTML document.
//!
//! Each `page-N.xhtml` in the book becomes a vertically stacked `.page` div,
//! with all referenced fonts and images embedded as base64 data URIs so the
//! result renders without any external resources.

pub mod archive;
pub mod assets;
pub mod cli;
pub mod compose;
pub mod converter;
pub mod css;
pub mod error;
pub mod pages;
pub mod transform;

pub use converter::convert;
pub use error::{Error, Result};
