use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => return None,
    })
}

/// Reads binary assets and turns them into `data:` URIs, caching each
/// distinct path so repeated references read the disk once.
pub struct Inliner {
    cache: HashMap<PathBuf, String>,
    lenient: bool,
}

impl Inliner {
    pub fn new(lenient: bool) -> Self {
        Self {
            cache: HashMap::new(),
            lenient,
        }
    }

    /// Inline the file at `path` as a data URI. `reference` is the text as
    /// written in the source document, kept for diagnostics.
    ///
    /// In lenient mode a missing or unsupported asset returns `Ok(None)`
    /// after a warning, and the caller leaves the original reference as-is.
    pub fn inline(&mut self, path: &Path, reference: &str) -> Result<Option<String>> {
        if let Some(uri) = self.cache.get(path) {
            return Ok(Some(uri.clone()));
        }
        match encode(path, reference) {
            Ok(uri) => {
                self.cache.insert(path.to_path_buf(), uri.clone());
                Ok(Some(uri))
            }
            Err(err) if self.lenient => {
                eprintln!("Warning: {err}; leaving reference unresolved");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

fn encode(path: &Path, reference: &str) -> Result<String> {
    let media = media_type(path).ok_or_else(|| Error::UnsupportedAssetType {
        path: path.to_path_buf(),
    })?;
    let bytes = std::fs::read(path).map_err(|_| Error::AssetNotFound {
        reference: reference.to_string(),
    })?;
    Ok(format!("data:{media};base64,{}", STANDARD.encode(bytes)))
}

/// `Regex::replace_all` with a fallible replacement closure. Splices the
/// unmatched stretches and the replacements into a fresh string so errors
/// from the closure can propagate with `?`.
pub(crate) fn try_replace_all(
    re: &Regex,
    haystack: &str,
    mut replacement: impl FnMut(&Captures) -> Result<String>,
) -> Result<String> {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for caps in re.captures_iter(haystack) {
        let full = caps.get(0).unwrap();
        out.push_str(&haystack[last..full.start()]);
        out.push_str(&replacement(&caps)?);
        last = full.end();
    }
    out.push_str(&haystack[last..]);
    Ok(out)
}
