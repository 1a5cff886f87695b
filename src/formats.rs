//! Image format handling for candidate files
//!
//! The set of formats the compressor accepts is fixed; the output format of a
//! file is always the one implied by its own extension.

use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{CompressionError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Formats a candidate file can be re-encoded to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedFormat {
    /// Lossy, quality maps to the JPEG quantizer
    Jpeg,
    /// Lossless, quality selects the deflate effort
    Png,
    /// Lossy libwebp encoding
    WebP,
}

impl SupportedFormat {
    /// Derives the format from a path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupportedFormat::Jpeg => "JPEG",
            SupportedFormat::Png => "PNG",
            SupportedFormat::WebP => "WebP",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SupportedFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(SupportedFormat::Jpeg),
            "png" => Ok(SupportedFormat::Png),
            "webp" => Ok(SupportedFormat::WebP),
            _ => Err(CompressionError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Check if a path has one of the supported image extensions
///
/// # Arguments
/// * `path` - The file path to check
///
/// # Returns
/// * `true` for `png`, `jpg`, `jpeg` and `webp` in any letter case
pub fn is_candidate_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
