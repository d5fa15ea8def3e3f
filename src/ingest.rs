//! Asset ingestion: turn local files and URLs into library assets.
//!
//! Files are typed by extension. Vector files are read and validated so the
//! canvas can embed them later; raster files are only referenced. URLs are
//! never fetched, so a URL asset carries no content.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use std::fs;
use std::path::{Path, PathBuf};

use canvas::doc::{Asset, AssetKind};
use canvas::markup::{self, MarkupError};
use uuid::Uuid;

/// URL schemes accepted as remote or in-memory references.
pub const URL_SCHEMES: &[&str] = &["http://", "https://", "data:", "blob:"];

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unsupported file type for {}: upload JPG, PNG, GIF, WEBP or SVG", path.display())]
    UnsupportedType { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid SVG content in {}: {source}", path.display())]
    InvalidSvg { path: PathBuf, source: MarkupError },
    #[error("empty URL")]
    EmptyUrl,
}

/// Asset kind for a file extension, or `None` when the type is not accepted.
#[must_use]
pub fn kind_for_extension(ext: &str) -> Option<AssetKind> {
    match ext.to_ascii_lowercase().as_str() {
        "svg" => Some(AssetKind::Vector),
        "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(AssetKind::Raster),
        _ => None,
    }
}

/// Whether `source` should be treated as a URL rather than a path.
#[must_use]
pub fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Ingest a path or URL.
///
/// # Errors
///
/// See [`ingest_file`] and [`ingest_url`].
pub fn ingest(source: &str) -> Result<Asset, IngestError> {
    if source.trim().is_empty() {
        return Err(IngestError::EmptyUrl);
    }
    if is_url(source) { ingest_url(source) } else { ingest_file(Path::new(source)) }
}

/// Ingest a local file.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedType`] for unaccepted extensions,
/// [`IngestError::Io`] when the file cannot be read, and
/// [`IngestError::InvalidSvg`] when an `.svg` file is not valid SVG.
pub fn ingest_file(path: &Path) -> Result<Asset, IngestError> {
    let kind = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(kind_for_extension)
        .ok_or_else(|| IngestError::UnsupportedType { path: path.to_path_buf() })?;

    let absolute = fs::canonicalize(path).map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;

    let content = match kind {
        AssetKind::Vector => {
            let text = fs::read_to_string(&absolute)
                .map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
            markup::validate_svg(&text)
                .map_err(|source| IngestError::InvalidSvg { path: path.to_path_buf(), source })?;
            Some(text)
        }
        AssetKind::Raster => None,
    };

    let asset = Asset { id: Uuid::new_v4(), url: format!("file://{}", absolute.display()), kind, content };
    tracing::info!(id = %asset.id, url = %asset.url, kind = ?asset.kind, "ingested file");
    Ok(asset)
}

/// Ingest a URL. The URL is trimmed and never fetched.
///
/// # Errors
///
/// Returns [`IngestError::EmptyUrl`] when nothing remains after trimming.
pub fn ingest_url(url: &str) -> Result<Asset, IngestError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(IngestError::EmptyUrl);
    }
    let kind = if url.to_ascii_lowercase().ends_with(".svg") { AssetKind::Vector } else { AssetKind::Raster };
    let asset = Asset { id: Uuid::new_v4(), url: url.to_string(), kind, content: None };
    tracing::info!(id = %asset.id, url = %asset.url, kind = ?asset.kind, "ingested url");
    Ok(asset)
}
