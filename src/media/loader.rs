use super::detection::detect_image_mime;
use super::image::ImagePayload;
use anyhow::{Context, Result, bail};
use std::path::Path;

/// A photo read from disk and encoded for storage.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub payload: ImagePayload,
    /// File name without extension; the default display name of new items.
    pub stem: String,
}

/// Read a photo from disk, verify it is an image, and encode it as a data URL.
pub async fn load_image(path: &Path, max_file_size_mb: u64) -> Result<LoadedImage> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to stat image: {}", path.display()))?;
    let limit = max_file_size_mb.saturating_mul(1024 * 1024);
    if metadata.len() > limit {
        bail!(
            "{} is larger than the {max_file_size_mb} MB upload limit",
            path.display()
        );
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;

    let filename = path.file_name().and_then(|name| name.to_str());
    let Some(mime) = detect_image_mime(&bytes, filename) else {
        bail!("{} is not a supported image", path.display());
    };

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("New Item")
        .to_string();

    tracing::debug!(path = %path.display(), mime = %mime, bytes = bytes.len(), "image loaded");

    Ok(LoadedImage {
        payload: ImagePayload::from_bytes(&bytes, mime.essence_str()),
        stem,
    })
}
