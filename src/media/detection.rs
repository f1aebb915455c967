use mime::Mime;

#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        "gif" => Some("image/gif".into()),
        "webp" => Some("image/webp".into()),
        "heic" => Some("image/heic".into()),
        "avif" => Some("image/avif".into()),
        _ => None,
    }
}

/// Detect the MIME type of a photo, preferring magic bytes over the extension.
///
/// Returns `None` unless the result is an `image/*` type.
#[must_use]
pub fn detect_image_mime(data: &[u8], filename: Option<&str>) -> Option<Mime> {
    let detected = detect_mime(data).or_else(|| filename.and_then(detect_mime_from_extension))?;
    let parsed: Mime = detected.parse().ok()?;
    (parsed.type_() == mime::IMAGE).then_some(parsed)
}
