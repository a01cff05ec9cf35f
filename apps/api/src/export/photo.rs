//! Profile photos as base64 data URLs.
//!
//! Uploads are validated and stored as data URLs. At export time every image source is
//! decoded again and re-encoded as PNG, so the rasterizer only ever sees pixels it can
//! sample. Remote and blob URLs cannot be sampled and are rejected.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;
use thiserror::Error;

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Unsupported content type '{0}': only image/* is accepted")]
    UnsupportedType(String),

    #[error("Image is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Image source is not an inline data URL: {0}")]
    NotInline(String),

    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    #[error("Image could not be decoded: {0}")]
    Decode(String),
}

/// Validates an uploaded photo and returns it as a data URL.
pub fn photo_data_url(content_type: &str, bytes: &[u8]) -> Result<String, PhotoError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(PhotoError::UnsupportedType(content_type.to_string()));
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge {
            size: bytes.len(),
            max: MAX_PHOTO_BYTES,
        });
    }
    image::load_from_memory(bytes).map_err(|e| PhotoError::Decode(e.to_string()))?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Splits a base64 data URL into its media type and decoded bytes.
pub fn decode_data_url(src: &str) -> Result<(String, Vec<u8>), PhotoError> {
    let src = src.trim();
    let Some(rest) = src.strip_prefix("data:") else {
        return Err(PhotoError::NotInline(truncate(src)));
    };
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PhotoError::MalformedDataUrl("missing ',' separator".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| PhotoError::MalformedDataUrl("only base64 payloads are supported".to_string()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| PhotoError::MalformedDataUrl(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}

/// Decodes any supported image source and re-encodes it as a PNG data URL.
pub fn inline_png(src: &str) -> Result<String, PhotoError> {
    let (_, bytes) = decode_data_url(src)?;
    let img = image::load_from_memory(&bytes).map_err(|e| PhotoError::Decode(e.to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PhotoError::Decode(e.to_string()))?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

fn truncate(src: &str) -> String {
    src.chars().take(64).collect()
}


#[cfg(test)]
mod tests {
    use super::testing::png_bytes;
    use super::*;

    #[test]
    fn test_upload_accepts_png() {
        let url = photo_data_url("image/png", &png_bytes(4, 4)).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_upload_rejects_non_image_type() {
        let err = photo_data_url("application/pdf", &png_bytes(4, 4)).unwrap_err();
        assert!(matches!(err, PhotoError::UnsupportedType(_)));
    }

    #[test]
    fn test_upload_rejects_oversized() {
        let bytes = vec![0u8; MAX_PHOTO_BYTES + 1];
        let err = photo_data_url("image/png", &bytes).unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { .. }));
    }

    #[test]
    fn test_upload_rejects_undecodable() {
        let err = photo_data_url("image/jpeg", b"not an image").unwrap_err();
        assert!(matches!(err, PhotoError::Decode(_)));
    }

    #[test]
    fn test_decode_round_trips_upload() {
        let bytes = png_bytes(3, 2);
        let url = photo_data_url("image/png; charset=binary", &bytes).unwrap();
        let (mime, decoded) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_remote_urls_are_not_inline() {
        for src in ["https://cdn.example.com/me.jpg", "blob:https://app/1234"] {
            assert!(matches!(inline_png(src), Err(PhotoError::NotInline(_))));
        }
    }

    #[test]
    fn test_inline_png_reencodes() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(2, 2)));
        let out = inline_png(&url).unwrap();
        assert!(out.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_non_base64_data_url_is_malformed() {
        assert!(matches!(
            decode_data_url("data:image/svg+xml,<svg/>"),
            Err(PhotoError::MalformedDataUrl(_))
        ));
    }
}
