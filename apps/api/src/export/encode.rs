use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};
use tracing::debug;

use crate::export::paginate::Band;
use crate::export::ExportError;

/// A band cropped out of the full bitmap and encoded as a standalone JPEG.
#[derive(Debug, Clone)]
pub struct EncodedBand {
    pub band: Band,
    pub width: u32,
    pub jpeg: Vec<u8>,
}

/// Crops `band` out of `bitmap` and JPEG-encodes it at `quality` (1–100).
pub fn encode_band(bitmap: &RgbImage, band: Band, quality: u8) -> Result<EncodedBand, ExportError> {
    let (width, height) = bitmap.dimensions();
    if band.height == 0 || band.y.saturating_add(band.height) > height {
        return Err(ExportError::EncodingFailure(format!(
            "band {} ({}+{}) outside bitmap of height {height}",
            band.index, band.y, band.height
        )));
    }

    let slice = imageops::crop_imm(bitmap, 0, band.y, width, band.height).to_image();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
        .encode_image(&slice)
        .map_err(|e| ExportError::EncodingFailure(format!("band {}: {e}", band.index)))?;

    debug!(band = band.index, y = band.y, height = band.height, bytes = jpeg.len(), "Encoded band");
    Ok(EncodedBand { band, width, jpeg })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_encodes_jpeg_with_band_dimensions() {
        let bitmap = RgbImage::from_pixel(40, 100, Rgb([255, 255, 255]));
        let band = Band { index: 1, y: 60, height: 40 };
        let encoded = encode_band(&bitmap, band, 90).unwrap();
        assert_eq!(&encoded.jpeg[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&encoded.jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 40));
        assert_eq!(encoded.width, 40);
    }

    #[test]
    fn test_band_outside_bitmap_is_encoding_failure() {
        let bitmap = RgbImage::new(10, 10);
        let band = Band { index: 0, y: 5, height: 10 };
        assert!(matches!(
            encode_band(&bitmap, band, 100),
            Err(ExportError::EncodingFailure(_))
        ));
    }
}
