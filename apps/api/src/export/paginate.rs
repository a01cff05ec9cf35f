//! Band planning: slices a tall bitmap into page-sized horizontal bands.
//!
//! # Rules
//! - The page pixel height is derived once from the bitmap width and the physical
//!   page aspect ratio, then reused for every band.
//! - Bands start at 0, p, 2p, … while the offset is still inside the bitmap.
//! - Every band is exactly p tall except the last, which takes the remainder.
//! - A bitmap no taller than one page yields exactly one band.
//!
//! A band boundary may cut through a line of text. That is expected: the surface is
//! rasterized whole and then sliced.

use serde::{Deserialize, Serialize};

/// Physical page size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    /// ISO A4 portrait.
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    const MM_PER_INCH: f32 = 25.4;
    const POINTS_PER_INCH: f32 = 72.0;

    pub fn width_pt(&self) -> f32 {
        self.width_mm / Self::MM_PER_INCH * Self::POINTS_PER_INCH
    }

    pub fn height_pt(&self) -> f32 {
        self.height_mm / Self::MM_PER_INCH * Self::POINTS_PER_INCH
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// One horizontal slice of the rasterized surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub index: usize,
    /// Top offset in bitmap pixels.
    pub y: u32,
    pub height: u32,
}

/// Bitmap pixels one page can hold at the given bitmap width (at least 1).
pub fn page_pixel_height(bitmap_width: u32, page: PageSize) -> u32 {
    let px = (bitmap_width as f64 * page.height_mm as f64 / page.width_mm as f64).round();
    (px as u32).max(1)
}

/// Plans the bands for a bitmap `bitmap_height` pixels tall.
pub fn plan_bands(bitmap_height: u32, page_px: u32) -> Vec<Band> {
    let page_px = page_px.max(1);
    let mut bands = Vec::new();
    let mut offset = 0u32;
    while offset < bitmap_height {
        let height = page_px.min(bitmap_height - offset);
        bands.push(Band {
            index: bands.len(),
            y: offset,
            height,
        });
        offset = offset.saturating_add(page_px);
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_page_pixel_height() {
        // 800 px surface at 2x scale.
        assert_eq!(page_pixel_height(1600, PageSize::A4), 2263);
        assert_eq!(page_pixel_height(210, PageSize::A4), 297);
        assert_eq!(page_pixel_height(0, PageSize::A4), 1);
    }

    #[test]
    fn test_a4_points() {
        let a4 = PageSize::A4;
        assert!((a4.width_pt() - 595.28).abs() < 0.01);
        assert!((a4.height_pt() - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_shorter_than_page_is_one_band() {
        let bands = plan_bands(500, 2263);
        assert_eq!(bands, vec![Band { index: 0, y: 0, height: 500 }]);
    }

    #[test]
    fn test_exactly_one_page_has_no_trailing_blank() {
        let bands = plan_bands(2263, 2263);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].height, 2263);
    }

    #[test]
    fn test_k_pages_plus_remainder() {
        let p = 1000;
        for k in 1..5u32 {
            let r = 337;
            let bands = plan_bands(k * p + r, p);
            assert_eq!(bands.len(), (k + 1) as usize);
            assert!(bands[..k as usize].iter().all(|b| b.height == p));
            assert_eq!(bands.last().unwrap().height, r);
        }
    }

    #[test]
    fn test_three_point_four_pages_yields_four() {
        let p = page_pixel_height(1600, PageSize::A4);
        let height = (p as f64 * 3.4).round() as u32;
        let bands = plan_bands(height, p);
        assert_eq!(bands.len(), 4);
        assert!(bands.iter().all(|b| b.height > 0));
    }

    #[test]
    fn test_bands_tile_the_bitmap_exactly() {
        for height in [1u32, 999, 1000, 1001, 4321, 10_000] {
            let bands = plan_bands(height, 1000);
            let sum: u32 = bands.iter().map(|b| b.height).sum();
            assert_eq!(sum, height);
            for pair in bands.windows(2) {
                assert_eq!(pair[0].y + pair[0].height, pair[1].y);
            }
        }
    }

    #[test]
    fn test_empty_bitmap_has_no_bands() {
        assert!(plan_bands(0, 1000).is_empty());
    }
}
