//! PDF assembly: one page per encoded band, the band image placed full-width at the
//! top of the page.

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use tracing::debug;

use crate::export::encode::EncodedBand;
use crate::export::paginate::PageSize;

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const INFO_ID: Ref = Ref::new(3);
/// Each page takes three objects: page, image, content stream.
const FIRST_PAGE_OBJECT: i32 = 10;
const IMAGE_NAME: Name<'static> = Name(b"Band");

/// Builds the document. Pages appear in band order.
pub fn assemble_pdf(bands: &[EncodedBand], page: PageSize) -> Vec<u8> {
    let page_w = page.width_pt();
    let page_h = page.height_pt();

    let mut pdf = Pdf::new();
    pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
    pdf.document_info(INFO_ID).producer(TextStr("cv-builder"));

    let mut page_ids = Vec::with_capacity(bands.len());
    for (i, encoded) in bands.iter().enumerate() {
        let base = FIRST_PAGE_OBJECT + 3 * i as i32;
        let page_id = Ref::new(base);
        let image_id = Ref::new(base + 1);
        let content_id = Ref::new(base + 2);
        page_ids.push(page_id);

        let mut image = pdf.image_xobject(image_id, &encoded.jpeg);
        image.filter(Filter::DctDecode);
        image.width(encoded.width as i32);
        image.height(encoded.band.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        // Full page width; height keeps the band's aspect ratio.
        let draw_h = encoded.band.height as f32 * page_w / encoded.width.max(1) as f32;
        let mut content = Content::new();
        content.save_state();
        content.transform([page_w, 0.0, 0.0, draw_h, 0.0, page_h - draw_h]);
        content.x_object(IMAGE_NAME);
        content.restore_state();
        pdf.stream(content_id, &content.finish());

        let mut pdf_page = pdf.page(page_id);
        pdf_page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        pdf_page.parent(PAGE_TREE_ID);
        pdf_page.contents(content_id);
        pdf_page.resources().x_objects().pair(IMAGE_NAME, image_id);
        pdf_page.finish();

        debug!(page = i + 1, draw_height_pt = draw_h, "Placed band on page");
    }

    pdf.pages(PAGE_TREE_ID)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::encode::encode_band;
    use crate::export::paginate::plan_bands;
    use image::{Rgb, RgbImage};

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_one_page_per_band() {
        let bitmap = RgbImage::from_pixel(21, 80, Rgb([255, 255, 255]));
        let bands: Vec<_> = plan_bands(80, 30)
            .into_iter()
            .map(|b| encode_band(&bitmap, b, 80).unwrap())
            .collect();
        let bytes = assemble_pdf(&bands, PageSize::A4);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "/Count 3"));
        assert!(contains(&bytes, "/DCTDecode"));
        assert!(contains(&bytes, "/MediaBox"));
    }
}
