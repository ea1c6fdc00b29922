use std::io::Write as _;

use anyhow::Context;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};
use crate::render::raster::RasterImage;

/// Page width: a standard 3.5in business card (88.9 mm), in PDF points.
pub const CARD_WIDTH_PT: f32 = 3.5 * 72.0;
/// Page height: 2in (50.8 mm), in PDF points.
pub const CARD_HEIGHT_PT: f32 = 2.0 * 72.0;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Wrap a rasterized card face in a single landscape page sized to the card.
///
/// The image is flattened onto white and stored as Flate-compressed DeviceRGB; it is stretched to
/// cover the whole page.
pub fn card_pdf(image: &RasterImage, title: &str) -> CardResult<Vec<u8>> {
    if image.width == 0 || image.height == 0 {
        return Err(CardError::export("cannot package an empty image"));
    }

    let rgb = image.to_rgb8_over(Color::WHITE);
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&rgb).context("compress card image")?;
    let compressed = enc.finish().context("finish card image stream")?;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);
    let info_id = Ref::new(6);
    let image_name = Name(b"Card");
    let (w, h) = (CARD_WIDTH_PT, CARD_HEIGHT_PT);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, w, h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(image_name, image_id);
    page.finish();

    let mut xobj = pdf.image_xobject(image_id, &compressed);
    xobj.filter(Filter::FlateDecode);
    xobj.width(image.width as i32);
    xobj.height(image.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    xobj.finish();

    let mut content = Content::new();
    content.save_state();
    content.transform([w, 0.0, 0.0, h, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.document_info(info_id)
        .title(TextStr(title))
        .creator(TextStr("cardsmith"));

    Ok(pdf.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/export/pdf.rs"]
mod tests;
