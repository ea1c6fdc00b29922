use std::sync::Arc;

use super::*;
use crate::model::fields::StylePrefs;
use crate::model::image::CardImages;
use crate::model::template::{Template, TemplateId};
use crate::render::raster::SvgRasterizer;
use crate::render::view::{CardInput, Face, render_card};

/// Returns a flat image of the requested size without looking at the SVG.
struct FlatRasterizer;

impl Rasterizer for FlatRasterizer {
    fn rasterize(&self, _svg: &str, scale: u32) -> CardResult<RasterImage> {
        let (width, height) = (CARD_WIDTH * scale, CARD_HEIGHT * scale);
        Ok(RasterImage {
            width,
            height,
            rgba8: [255u8, 255, 255, 255].repeat((width * height) as usize),
        })
    }
}

struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    fn rasterize(&self, _svg: &str, _scale: u32) -> CardResult<RasterImage> {
        Err(CardError::render("canvas tainted"))
    }
}

fn sample_view(fields: &FieldModel) -> CardView {
    let style = StylePrefs::new(Template::get(TemplateId::Minimalist).accent);
    let images = CardImages::default();
    render_card(&CardInput {
        fields,
        style: &style,
        template: TemplateId::Minimalist,
        images: &images,
        face: Face::Front,
        transition: 0,
    })
}

#[test]
fn png_export_is_three_times_card_size() {
    let fields = FieldModel::sample();
    let exporter = Exporter::new(SvgRasterizer::with_fontdb(Arc::new(
        usvg::fontdb::Database::new(),
    )));
    let art = exporter.png(&sample_view(&fields), None).unwrap();
    assert_eq!(art.file_name, "alex_johnson_business_card.png");
    assert_eq!(art.mime, "image/png");
    let img = image::load_from_memory(&art.bytes).unwrap();
    assert_eq!((img.width(), img.height()), (1050, 600));
}

#[test]
fn pdf_export_uses_four_times_scale() {
    let fields = FieldModel::sample();
    let art = Exporter::new(FlatRasterizer)
        .pdf(&sample_view(&fields), None)
        .unwrap();
    assert_eq!(art.file_name, "alex_johnson_business_card.pdf");
    assert_eq!(art.mime, "application/pdf");
    let text = String::from_utf8_lossy(&art.bytes);
    assert!(text.contains("/Width 1400"));
    assert!(text.contains("/Height 800"));
}

#[test]
fn vcf_export_uses_full_record() {
    let mut fields = FieldModel::sample();
    fields.set(FieldName::PhoneSecondary, "+1 555 0000");
    let art = Exporter::new(BrokenRasterizer)
        .export(ExportKind::Vcf, &sample_view(&fields), None, &fields)
        .unwrap();
    assert_eq!(art.file_name, "alex_johnson_contact.vcf");
    assert_eq!(art.mime, "text/vcard");
    let text = String::from_utf8(art.bytes).unwrap();
    assert!(text.contains("TEL;TYPE=CELL:+1 555 0000"));
    assert!(text.ends_with("END:VCARD"));
}

#[test]
fn rasterizer_failure_becomes_export_error() {
    let fields = FieldModel::sample();
    let exporter = Exporter::new(BrokenRasterizer);
    for kind in [ExportKind::Png, ExportKind::Pdf] {
        let err = exporter
            .export(kind, &sample_view(&fields), None, &fields)
            .unwrap_err();
        assert!(matches!(err, CardError::Export(ref m) if m.contains("canvas tainted")));
    }
}

#[test]
fn export_kind_parses() {
    assert_eq!("PNG".parse::<ExportKind>().unwrap(), ExportKind::Png);
    assert_eq!("vcard".parse::<ExportKind>().unwrap(), ExportKind::Vcf);
    assert!("gif".parse::<ExportKind>().is_err());
    assert_eq!(ExportKind::Pdf.to_string(), "pdf");
}
