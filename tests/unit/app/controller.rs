use std::io::Cursor;
use std::time::Duration;

use super::*;
use crate::export::sink::InMemorySink;
use crate::foundation::error::CardError;
use crate::model::image::PROFILE_MAX_BYTES;
use crate::persist::snapshot::SNAPSHOT_KEY;
use crate::persist::store::MemoryStore;
use crate::render::raster::RasterImage;
use crate::render::svg::{CARD_HEIGHT, CARD_WIDTH};

struct FlatRasterizer;

impl Rasterizer for FlatRasterizer {
    fn rasterize(&self, _svg: &str, scale: u32) -> CardResult<RasterImage> {
        let (width, height) = (CARD_WIDTH * scale, CARD_HEIGHT * scale);
        Ok(RasterImage {
            width,
            height,
            rgba8: [20u8, 40, 60, 255].repeat((width * height) as usize),
        })
    }
}

struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    fn rasterize(&self, _svg: &str, _scale: u32) -> CardResult<RasterImage> {
        Err(CardError::render("canvas tainted"))
    }
}

fn controller(store: MemoryStore) -> Controller<MemoryStore, FlatRasterizer> {
    Controller::init(store, FlatRasterizer)
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn fresh_session_shows_sample_card() {
    let ctl = controller(MemoryStore::new());
    assert_eq!(ctl.fields(), &FieldModel::sample());
    assert_eq!(ctl.template().id, TemplateId::Minimalist);
    assert_eq!(ctl.style().accent, Template::get(TemplateId::Minimalist).accent);
    assert_eq!(ctl.view().name.as_deref(), Some("Alex Johnson"));
    assert_eq!(ctl.face(), Face::Front);
    assert!(ctl.qr().is_some());
    assert_eq!(ctl.stats().persists, 0);
    assert_eq!(ctl.store().writes(), 0);
}

#[test]
fn keystroke_burst_commits_once() {
    let t0 = Instant::now();
    let ms = Duration::from_millis;
    let mut ctl = controller(MemoryStore::new());
    let before = ctl.stats();

    for (i, prefix) in ["J", "Ja", "Jan", "Jane", "Jane D"].into_iter().enumerate() {
        ctl.input(FieldName::FullName, prefix, t0 + ms(i as u64 * 40));
        assert!(!ctl.tick(t0 + ms(i as u64 * 40 + 10)));
    }
    // Model changes immediately; the view waits for the quiet period.
    assert_eq!(ctl.fields().raw(FieldName::FullName), "Jane D");
    assert_eq!(ctl.view().name.as_deref(), Some("Alex Johnson"));
    assert!(ctl.is_input_pending());
    assert_eq!(ctl.input_deadline(), Some(t0 + ms(160 + 300)));

    assert!(!ctl.tick(t0 + ms(160 + 299)));
    assert!(ctl.tick(t0 + ms(160 + 300)));
    assert!(!ctl.tick(t0 + ms(2000)));

    let after = ctl.stats();
    assert_eq!(after.renders, before.renders + 1);
    assert_eq!(after.persists, before.persists + 1);
    assert_eq!(ctl.store().writes(), 1);
    assert_eq!(ctl.view().name.as_deref(), Some("Jane D"));
    assert!(ctl.qr().unwrap().payload().contains("FN:Jane D"));
}

#[test]
fn saved_state_survives_restart() {
    let mut ctl = controller(MemoryStore::new());
    ctl.input(FieldName::Company, "Initech", Instant::now());
    assert!(ctl.flush());
    ctl.select_template("tech").unwrap();
    ctl.set_font("Georgia, serif");
    ctl.set_accent("#ff8800").unwrap();
    ctl.upload(ImageSlot::Logo, &tiny_png()).unwrap();

    let restored = controller(ctl.store().clone());
    assert_eq!(restored.fields().raw(FieldName::Company), "Initech");
    assert_eq!(restored.template().id, TemplateId::Tech);
    assert_eq!(restored.style().font_family, "Georgia, serif");
    assert_eq!(restored.style().accent.to_css(), "#ff8800");
    assert_eq!(restored.images(), ctl.images());
    assert_eq!(restored.snapshot(), ctl.snapshot());
}

#[test]
fn malformed_snapshot_falls_back_to_sample() {
    let mut store = MemoryStore::new();
    store.set(SNAPSHOT_KEY, "{not json").unwrap();
    let ctl = controller(store);
    assert_eq!(ctl.fields(), &FieldModel::sample());
    assert_eq!(ctl.template().id, TemplateId::Minimalist);
}

#[test]
fn template_switch_resets_accent_and_recolours_qr() {
    let mut ctl = controller(MemoryStore::new());
    ctl.set_accent("#123456").unwrap();
    let switches = ctl.view().transition;

    ctl.select_template("corporate").unwrap();
    let corporate = Template::get(TemplateId::Corporate);
    assert_eq!(ctl.template().id, TemplateId::Corporate);
    assert_eq!(ctl.style().accent, corporate.accent);
    assert_eq!(ctl.view().template, TemplateId::Corporate);
    assert_eq!(ctl.view().transition, switches + 1);
    assert_eq!(ctl.qr().unwrap().colors().dark, corporate.text);

    let writes = ctl.store().writes();
    let err = ctl.select_template("retro").unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert_eq!(ctl.template().id, TemplateId::Corporate);
    assert_eq!(ctl.store().writes(), writes);
}

#[test]
fn invalid_accent_changes_nothing() {
    let mut ctl = controller(MemoryStore::new());
    let accent = ctl.style().accent;
    assert!(ctl.set_accent("teal").is_err());
    assert_eq!(ctl.style().accent, accent);
    assert_eq!(ctl.store().writes(), 0);
}

#[test]
fn oversized_upload_is_rejected_without_side_effects() {
    let mut ctl = controller(MemoryStore::new());
    let mut big = tiny_png();
    big.resize(ImageSlot::Logo.max_bytes() + 1, 0);

    let err = ctl.upload(ImageSlot::Logo, &big).unwrap_err();
    assert!(matches!(err, CardError::Upload(_)));
    assert!(ctl.images().logo.is_none());
    assert_eq!(ctl.store().writes(), 0);

    let notices = ctl.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Upload);
    assert!(notices[0].message.contains("2MB"), "{}", notices[0].message);
    assert!(ctl.notices().is_empty());
}

#[test]
fn oversized_profile_picture_keeps_current_image() {
    let mut ctl = controller(MemoryStore::new());
    ctl.upload(ImageSlot::Profile, &tiny_png()).unwrap();
    let shown = ctl.images().profile.clone();
    assert!(shown.is_some());
    let saved = ctl.store().get(SNAPSHOT_KEY).unwrap();
    let writes = ctl.store().writes();

    let mut big = tiny_png();
    big.resize(PROFILE_MAX_BYTES + 1, 0);
    let err = ctl.upload(ImageSlot::Profile, &big).unwrap_err();
    assert!(matches!(err, CardError::Upload(_)));
    assert!(err.to_string().contains("5MB"), "{err}");

    assert_eq!(ctl.images().profile, shown);
    assert_eq!(ctl.view().profile_image.as_deref(), shown.as_ref().map(|u| u.as_str()));
    assert_eq!(ctl.store().get(SNAPSHOT_KEY).unwrap(), saved);
    assert_eq!(ctl.store().writes(), writes);
    assert_eq!(ctl.take_notices().len(), 1);
}

#[test]
fn accepted_upload_shows_on_card() {
    let mut ctl = controller(MemoryStore::new());
    ctl.upload(ImageSlot::Profile, &tiny_png()).unwrap();
    let src = ctl.view().profile_image.as_deref().unwrap();
    assert!(src.starts_with("data:image/png;base64,"));
    assert_eq!(ctl.store().writes(), 1);
}

#[test]
fn flip_toggles_face() {
    let mut ctl = controller(MemoryStore::new());
    assert_eq!(ctl.flip(), Face::Back);
    assert_eq!(ctl.view().face, Face::Back);
    assert_eq!(ctl.flip(), Face::Front);
}

#[test]
fn submit_marks_invalid_fields() {
    let mut ctl = controller(MemoryStore::new());
    ctl.input(FieldName::Email, "nope", Instant::now());
    let report = ctl.submit();
    assert_eq!(report.invalid, vec![FieldName::Email]);
    assert_eq!(ctl.invalid_fields(), &[FieldName::Email]);
    assert_eq!(ctl.notices()[0].kind, NoticeKind::Validation);

    ctl.input(FieldName::Email, "alex@example.com", Instant::now());
    assert!(ctl.submit().is_valid());
    assert!(ctl.invalid_fields().is_empty());
}

#[test]
fn export_commits_pending_input_first() {
    let mut ctl = controller(MemoryStore::new());
    ctl.input(FieldName::FullName, "Jane Doe", Instant::now());
    let mut sink = InMemorySink::new();
    ctl.export_to(ExportKind::Png, &mut sink).unwrap();
    ctl.export_to(ExportKind::Vcf, &mut sink).unwrap();

    let names: Vec<_> = sink.artifacts().iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        names,
        ["jane_doe_business_card.png", "jane_doe_contact.vcf"]
    );
    assert!(!ctl.is_input_pending());
}

#[test]
fn failed_export_raises_notice_and_delivers_nothing() {
    let mut ctl = Controller::init(MemoryStore::new(), BrokenRasterizer);
    let view = ctl.view().clone();
    let mut sink = InMemorySink::new();

    assert!(ctl.export_to(ExportKind::Pdf, &mut sink).is_err());
    assert!(sink.artifacts().is_empty());
    assert_eq!(ctl.view(), &view);
    let notices = ctl.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Export);
    assert_eq!(notices[0].message, EXPORT_FAILED_NOTICE);

    // The contact file does not need the rasterizer.
    assert!(ctl.export_to(ExportKind::Vcf, &mut sink).is_ok());
}

#[test]
fn reset_restores_defaults_and_forgets_snapshot() {
    let mut ctl = controller(MemoryStore::new());
    ctl.select_template("creative").unwrap();
    ctl.set_font("Courier");
    ctl.flip();
    assert!(ctl.store().get(SNAPSHOT_KEY).unwrap().is_some());

    ctl.reset().unwrap();
    assert_eq!(ctl.fields(), &FieldModel::sample());
    assert_eq!(ctl.template().id, TemplateId::Minimalist);
    assert_eq!(ctl.style().font_family, crate::model::fields::DEFAULT_FONT_FAMILY);
    assert_eq!(ctl.face(), Face::Front);
    assert!(ctl.store().get(SNAPSHOT_KEY).unwrap().is_none());
}

#[test]
fn about_counter_tracks_input() {
    let mut ctl = controller(MemoryStore::new());
    ctl.input(FieldName::About, "x".repeat(271), Instant::now());
    let count = ctl.about_count();
    assert_eq!(count.current, 271);
    assert_eq!(count.level, crate::model::fields::CountLevel::Warning);
}
