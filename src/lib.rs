//! Cardsmith builds digital business cards.
//!
//! A card is a flat record of contact fields plus style choices (template, accent colour, font)
//! and two optional embedded images. From that state the crate derives everything a card editor
//! shows or hands out:
//!
//! 1. **View**: [`render_card`] projects the state into a [`CardView`], one entry per visible
//!    element, and [`face_svg`] draws either face of the card as a standalone SVG document.
//! 2. **QR**: [`QrService`] encodes the compact vCard ([`ContactRecord`] with [`Variant::Compact`])
//!    in the template's colours.
//! 3. **Export**: [`Exporter`] rasterizes the presented face to PNG (3x) or a business-card sized
//!    PDF (4x), and writes the full vCard as a `.vcf` file.
//! 4. **Persistence**: [`PersistenceBridge`] saves and restores a single JSON [`Snapshot`] in any
//!    [`KeyValueStore`].
//!
//! [`Controller`] wires these together behind the operations a UI would call, including the
//! debounced text input cycle.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never fatal**: rejected uploads, invalid input and failed exports surface as [`Notice`]s and
//!   leave the previous state in place.
//! - **No IO in the core**: only [`FileStore`] and [`DirSink`] touch the filesystem.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod app;
mod encode;
mod export;
mod foundation;
mod model;
mod persist;
mod qr;
mod render;

pub use app::controller::{
    Controller, CycleStats, EXPORT_FAILED_NOTICE, Notice, NoticeKind,
};
pub use app::debounce::{Debouncer, INPUT_QUIET_PERIOD};
pub use app::validate::{
    REQUIRED_FIELDS, VALIDATION_NOTICE, ValidationReport, is_valid_email, validate,
};
pub use encode::social::{Platform, normalize_social_url};
pub use encode::vcard::{ContactRecord, Variant};
pub use export::naming::{FALLBACK_STEM, file_stem, pdf_file_name, png_file_name, vcf_file_name};
pub use export::pdf::{CARD_HEIGHT_PT, CARD_WIDTH_PT, card_pdf, mm_to_pt};
pub use export::pipeline::{
    ExportKind, Exporter, PDF_SCALE, PNG_SCALE, VCARD_MIME, vcard_artifact,
};
pub use export::sink::{Artifact, ArtifactSink, DirSink, InMemorySink};
pub use foundation::color::Color;
pub use foundation::error::{CardError, CardResult};
pub use model::fields::{
    ABOUT_MAX_CHARS, CharCount, CountLevel, DEFAULT_FONT_FAMILY, FieldModel, FieldName,
    StylePrefs, about_char_count, parse_skills,
};
pub use model::image::{CardImages, DataUri, ImageSlot, LOGO_MAX_BYTES, PROFILE_MAX_BYTES};
pub use model::template::{Background, GradientStop, Template, TemplateId, TemplateRegistry};
pub use persist::snapshot::{PersistenceBridge, SNAPSHOT_KEY, Snapshot};
pub use persist::store::{FileStore, KeyValueStore, MemoryStore};
pub use qr::service::{QR_MIN_SIZE_PX, QrColors, QrImage, QrService};
pub use render::raster::{RasterImage, Rasterizer, SvgRasterizer};
pub use render::svg::{CARD_HEIGHT, CARD_WIDTH, escape_xml, face_svg};
pub use render::view::{CardInput, CardView, Face, SocialLink, render_card};
