use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encode::vcard::{ContactRecord, Variant};
use crate::export::naming::{pdf_file_name, png_file_name, vcf_file_name};
use crate::export::pdf::card_pdf;
use crate::export::sink::Artifact;
use crate::foundation::error::{CardError, CardResult};
use crate::model::fields::{FieldModel, FieldName};
use crate::qr::service::QrImage;
use crate::render::raster::{RasterImage, Rasterizer};
use crate::render::svg::{CARD_HEIGHT, CARD_WIDTH, face_svg};
use crate::render::view::CardView;

/// Magnification used for PNG export (350×200 → 1050×600).
pub const PNG_SCALE: u32 = 3;
/// Magnification used for PDF export (350×200 → 1400×800).
pub const PDF_SCALE: u32 = 4;

/// MIME type of the contact file.
pub const VCARD_MIME: &str = "text/vcard";

/// The three export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Raster image of the presented face.
    Png,
    /// Card-sized document wrapping a raster of the presented face.
    Pdf,
    /// Full contact record.
    Vcf,
}

impl ExportKind {
    /// Lowercase name, also the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportKind::Png => "png",
            ExportKind::Pdf => "pdf",
            ExportKind::Vcf => "vcf",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportKind::Png),
            "pdf" => Ok(ExportKind::Pdf),
            "vcf" | "vcard" => Ok(ExportKind::Vcf),
            _ => Err(CardError::validation(format!("unknown export format \"{s}\""))),
        }
    }
}

/// Produces export artifacts from the current card view.
#[derive(Debug)]
pub struct Exporter<R> {
    rasterizer: R,
}

impl<R: Rasterizer> Exporter<R> {
    /// Exporter using `rasterizer` for the image-based formats.
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    /// Run one export.
    pub fn export(
        &self,
        kind: ExportKind,
        view: &CardView,
        qr: Option<&QrImage>,
        fields: &FieldModel,
    ) -> CardResult<Artifact> {
        match kind {
            ExportKind::Png => self.png(view, qr),
            ExportKind::Pdf => self.pdf(view, qr),
            ExportKind::Vcf => Ok(vcard_artifact(fields)),
        }
    }

    /// PNG of the presented face at [`PNG_SCALE`]×.
    #[tracing::instrument(level = "debug", skip_all, fields(face = ?view.face))]
    pub fn png(&self, view: &CardView, qr: Option<&QrImage>) -> CardResult<Artifact> {
        let raster = self.capture(view, qr, PNG_SCALE)?;
        let bytes = raster
            .encode_png()
            .map_err(|e| CardError::export(format!("encode png: {e}")))?;
        Ok(Artifact {
            file_name: png_file_name(view.name.as_deref().unwrap_or_default()),
            mime: "image/png",
            bytes,
        })
    }

    /// Single-page PDF of the presented face at [`PDF_SCALE`]×.
    #[tracing::instrument(level = "debug", skip_all, fields(face = ?view.face))]
    pub fn pdf(&self, view: &CardView, qr: Option<&QrImage>) -> CardResult<Artifact> {
        let raster = self.capture(view, qr, PDF_SCALE)?;
        let name = view.name.as_deref().unwrap_or_default();
        let bytes = card_pdf(&raster, name)?;
        Ok(Artifact {
            file_name: pdf_file_name(name),
            mime: "application/pdf",
            bytes,
        })
    }

    fn capture(&self, view: &CardView, qr: Option<&QrImage>, scale: u32) -> CardResult<RasterImage> {
        let svg = face_svg(view, qr);
        let raster = self
            .rasterizer
            .rasterize(&svg, scale)
            .map_err(|e| CardError::export(format!("rasterize card: {e}")))?;
        let expected = (CARD_WIDTH * scale, CARD_HEIGHT * scale);
        if (raster.width, raster.height) != expected {
            return Err(CardError::export(format!(
                "rasterizer returned {}x{}, expected {}x{}",
                raster.width, raster.height, expected.0, expected.1
            )));
        }
        Ok(raster)
    }
}

/// `.vcf` file with the full contact record.
pub fn vcard_artifact(fields: &FieldModel) -> Artifact {
    let record = ContactRecord::encode(fields, Variant::Full);
    Artifact {
        file_name: vcf_file_name(fields.raw(FieldName::FullName)),
        mime: VCARD_MIME,
        bytes: record.to_text().into_bytes(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
