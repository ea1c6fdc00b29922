use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::encode::vcard::{ContactRecord, Variant};
use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};
use crate::model::fields::FieldModel;
use crate::model::template::Template;

/// Minimum edge length of the standalone QR SVG, in pixels.
pub const QR_MIN_SIZE_PX: u32 = 80;

/// Module colours of a QR image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QrColors {
    /// Dark modules.
    pub dark: Color,
    /// Light modules and quiet zone.
    pub light: Color,
}

impl QrColors {
    /// Template text colour on the template background; gradients fall back to white.
    pub fn for_template(template: &Template) -> Self {
        Self {
            dark: template.text,
            light: template.background.solid().unwrap_or(Color::WHITE),
        }
    }
}

/// A generated QR code: the encoded payload, its module matrix and colours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrImage {
    payload: String,
    width: usize,
    dark: Vec<bool>,
    colors: QrColors,
    svg: String,
}

impl QrImage {
    /// Encode `payload` at error-correction level M.
    pub fn generate(payload: &str, colors: QrColors) -> CardResult<Self> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| CardError::qr(format!("encode {} byte payload: {e}", payload.len())))?;

        let dark_css = colors.dark.to_css();
        let light_css = colors.light.to_css();
        let svg = code
            .render::<svg::Color<'_>>()
            .min_dimensions(QR_MIN_SIZE_PX, QR_MIN_SIZE_PX)
            .dark_color(svg::Color(&dark_css))
            .light_color(svg::Color(&light_css))
            .build();

        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Ok(Self {
            payload: payload.to_owned(),
            width: code.width(),
            dark,
            colors,
            svg,
        })
    }

    /// The text that was encoded.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Modules per side (without quiet zone).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at (`x`, `y`) is dark. Out-of-range coordinates are light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    /// Module colours.
    pub fn colors(&self) -> QrColors {
        self.colors
    }

    /// Standalone SVG document (with quiet zone).
    pub fn to_svg(&self) -> &str {
        &self.svg
    }
}

/// Keeps the most recent QR image for the card.
///
/// A failed regeneration leaves the previous image in place.
#[derive(Clone, Debug, Default)]
pub struct QrService {
    current: Option<QrImage>,
}

impl QrService {
    /// Service with no image yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regenerate from the compact contact record and the template colours.
    #[tracing::instrument(level = "debug", skip_all, fields(template = %template.id))]
    pub fn refresh(&mut self, fields: &FieldModel, template: &Template) -> CardResult<&QrImage> {
        let payload = ContactRecord::encode(fields, Variant::Compact).to_text();
        match QrImage::generate(&payload, QrColors::for_template(template)) {
            Ok(img) => {
                tracing::debug!(modules = img.width(), "qr regenerated");
                Ok(self.current.insert(img))
            }
            Err(err) => {
                tracing::warn!(error = %err, "qr generation failed; keeping previous image");
                Err(err)
            }
        }
    }

    /// The latest good image.
    pub fn current(&self) -> Option<&QrImage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/qr/service.rs"]
mod tests;
