use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};

/// Largest raster edge we agree to allocate.
const MAX_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 image produced by a [`Rasterizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels, not premultiplied.
    pub rgba8: Vec<u8>,
}

impl RasterImage {
    /// Encode as PNG.
    pub fn encode_png(&self) -> CardResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba8.clone())
            .ok_or_else(|| CardError::render("raster buffer does not match its dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Flatten onto an opaque background and drop alpha (RGB8, row-major).
    pub fn to_rgb8_over(&self, bg: Color) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rgba8.len() / 4 * 3);
        for px in self.rgba8.chunks_exact(4) {
            let a = u16::from(px[3]);
            let blend = |c: u8, b: u8| ((u16::from(c) * a + u16::from(b) * (255 - a) + 127) / 255) as u8;
            out.push(blend(px[0], bg.r));
            out.push(blend(px[1], bg.g));
            out.push(blend(px[2], bg.b));
        }
        out
    }
}

/// Turns a card face SVG into pixels.
pub trait Rasterizer {
    /// Rasterize `svg` at `scale`× its intrinsic size.
    fn rasterize(&self, svg: &str, scale: u32) -> CardResult<RasterImage>;
}

/// [`Rasterizer`] backed by `usvg` + `resvg` with the system font database.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Rasterizer using every font installed on the system.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::with_fontdb(Arc::new(db))
    }

    /// Rasterizer using a caller-provided font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    fn parse(&self, svg: &str) -> CardResult<usvg::Tree> {
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        usvg::Tree::from_str(svg, &opts)
            .map_err(|e| CardError::render(format!("parse card svg: {e}")))
    }
}

impl Rasterizer for SvgRasterizer {
    #[tracing::instrument(level = "debug", skip(self, svg))]
    fn rasterize(&self, svg: &str, scale: u32) -> CardResult<RasterImage> {
        if scale == 0 {
            return Err(CardError::render("raster scale must be > 0"));
        }
        let tree = self.parse(svg)?;

        fn to_px(v: f32) -> CardResult<u32> {
            if !v.is_finite() || v <= 0.0 {
                return Err(CardError::render("svg has invalid width/height"));
            }
            Ok((v.ceil() as u32).max(1))
        }
        let size = tree.size();
        let width = to_px(size.width())?.saturating_mul(scale);
        let height = to_px(size.height())?.saturating_mul(scale);
        if width > MAX_DIM || height > MAX_DIM {
            return Err(CardError::render(format!(
                "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| CardError::render("failed to allocate card pixmap"))?;
        let xform = resvg::tiny_skia::Transform::from_scale(scale as f32, scale as f32);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let mut rgba8 = Vec::with_capacity(pixmap.pixels().len() * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba8.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(RasterImage {
            width,
            height,
            rgba8,
        })
    }
}

/// Generic families tried after the card's own `font-family` list.
const FALLBACK_FAMILIES: [usvg::fontdb::Family<'static>; 2] =
    [usvg::fontdb::Family::SansSerif, usvg::fontdb::Family::Serif];

/// The card's `font-family` list in priority order, followed by any generic fallback it lacks.
fn query_families(requested: &[usvg::FontFamily]) -> Vec<usvg::fontdb::Family<'_>> {
    use usvg::fontdb::Family;

    let mut families = Vec::with_capacity(requested.len() + FALLBACK_FAMILIES.len());
    let mapped = requested.iter().map(|family| match family {
        usvg::FontFamily::Serif => Family::Serif,
        usvg::FontFamily::SansSerif => Family::SansSerif,
        usvg::FontFamily::Cursive => Family::Cursive,
        usvg::FontFamily::Fantasy => Family::Fantasy,
        usvg::FontFamily::Monospace => Family::Monospace,
        usvg::FontFamily::Named(name) => Family::Name(name.as_str()),
    });
    for family in mapped {
        if !families.contains(&family) {
            families.push(family);
        }
    }
    for family in FALLBACK_FAMILIES {
        if !families.contains(&family) {
            families.push(family);
        }
    }
    families
}

/// Resolves card text against `fontdb`. A user-picked font that is not installed degrades to a
/// generic family, then to any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let families = query_families(font.families());
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: match font.style() {
                    usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                    usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                    usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
                },
            };
            fontdb.query(&query).or_else(|| {
                tracing::trace!(?families, "no matching font face; using first available");
                fontdb.faces().next().map(|f| f.id)
            })
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
