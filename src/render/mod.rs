//! Card rendering: headless view projection, SVG faces and rasterization.

pub(crate) mod raster;
pub(crate) mod svg;
pub(crate) mod view;
