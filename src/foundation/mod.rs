//! Shared building blocks: the error taxonomy and colour values.

pub(crate) mod color;
pub(crate) mod error;
