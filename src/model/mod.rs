//! The card's data model: form fields, style preferences, uploaded images and templates.

pub(crate) mod fields;
pub(crate) mod image;
pub(crate) mod template;
