//! QR payload generation for the card.

pub(crate) mod service;
