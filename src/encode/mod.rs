//! Text encodings of the field model: vCard records and social profile URLs.

pub(crate) mod social;
pub(crate) mod vcard;
