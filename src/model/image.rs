use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{CardError, CardResult};

/// Upload ceiling for the profile picture.
pub const PROFILE_MAX_BYTES: usize = 5 * 1024 * 1024;
/// Upload ceiling for the company logo.
pub const LOGO_MAX_BYTES: usize = 2 * 1024 * 1024;

/// The two image inputs of the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    /// Round profile picture on the front face.
    Profile,
    /// Company logo on the front face.
    Logo,
}

impl ImageSlot {
    /// Largest accepted upload for this slot, in bytes.
    pub fn max_bytes(self) -> usize {
        match self {
            ImageSlot::Profile => PROFILE_MAX_BYTES,
            ImageSlot::Logo => LOGO_MAX_BYTES,
        }
    }

    /// Snapshot key holding this slot's data URI.
    pub fn snapshot_key(self) -> &'static str {
        match self {
            ImageSlot::Profile => "profileImageSrc",
            ImageSlot::Logo => "companyLogoSrc",
        }
    }
}

/// An embedded image as a `data:<mime>;base64,<payload>` URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    /// Validate an uploaded file for `slot` and embed it.
    ///
    /// Size is checked before anything else so oversized files are never decoded.
    pub fn from_upload(slot: ImageSlot, bytes: &[u8]) -> CardResult<Self> {
        let max = slot.max_bytes();
        if bytes.len() > max {
            return Err(CardError::upload(format!(
                "please select an image smaller than {}MB",
                max / (1024 * 1024)
            )));
        }

        let format = image::guess_format(bytes)
            .map_err(|_| CardError::upload("file is not a recognized image"))?;
        match format {
            image::ImageFormat::Png
            | image::ImageFormat::Jpeg
            | image::ImageFormat::Gif
            | image::ImageFormat::WebP => {}
            other => {
                return Err(CardError::upload(format!(
                    "unsupported image format {other:?}"
                )));
            }
        }

        Ok(Self(format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            STANDARD.encode(bytes)
        )))
    }

    /// Accept a previously stored URI. Anything that is not a `data:` URI is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        s.starts_with("data:").then(|| Self(s.to_owned()))
    }

    /// The full URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the base64 payload back into the original file bytes.
    pub fn decode(&self) -> CardResult<Vec<u8>> {
        let (_, payload) = self
            .0
            .split_once(";base64,")
            .ok_or_else(|| CardError::validation("data uri is not base64-encoded"))?;
        STANDARD
            .decode(payload)
            .map_err(|e| CardError::validation(format!("data uri payload: {e}")))
    }
}

/// Uploaded images currently shown on the card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardImages {
    /// Profile picture, if one was uploaded.
    pub profile: Option<DataUri>,
    /// Company logo, if one was uploaded.
    pub logo: Option<DataUri>,
}

impl CardImages {
    /// Borrow the image in `slot`.
    pub fn get(&self, slot: ImageSlot) -> Option<&DataUri> {
        match slot {
            ImageSlot::Profile => self.profile.as_ref(),
            ImageSlot::Logo => self.logo.as_ref(),
        }
    }

    /// Replace the image in `slot`.
    pub fn set(&mut self, slot: ImageSlot, uri: Option<DataUri>) {
        match slot {
            ImageSlot::Profile => self.profile = uri,
            ImageSlot::Logo => self.logo = uri,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/image.rs"]
mod tests;
