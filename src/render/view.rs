use serde::{Deserialize, Serialize};

use crate::encode::social::{Platform, normalize_social_url};
use crate::foundation::color::Color;
use crate::model::fields::{FieldModel, FieldName, StylePrefs};
use crate::model::image::CardImages;
use crate::model::template::TemplateId;

/// Which side of the card is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Identity and contact details.
    #[default]
    Front,
    /// About, skills, address and social links.
    Back,
}

impl Face {
    /// The other face.
    pub fn flipped(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// A visible social profile link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Network.
    pub platform: Platform,
    /// Absolute profile URL.
    pub url: String,
}

/// Everything the renderer needs, borrowed from the application state.
#[derive(Clone, Copy, Debug)]
pub struct CardInput<'a> {
    /// Form values.
    pub fields: &'a FieldModel,
    /// Accent and font.
    pub style: &'a StylePrefs,
    /// Active template.
    pub template: TemplateId,
    /// Uploaded images.
    pub images: &'a CardImages,
    /// Presented face.
    pub face: Face,
    /// Transition cue counter (bumped on every template switch).
    pub transition: u64,
}

/// Headless projection of the card: one entry per presentation element.
///
/// An element that is `None` (or an empty list) is not shown at all; there is never hidden text
/// left behind from an earlier value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    /// Active template.
    pub template: TemplateId,
    /// Presented face.
    pub face: Face,
    /// Effective accent colour.
    pub accent: Color,
    /// Effective font family.
    pub font_family: String,
    /// Transition cue counter.
    pub transition: u64,

    /// Display name.
    pub name: Option<String>,
    /// Job title.
    pub title: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Email contact line.
    pub email: Option<String>,
    /// Primary phone contact line.
    pub phone: Option<String>,
    /// Secondary phone contact line.
    pub phone_secondary: Option<String>,
    /// Website contact line.
    pub website: Option<String>,
    /// Social links that have a value, in platform order.
    pub socials: Vec<SocialLink>,
    /// About section.
    pub about: Option<String>,
    /// Skill tags; the section is hidden when empty.
    pub skills: Vec<String>,
    /// Address lines; the section is hidden when empty.
    pub address: Vec<String>,
    /// Profile picture data URI.
    pub profile_image: Option<String>,
    /// Company logo data URI.
    pub logo: Option<String>,
}

impl CardView {
    /// URL of the link for `platform`, if shown.
    pub fn social(&self, platform: Platform) -> Option<&str> {
        self.socials
            .iter()
            .find(|l| l.platform == platform)
            .map(|l| l.url.as_str())
    }

    /// Up to two initials used as the avatar placeholder when no profile picture exists.
    pub fn initials(&self) -> String {
        self.name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Project the current state into a [`CardView`].
///
/// Pure and deterministic: the same input always yields an equal view, and every list is rebuilt
/// from scratch.
#[tracing::instrument(level = "trace", skip_all, fields(template = %input.template, face = ?input.face))]
pub fn render_card(input: &CardInput<'_>) -> CardView {
    let f = input.fields;
    let text = |field: FieldName| f.value(field).map(str::to_owned);

    let socials = Platform::ALL
        .into_iter()
        .filter_map(|platform| {
            normalize_social_url(platform, f.raw(platform.field()))
                .map(|url| SocialLink { platform, url })
        })
        .collect();

    let address = f
        .value(FieldName::Address)
        .map(|a| {
            a.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    CardView {
        template: input.template,
        face: input.face,
        accent: input.style.accent,
        font_family: input.style.font_family.clone(),
        transition: input.transition,
        name: text(FieldName::FullName),
        title: text(FieldName::JobTitle),
        company: text(FieldName::Company),
        department: text(FieldName::Department),
        email: text(FieldName::Email),
        phone: text(FieldName::Phone),
        phone_secondary: text(FieldName::PhoneSecondary),
        website: text(FieldName::Website),
        socials,
        about: text(FieldName::About),
        skills: f.skills(),
        address,
        profile_image: input.images.profile.as_ref().map(|u| u.as_str().to_owned()),
        logo: input.images.logo.as_ref().map(|u| u.as_str().to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/view.rs"]
mod tests;
