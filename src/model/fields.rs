use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};

/// Font family applied when nothing else was chosen.
pub const DEFAULT_FONT_FAMILY: &str = "Inter, sans-serif";

/// Maximum length of the "about" text, in characters.
pub const ABOUT_MAX_CHARS: usize = 300;

/// Named text inputs of the card form.
///
/// The serialized names double as the persisted snapshot keys.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Full display name.
    FullName,
    /// Job title.
    JobTitle,
    /// Company / organization.
    Company,
    /// Department within the company.
    Department,
    /// Email address.
    Email,
    /// Primary (work) phone.
    Phone,
    /// Secondary (cell) phone.
    PhoneSecondary,
    /// Personal or company website.
    Website,
    /// LinkedIn handle or URL.
    Linkedin,
    /// GitHub handle or URL.
    Github,
    /// Twitter handle or URL.
    Twitter,
    /// Instagram handle or URL.
    Instagram,
    /// Free-text description.
    About,
    /// Comma-separated skills list.
    Skills,
    /// Multi-line postal address.
    Address,
}

impl FieldName {
    /// Every field, in form order.
    pub const ALL: [FieldName; 15] = [
        FieldName::FullName,
        FieldName::JobTitle,
        FieldName::Company,
        FieldName::Department,
        FieldName::Email,
        FieldName::Phone,
        FieldName::PhoneSecondary,
        FieldName::Website,
        FieldName::Linkedin,
        FieldName::Github,
        FieldName::Twitter,
        FieldName::Instagram,
        FieldName::About,
        FieldName::Skills,
        FieldName::Address,
    ];

    /// Stable key used by the form and the persisted snapshot.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::JobTitle => "jobTitle",
            FieldName::Company => "company",
            FieldName::Department => "department",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::PhoneSecondary => "phoneSecondary",
            FieldName::Website => "website",
            FieldName::Linkedin => "linkedin",
            FieldName::Github => "github",
            FieldName::Twitter => "twitter",
            FieldName::Instagram => "instagram",
            FieldName::About => "about",
            FieldName::Skills => "skills",
            FieldName::Address => "address",
        }
    }

    /// Inverse of [`FieldName::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl FromStr for FieldName {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| CardError::validation(format!("unknown field \"{s}\"")))
    }
}

/// Current value of every text input on the card form.
///
/// Values are kept exactly as entered; consumers use [`FieldModel::value`] to get the trimmed,
/// non-empty view that decides visibility and encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldModel {
    values: BTreeMap<FieldName, String>,
}

impl FieldModel {
    /// A model with every field empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in sample record shown on first start and after a reset.
    pub fn sample() -> Self {
        let mut m = Self::empty();
        m.set(FieldName::FullName, "Alex Johnson");
        m.set(FieldName::JobTitle, "Senior Software Engineer");
        m.set(FieldName::Company, "TechCorp Solutions");
        m.set(FieldName::Department, "Product Development");
        m.set(FieldName::Email, "alex.johnson@techcorp.com");
        m.set(FieldName::Phone, "+1 (555) 123-4567");
        m.set(FieldName::Website, "www.alexjohnson.dev");
        m.set(FieldName::Linkedin, "linkedin.com/in/alexjohnson");
        m.set(FieldName::Github, "github.com/alexjohnson");
        m.set(
            FieldName::About,
            "Passionate full-stack developer with 8+ years of experience building scalable web \
             applications and leading development teams.",
        );
        m.set(
            FieldName::Skills,
            "React, Node.js, Python, AWS, TypeScript, MongoDB",
        );
        m
    }

    /// Raw value as entered (empty string when unset).
    pub fn raw(&self, field: FieldName) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value, or `None` when the field is blank.
    pub fn value(&self, field: FieldName) -> Option<&str> {
        let v = self.raw(field).trim();
        (!v.is_empty()).then_some(v)
    }

    /// Replace one field's value. Setting an empty string clears it.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Parsed skill tags.
    pub fn skills(&self) -> Vec<String> {
        parse_skills(self.raw(FieldName::Skills))
    }

    /// Iterate over the non-empty raw entries.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Split a comma-separated list into trimmed, non-empty tags.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// User style preferences applied on top of the active template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePrefs {
    /// Accent colour (defaults to the active template's accent).
    pub accent: Color,
    /// Font family applied to every text element on the card.
    pub font_family: String,
}

impl StylePrefs {
    /// Preferences for a freshly selected template.
    pub fn new(accent: Color) -> Self {
        Self {
            accent,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
        }
    }

    /// Replace the font family. Blank input restores the default.
    pub fn set_font_family(&mut self, family: &str) {
        let family = family.trim();
        self.font_family = if family.is_empty() {
            DEFAULT_FONT_FAMILY.to_owned()
        } else {
            family.to_owned()
        };
    }

    /// Parse and apply an accent colour. Invalid input leaves the current accent untouched.
    pub fn set_accent(&mut self, value: &str) -> CardResult<()> {
        self.accent = Color::parse_hex(value)?;
        Ok(())
    }
}

/// How close the "about" text is to its length limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountLevel {
    /// At or below 80% of the limit.
    Normal,
    /// Above 80% of the limit.
    Info,
    /// Above 90% of the limit.
    Warning,
}

/// Character counter shown under the "about" input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CharCount {
    /// Characters entered.
    pub current: usize,
    /// Allowed maximum.
    pub max: usize,
    /// Highlight level.
    pub level: CountLevel,
}

/// Count characters of `text` against [`ABOUT_MAX_CHARS`].
pub fn about_char_count(text: &str) -> CharCount {
    let current = text.chars().count();
    let max = ABOUT_MAX_CHARS;
    // Integer form of `current > max * 0.9` / `current > max * 0.8`.
    let level = if current * 10 > max * 9 {
        CountLevel::Warning
    } else if current * 10 > max * 8 {
        CountLevel::Info
    } else {
        CountLevel::Normal
    };
    CharCount {
        current,
        max,
        level,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/fields.rs"]
mod tests;
