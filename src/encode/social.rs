use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::CardError;
use crate::model::fields::FieldName;

/// Social networks the card can link to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// linkedin.com profile.
    Linkedin,
    /// github.com profile.
    Github,
    /// twitter.com profile.
    Twitter,
    /// instagram.com profile.
    Instagram,
}

impl Platform {
    /// Every platform, in display order.
    pub const ALL: [Platform; 4] = [
        Platform::Linkedin,
        Platform::Github,
        Platform::Twitter,
        Platform::Instagram,
    ];

    /// Lowercase tag, also the platform's bare domain stem.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Github => "github",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
        }
    }

    /// Form field holding this platform's handle.
    pub fn field(self) -> FieldName {
        match self {
            Platform::Linkedin => FieldName::Linkedin,
            Platform::Github => FieldName::Github,
            Platform::Twitter => FieldName::Twitter,
            Platform::Instagram => FieldName::Instagram,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CardError::validation(format!("unknown platform \"{s}\"")))
    }
}

/// Turn a handle or partial URL into an absolute profile URL.
///
/// Returns `None` for blank input. Values that already carry a scheme are returned unchanged.
pub fn normalize_social_url(platform: Platform, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") {
        return Some(raw.to_owned());
    }

    let url = match platform {
        Platform::Linkedin => {
            if raw.starts_with("linkedin.com") {
                format!("https://{raw}")
            } else {
                format!("https://linkedin.com/in/{raw}")
            }
        }
        Platform::Github => {
            if raw.starts_with("github.com") {
                format!("https://{raw}")
            } else {
                format!("https://github.com/{raw}")
            }
        }
        Platform::Twitter | Platform::Instagram => {
            let handle = raw.strip_prefix('@').unwrap_or(raw);
            format!("https://{}.com/{handle}", platform.as_str())
        }
    };
    Some(url)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/social.rs"]
mod tests;
