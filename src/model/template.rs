use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};

/// Identifier of one of the built-in templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// White card with blue accents.
    #[default]
    Minimalist,
    /// Dark slate card with amber accents.
    Professional,
    /// Purple gradient card.
    Creative,
    /// White card with deep blue accents.
    Corporate,
    /// Near-black card with teal accents.
    Tech,
}

impl TemplateId {
    /// Every template, in catalog order.
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Minimalist,
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Corporate,
        TemplateId::Tech,
    ];

    /// Stable identifier used by the snapshot and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Minimalist => "minimalist",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Corporate => "corporate",
            TemplateId::Tech => "tech",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CardError::validation(format!("unknown template \"{s}\"")))
    }
}

/// One colour stop of a linear gradient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Stop position in `0..=1`.
    pub offset: f32,
    /// Stop colour.
    pub color: Color,
}

/// Card background fill.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Flat colour.
    Solid(Color),
    /// CSS-style linear gradient (`angle_deg` measured clockwise from "to top").
    LinearGradient {
        /// Gradient direction in degrees.
        angle_deg: f32,
        /// Ordered colour stops.
        stops: Vec<GradientStop>,
    },
}

impl Background {
    /// The background as a single solid colour, if it is one.
    pub fn solid(&self) -> Option<Color> {
        match self {
            Background::Solid(c) => Some(*c),
            Background::LinearGradient { .. } => None,
        }
    }
}

/// Immutable colour bundle for one template.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Template {
    /// Identifier.
    pub id: TemplateId,
    /// Human-readable name.
    pub name: &'static str,
    /// Primary colour (name, headings).
    pub primary: Color,
    /// Secondary colour (title, secondary text).
    pub secondary: Color,
    /// Default accent; copied into the style preferences on selection.
    pub accent: Color,
    /// Card background.
    pub background: Background,
    /// Body text colour.
    pub text: Color,
}

impl Template {
    /// Look up a catalog entry.
    pub fn get(id: TemplateId) -> Template {
        match id {
            TemplateId::Minimalist => Template {
                id,
                name: "Modern Minimalist",
                primary: Color::rgb(0x25, 0x63, 0xeb),
                secondary: Color::rgb(0x64, 0x74, 0x8b),
                accent: Color::rgb(0x3b, 0x82, 0xf6),
                background: Background::Solid(Color::WHITE),
                text: Color::rgb(0x1e, 0x29, 0x3b),
            },
            TemplateId::Professional => Template {
                id,
                name: "Professional Dark",
                primary: Color::rgb(0xfb, 0xbf, 0x24),
                secondary: Color::rgb(0xd9, 0x77, 0x06),
                accent: Color::rgb(0xf5, 0x9e, 0x0b),
                background: Background::Solid(Color::rgb(0x1e, 0x29, 0x3b)),
                text: Color::rgb(0xf8, 0xfa, 0xfc),
            },
            TemplateId::Creative => Template {
                id,
                name: "Creative Gradient",
                primary: Color::rgb(0x8b, 0x5c, 0xf6),
                secondary: Color::rgb(0xec, 0x48, 0x99),
                accent: Color::rgb(0xa8, 0x55, 0xf7),
                background: Background::LinearGradient {
                    angle_deg: 135.0,
                    stops: vec![
                        GradientStop {
                            offset: 0.0,
                            color: Color::rgb(0x66, 0x7e, 0xea),
                        },
                        GradientStop {
                            offset: 1.0,
                            color: Color::rgb(0x76, 0x4b, 0xa2),
                        },
                    ],
                },
                text: Color::WHITE,
            },
            TemplateId::Corporate => Template {
                id,
                name: "Corporate Classic",
                primary: Color::rgb(0x1e, 0x40, 0xaf),
                secondary: Color::rgb(0x37, 0x30, 0xa3),
                accent: Color::rgb(0x25, 0x63, 0xeb),
                background: Background::Solid(Color::WHITE),
                text: Color::rgb(0x1e, 0x29, 0x3b),
            },
            TemplateId::Tech => Template {
                id,
                name: "Tech Futuristic",
                primary: Color::rgb(0x06, 0xd6, 0xa0),
                secondary: Color::rgb(0x11, 0x8a, 0xb2),
                accent: Color::rgb(0x10, 0xb9, 0x81),
                background: Background::Solid(Color::rgb(0x0f, 0x17, 0x2a)),
                text: Color::rgb(0xe2, 0xe8, 0xf0),
            },
        }
    }

    /// The full catalog, in display order.
    pub fn catalog() -> Vec<Template> {
        TemplateId::ALL.into_iter().map(Template::get).collect()
    }
}

/// Tracks which catalog entry is active.
///
/// Switching is a single assignment, so there is never a moment with zero or two active entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    active: TemplateId,
    switches: u64,
}

impl TemplateRegistry {
    /// Identifier of the active template.
    pub fn active_id(&self) -> TemplateId {
        self.active
    }

    /// The active template record.
    pub fn active(&self) -> Template {
        Template::get(self.active)
    }

    /// Whether `id` is the active entry.
    pub fn is_active(&self, id: TemplateId) -> bool {
        self.active == id
    }

    /// Select a template by identifier string. Unknown identifiers change nothing.
    pub fn select_str(&mut self, id: &str) -> CardResult<Template> {
        let id: TemplateId = id.parse()?;
        Ok(self.select(id))
    }

    /// Select a template and return its record.
    pub fn select(&mut self, id: TemplateId) -> Template {
        self.active = id;
        self.switches += 1;
        Template::get(id)
    }

    /// How many switches happened so far; drives the slide-in transition cue.
    pub fn switch_count(&self) -> u64 {
        self.switches
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/template.rs"]
mod tests;
