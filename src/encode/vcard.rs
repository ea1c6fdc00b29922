use std::fmt;

use crate::model::fields::{FieldModel, FieldName};

const HEADER: [&str; 2] = ["BEGIN:VCARD", "VERSION:3.0"];
const FOOTER: &str = "END:VCARD";

/// Which field set a contact record carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Identity and primary contacts only; keeps the QR payload small.
    Compact,
    /// Adds the secondary phone and the address; used for `.vcf` export.
    Full,
}

/// A vCard 3.0 record built from the field model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRecord {
    lines: Vec<String>,
}

impl ContactRecord {
    /// Encode `fields` as a contact record.
    ///
    /// Blank fields contribute no line. Field order is fixed:
    /// `FN, ORG, TITLE, EMAIL, TEL, [TEL;CELL, ADR], URL`.
    pub fn encode(fields: &FieldModel, variant: Variant) -> Self {
        let mut lines: Vec<String> = HEADER.iter().map(|s| (*s).to_owned()).collect();

        if let Some(name) = fields.value(FieldName::FullName) {
            lines.push(format!("FN:{}", escape_text(name)));
        }
        if let Some(company) = fields.value(FieldName::Company) {
            lines.push(format!("ORG:{}", escape_text(company)));
        }
        if let Some(title) = fields.value(FieldName::JobTitle) {
            lines.push(format!("TITLE:{}", escape_text(title)));
        }
        if let Some(email) = fields.value(FieldName::Email) {
            lines.push(format!("EMAIL:{}", fold_line_breaks(email)));
        }
        if let Some(phone) = fields.value(FieldName::Phone) {
            let prop = match variant {
                Variant::Compact => "TEL",
                Variant::Full => "TEL;TYPE=WORK",
            };
            lines.push(format!("{prop}:{}", fold_line_breaks(phone)));
        }
        if variant == Variant::Full {
            if let Some(cell) = fields.value(FieldName::PhoneSecondary) {
                lines.push(format!("TEL;TYPE=CELL:{}", fold_line_breaks(cell)));
            }
            if let Some(adr) = fields.value(FieldName::Address).and_then(encode_address) {
                lines.push(format!("ADR;TYPE=WORK:;;{adr};;;;"));
            }
        }
        if let Some(url) = fields.value(FieldName::Website) {
            lines.push(format!("URL:{}", fold_line_breaks(url)));
        }

        lines.push(FOOTER.to_owned());
        Self { lines }
    }

    /// The record's lines, header and footer included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The record as newline-joined text.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Escape a TEXT value (RFC 6350 §3.4).
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Non-TEXT values are emitted verbatim, but may never start a new property line.
fn fold_line_breaks(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Address lines become `;`-separated components; blank lines are dropped.
fn encode_address(address: &str) -> Option<String> {
    let parts: Vec<String> = address
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(escape_text)
        .collect();
    (!parts.is_empty()).then(|| parts.join(";"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/vcard.rs"]
mod tests;
