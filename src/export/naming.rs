/// Stem used when the name field is blank.
pub const FALLBACK_STEM: &str = "business_card";

/// File-name stem derived from the card holder's name.
///
/// Lowercased, whitespace runs become `_`, and anything outside `[a-z0-9_]` is dropped. Names
/// with nothing left to keep use [`FALLBACK_STEM`].
pub fn file_stem(name: &str) -> String {
    let name = name.trim();
    let source = if name.is_empty() { FALLBACK_STEM } else { name };

    let mut out = String::with_capacity(source.len());
    let mut in_space = false;
    for c in source.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            out.push(c);
        }
    }
    if !out.chars().any(|c| c.is_ascii_alphanumeric()) {
        return FALLBACK_STEM.to_owned();
    }
    out
}

/// `<stem>_business_card.png`
pub fn png_file_name(name: &str) -> String {
    format!("{}_business_card.png", file_stem(name))
}

/// `<stem>_business_card.pdf`
pub fn pdf_file_name(name: &str) -> String {
    format!("{}_business_card.pdf", file_stem(name))
}

/// `<stem>_contact.vcf`
pub fn vcf_file_name(name: &str) -> String {
    format!("{}_contact.vcf", file_stem(name))
}

#[cfg(test)]
#[path = "../../tests/unit/export/naming.rs"]
mod tests;
