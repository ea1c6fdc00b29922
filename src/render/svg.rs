//! SVG document for one card face.
//!
//! The layout is fixed at 350×200 user units (a 3.5in × 2in card at 100 units per inch). All
//! text goes through [`escape_xml`]; images are embedded as the data URIs stored on the view.

use crate::foundation::color::Color;
use crate::model::template::{Background, Template};
use crate::qr::service::QrImage;
use crate::render::view::{CardView, Face};

/// Card width in SVG user units (and in pixels at 1×).
pub const CARD_WIDTH: u32 = 350;
/// Card height in SVG user units (and in pixels at 1×).
pub const CARD_HEIGHT: u32 = 200;

const PAD: f32 = 18.0;
const QR_SIZE: f32 = 64.0;
const ABOUT_WRAP_CHARS: usize = 62;
const ABOUT_MAX_LINES: usize = 3;

/// Build the SVG document for the face selected on `view`.
pub fn face_svg(view: &CardView, qr: Option<&QrImage>) -> String {
    let template = Template::get(view.template);
    let mut out = String::with_capacity(4096);

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}">"#
    ));
    push_background(&mut out, &template.background);
    out.push_str(&format!(
        r#"<rect x="0" y="0" width="6" height="{CARD_HEIGHT}" fill="{}"/>"#,
        view.accent
    ));
    out.push_str(&format!(
        r#"<g font-family="{}">"#,
        escape_xml(&view.font_family)
    ));

    match view.face {
        Face::Front => push_front(&mut out, view, &template),
        Face::Back => push_back(&mut out, view, &template),
    }
    if let Some(qr) = qr {
        push_qr(
            &mut out,
            qr,
            CARD_WIDTH as f32 - PAD - QR_SIZE,
            CARD_HEIGHT as f32 - PAD - QR_SIZE,
        );
    }

    out.push_str("</g></svg>");
    out
}

fn push_background(out: &mut String, bg: &Background) {
    match bg {
        Background::Solid(c) => out.push_str(&format!(
            r#"<rect x="0" y="0" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" fill="{c}"/>"#
        )),
        Background::LinearGradient { angle_deg, stops } => {
            // CSS angles run clockwise from "to top"; map onto the bounding box.
            let rad = angle_deg.to_radians();
            let (dx, dy) = (rad.sin() / 2.0, -rad.cos() / 2.0);
            out.push_str(&format!(
                r#"<defs><linearGradient id="card-bg" x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}">"#,
                0.5 - dx,
                0.5 - dy,
                0.5 + dx,
                0.5 + dy
            ));
            for stop in stops {
                out.push_str(&format!(
                    r#"<stop offset="{:.3}" stop-color="{}"/>"#,
                    stop.offset,
                    stop.color.to_css()
                ));
            }
            out.push_str("</linearGradient></defs>");
            out.push_str(&format!(
                r#"<rect x="0" y="0" width="{CARD_WIDTH}" height="{CARD_HEIGHT}" fill="url(#card-bg)"/>"#
            ));
        }
    }
}

fn push_front(out: &mut String, view: &CardView, t: &Template) {
    let avatar = 56.0;
    let (ax, ay) = (PAD + 4.0, PAD);
    let (cx, cy, r) = (ax + avatar / 2.0, ay + avatar / 2.0, avatar / 2.0);
    match &view.profile_image {
        Some(uri) => {
            out.push_str(&format!(
                r#"<defs><clipPath id="avatar"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath></defs>"#
            ));
            out.push_str(&format!(
                r#"<image x="{ax}" y="{ay}" width="{avatar}" height="{avatar}" preserveAspectRatio="xMidYMid slice" clip-path="url(#avatar)" xlink:href="{}"/>"#,
                escape_xml(uri)
            ));
        }
        None => {
            out.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
                view.accent
            ));
            let initials = view.initials();
            if !initials.is_empty() {
                push_text(
                    out,
                    cx,
                    cy + 7.0,
                    20.0,
                    Color::WHITE,
                    r#"font-weight="bold" text-anchor="middle""#,
                    &initials,
                );
            }
        }
    }

    if let Some(uri) = &view.logo {
        out.push_str(&format!(
            r#"<image x="{}" y="{PAD}" width="44" height="44" preserveAspectRatio="xMidYMid meet" xlink:href="{}"/>"#,
            CARD_WIDTH as f32 - PAD - 44.0,
            escape_xml(uri)
        ));
    }

    let x = ax + avatar + 14.0;
    let mut y = PAD + 16.0;
    if let Some(name) = &view.name {
        push_text(out, x, y, 17.0, t.primary, r#"font-weight="bold""#, name);
        y += 17.0;
    }
    if let Some(title) = &view.title {
        push_text(out, x, y, 10.5, t.secondary, "", title);
        y += 14.0;
    }
    if let Some(company) = &view.company {
        push_text(out, x, y, 10.5, t.text, r#"font-weight="bold""#, company);
        y += 13.0;
    }
    if let Some(dept) = &view.department {
        push_text(out, x, y, 9.0, t.text, "", dept);
    }

    let mut y = 122.0;
    let contacts = [
        ("✉", &view.email),
        ("☎", &view.phone),
        ("☏", &view.phone_secondary),
        ("⌂", &view.website),
    ];
    for (icon, value) in contacts {
        let Some(value) = value else { continue };
        push_text(out, PAD + 4.0, y, 9.0, view.accent, "", icon);
        push_text(out, PAD + 18.0, y, 9.0, t.text, "", value);
        y += 14.0;
    }
}

fn push_back(out: &mut String, view: &CardView, t: &Template) {
    let x = PAD + 4.0;
    let mut y = PAD + 10.0;

    if let Some(about) = &view.about {
        for line in wrap_words(about, ABOUT_WRAP_CHARS, ABOUT_MAX_LINES) {
            push_text(out, x, y, 9.0, t.text, "", &line);
            y += 12.0;
        }
        y += 4.0;
    }

    if !view.skills.is_empty() {
        let max_x = CARD_WIDTH as f32 - PAD;
        let (tag_h, font) = (14.0, 8.0);
        let mut tx = x;
        for skill in &view.skills {
            let w = skill.chars().count() as f32 * font * 0.58 + 12.0;
            if tx + w > max_x && tx > x {
                tx = x;
                y += tag_h + 4.0;
            }
            out.push_str(&format!(
                r#"<rect x="{tx:.1}" y="{:.1}" width="{w:.1}" height="{tag_h}" rx="7" fill="{}"/>"#,
                y - 10.0,
                view.accent
            ));
            push_text(
                out,
                tx + w / 2.0,
                y,
                font,
                Color::WHITE,
                r#"text-anchor="middle""#,
                skill,
            );
            tx += w + 5.0;
        }
        y += tag_h + 6.0;
    }

    for line in &view.address {
        push_text(out, x, y, 8.5, t.secondary, "", line);
        y += 11.0;
    }

    let mut y = y.max(130.0);
    for link in &view.socials {
        let label = link
            .url
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        push_text(out, x, y, 8.0, t.primary, "", label);
        y += 11.0;
    }
}

fn push_qr(out: &mut String, qr: &QrImage, x: f32, y: f32) {
    let colors = qr.colors();
    let n = qr.width();
    // One module of quiet zone on each side.
    let module = QR_SIZE / (n as f32 + 2.0);
    out.push_str(&format!(
        r#"<rect x="{x:.2}" y="{y:.2}" width="{QR_SIZE}" height="{QR_SIZE}" fill="{}"/>"#,
        colors.light
    ));

    let mut d = String::new();
    for row in 0..n {
        for col in 0..n {
            if qr.is_dark(col, row) {
                d.push_str(&format!("M{} {}h1v1h-1z", col + 1, row + 1));
            }
        }
    }
    out.push_str(&format!(
        r#"<path transform="translate({x:.2} {y:.2}) scale({module:.4})" fill="{}" d="{d}"/>"#,
        colors.dark
    ));
}

fn push_text(out: &mut String, x: f32, y: f32, size: f32, fill: Color, extra: &str, text: &str) {
    out.push_str(&format!(
        r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" fill="{fill}" {extra}>{}</text>"#,
        escape_xml(text)
    ));
}

/// Greedy word wrap; the last line gets an ellipsis when text is cut.
fn wrap_words(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}

/// Escape text for use in SVG element content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
