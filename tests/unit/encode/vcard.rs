use super::*;

fn full_model() -> FieldModel {
    let mut m = FieldModel::empty();
    m.set(FieldName::FullName, "Alex Johnson");
    m.set(FieldName::Company, "TechCorp Solutions");
    m.set(FieldName::JobTitle, "Senior Software Engineer");
    m.set(FieldName::Email, "alex.johnson@techcorp.com");
    m.set(FieldName::Phone, "+1 (555) 123-4567");
    m.set(FieldName::PhoneSecondary, "+1 (555) 987-6543");
    m.set(FieldName::Website, "www.alexjohnson.dev");
    m.set(FieldName::Address, "123 Main St\nSpringfield\n");
    m
}

#[test]
fn compact_omits_secondary_phone_and_address() {
    let rec = ContactRecord::encode(&full_model(), Variant::Compact);
    assert_eq!(
        rec.lines(),
        [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "FN:Alex Johnson",
            "ORG:TechCorp Solutions",
            "TITLE:Senior Software Engineer",
            "EMAIL:alex.johnson@techcorp.com",
            "TEL:+1 (555) 123-4567",
            "URL:www.alexjohnson.dev",
            "END:VCARD",
        ]
    );
}

#[test]
fn full_includes_tagged_phones_and_address() {
    let rec = ContactRecord::encode(&full_model(), Variant::Full);
    assert_eq!(
        rec.lines(),
        [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "FN:Alex Johnson",
            "ORG:TechCorp Solutions",
            "TITLE:Senior Software Engineer",
            "EMAIL:alex.johnson@techcorp.com",
            "TEL;TYPE=WORK:+1 (555) 123-4567",
            "TEL;TYPE=CELL:+1 (555) 987-6543",
            "ADR;TYPE=WORK:;;123 Main St;Springfield;;;;",
            "URL:www.alexjohnson.dev",
            "END:VCARD",
        ]
    );
}

#[test]
fn empty_model_has_only_header_and_footer() {
    for variant in [Variant::Compact, Variant::Full] {
        let rec = ContactRecord::encode(&FieldModel::empty(), variant);
        assert_eq!(rec.to_text(), "BEGIN:VCARD\nVERSION:3.0\nEND:VCARD");
    }
}

#[test]
fn blank_fields_contribute_no_line() {
    let mut m = full_model();
    m.set(FieldName::JobTitle, "   ");
    m.set(FieldName::Address, "\n  \n");
    let rec = ContactRecord::encode(&m, Variant::Full);
    assert!(!rec.lines().iter().any(|l| l.starts_with("TITLE")));
    assert!(!rec.lines().iter().any(|l| l.starts_with("ADR")));
}

#[test]
fn separators_inside_text_values_are_escaped() {
    let mut m = FieldModel::empty();
    m.set(FieldName::FullName, "Doe, Jane");
    m.set(FieldName::Company, "Acme; Inc\\Labs");
    m.set(FieldName::JobTitle, "Lead\nEngineer");
    m.set(FieldName::Address, "Suite 5, Floor 2\r\nBerlin");
    let rec = ContactRecord::encode(&m, Variant::Full);
    let text = rec.to_text();
    assert!(text.contains("FN:Doe\\, Jane\n"));
    assert!(text.contains("ORG:Acme\\; Inc\\\\Labs\n"));
    assert!(text.contains("TITLE:Lead\\nEngineer\n"));
    assert!(text.contains("ADR;TYPE=WORK:;;Suite 5\\, Floor 2;Berlin;;;;\n"));
}

#[test]
fn non_text_values_cannot_inject_properties() {
    let mut m = FieldModel::empty();
    m.set(FieldName::Email, "a@b.co\nNOTE:injected");
    let rec = ContactRecord::encode(&m, Variant::Compact);
    assert!(rec.lines().contains(&"EMAIL:a@b.co NOTE:injected".to_owned()));
    assert_eq!(rec.lines().len(), 4);

    m.set(FieldName::Email, "a@b.co\rNOTE:x");
    m.set(FieldName::Phone, "+1 555\r\nTEL:2");
    let rec = ContactRecord::encode(&m, Variant::Full);
    assert!(rec.lines().contains(&"EMAIL:a@b.co NOTE:x".to_owned()));
    assert!(rec.lines().contains(&"TEL;TYPE=WORK:+1 555 TEL:2".to_owned()));
    assert!(rec.lines().iter().all(|l| !l.contains('\r')));
}
