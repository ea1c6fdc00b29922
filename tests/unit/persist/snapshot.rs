use super::*;
use crate::persist::store::MemoryStore;

fn populated() -> Snapshot {
    let mut fields = FieldModel::sample();
    fields.set(FieldName::Address, "1 Main St\nSpringfield");
    fields.set(FieldName::Twitter, "@jdoe");
    Snapshot {
        fields,
        template: Some(TemplateId::Creative),
        accent: Some(Color::rgb(0xa8, 0x55, 0xf7)),
        font_family: Some("Georgia, serif".to_owned()),
        images: CardImages {
            profile: DataUri::parse("data:image/png;base64,AAAA"),
            logo: None,
        },
    }
}

#[test]
fn json_is_a_flat_object_with_well_known_keys() {
    let json = populated().to_json().unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();
    let obj = v.as_object().unwrap();
    for key in [
        "fullName",
        "email",
        "address",
        "template",
        "accentColor",
        "fontFamily",
        "profileImageSrc",
        "companyLogoSrc",
    ] {
        assert!(obj.get(key).unwrap().is_string(), "{key}");
    }
    assert_eq!(obj["template"], "creative");
    assert_eq!(obj["accentColor"], "#a855f7");
    assert_eq!(obj["companyLogoSrc"], "");
}

#[test]
fn round_trip_through_bridge() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());
    assert_eq!(bridge.load(), None);

    let snap = populated();
    bridge.save(&snap).unwrap();
    let fresh = PersistenceBridge::new(bridge.store().clone());
    assert_eq!(fresh.load(), Some(snap));
}

#[test]
fn lenient_per_key() {
    let snap = Snapshot::from_json(
        r#"{"fullName": 42, "email": "a@b.co", "template": "retro", "accentColor": "blue",
            "fontFamily": "  ", "profileImageSrc": "https://example.com/me.png", "extra": true}"#,
    )
    .unwrap();
    assert_eq!(snap.fields.value(FieldName::FullName), None);
    assert_eq!(snap.fields.value(FieldName::Email), Some("a@b.co"));
    assert_eq!(snap.template, None);
    assert_eq!(snap.accent, None);
    assert_eq!(snap.font_family, None);
    assert_eq!(snap.images.profile, None);
}

#[test]
fn malformed_data_is_ignored() {
    for raw in ["{not json", "[1,2,3]", "\"text\""] {
        let mut store = MemoryStore::new();
        store.set(SNAPSHOT_KEY, raw).unwrap();
        assert_eq!(PersistenceBridge::new(store).load(), None, "{raw}");
    }
}

#[test]
fn clear_removes_the_key() {
    let mut bridge = PersistenceBridge::new(MemoryStore::new());
    bridge.save(&populated()).unwrap();
    bridge.clear().unwrap();
    assert_eq!(bridge.load(), None);
}
