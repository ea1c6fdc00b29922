use serde_json::{Map, Value};

use crate::foundation::color::Color;
use crate::foundation::error::{CardError, CardResult};
use crate::model::fields::{FieldModel, FieldName};
use crate::model::image::{CardImages, DataUri, ImageSlot};
use crate::model::template::TemplateId;
use crate::persist::store::KeyValueStore;

/// Well-known key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "businessCardData";

const KEY_TEMPLATE: &str = "template";
const KEY_ACCENT: &str = "accentColor";
const KEY_FONT: &str = "fontFamily";

/// Flat, persisted form of the whole card state.
///
/// Serialized as one JSON object: every field key, plus `template`, `accentColor`, `fontFamily`,
/// `profileImageSrc` and `companyLogoSrc`. There is no schema version; reading is lenient per key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Form values.
    pub fields: FieldModel,
    /// Selected template, if a known one was stored.
    pub template: Option<TemplateId>,
    /// Accent colour, if a valid one was stored.
    pub accent: Option<Color>,
    /// Font family, if a non-empty one was stored.
    pub font_family: Option<String>,
    /// Uploaded images (only `data:` URIs survive a load).
    pub images: CardImages,
}

impl Snapshot {
    /// Serialize to the flat JSON object.
    pub fn to_json(&self) -> CardResult<String> {
        let mut obj = Map::new();
        for field in FieldName::ALL {
            obj.insert(
                field.key().to_owned(),
                Value::String(self.fields.raw(field).to_owned()),
            );
        }
        let string = |s: Option<String>| Value::String(s.unwrap_or_default());
        obj.insert(
            KEY_TEMPLATE.to_owned(),
            string(self.template.map(|t| t.as_str().to_owned())),
        );
        obj.insert(KEY_ACCENT.to_owned(), string(self.accent.map(Color::to_css)));
        obj.insert(KEY_FONT.to_owned(), string(self.font_family.clone()));
        for slot in [ImageSlot::Profile, ImageSlot::Logo] {
            obj.insert(
                slot.snapshot_key().to_owned(),
                string(self.images.get(slot).map(|u| u.as_str().to_owned())),
            );
        }
        serde_json::to_string(&Value::Object(obj)).map_err(|e| CardError::serde(e.to_string()))
    }

    /// Parse the flat JSON object.
    ///
    /// Only a non-object document is an error. Individual keys that are missing, not strings, or
    /// hold unusable values are skipped.
    pub fn from_json(s: &str) -> CardResult<Self> {
        let value: Value = serde_json::from_str(s).map_err(|e| CardError::serde(e.to_string()))?;
        let Value::Object(obj) = value else {
            return Err(CardError::serde("snapshot is not a JSON object"));
        };
        let get = |key: &str| obj.get(key).and_then(Value::as_str);

        let mut snap = Snapshot::default();
        for field in FieldName::ALL {
            if let Some(v) = get(field.key()) {
                snap.fields.set(field, v);
            }
        }
        snap.template = get(KEY_TEMPLATE).and_then(|t| t.parse().ok());
        snap.accent = get(KEY_ACCENT).and_then(|c| Color::parse_hex(c).ok());
        snap.font_family = get(KEY_FONT)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_owned);
        for slot in [ImageSlot::Profile, ImageSlot::Logo] {
            snap.images
                .set(slot, get(slot.snapshot_key()).and_then(DataUri::parse));
        }
        Ok(snap)
    }
}

/// Reads and writes the [`Snapshot`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct PersistenceBridge<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    /// Bridge over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored snapshot.
    pub fn save(&mut self, snap: &Snapshot) -> CardResult<()> {
        let json = snap.to_json()?;
        self.store.set(SNAPSHOT_KEY, &json)?;
        tracing::trace!(bytes = json.len(), "snapshot saved");
        Ok(())
    }

    /// Load the stored snapshot.
    ///
    /// Missing data yields `None`. Unreadable or malformed data is logged and also yields `None`,
    /// so startup falls back to the sample record.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read saved card data");
                return None;
            }
        };
        match Snapshot::from_json(&raw) {
            Ok(snap) => Some(snap),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved card data");
                None
            }
        }
    }

    /// Delete the stored snapshot.
    pub fn clear(&mut self) -> CardResult<()> {
        self.store.remove(SNAPSHOT_KEY)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/snapshot.rs"]
mod tests;
