use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::app::debounce::Debouncer;
use crate::app::validate::{VALIDATION_NOTICE, ValidationReport, validate};
use crate::export::pipeline::{ExportKind, Exporter};
use crate::export::sink::{Artifact, ArtifactSink};
use crate::foundation::error::CardResult;
use crate::model::fields::{CharCount, FieldModel, FieldName, StylePrefs, about_char_count};
use crate::model::image::{CardImages, DataUri, ImageSlot};
use crate::model::template::{Template, TemplateId, TemplateRegistry};
use crate::persist::snapshot::{PersistenceBridge, Snapshot};
use crate::persist::store::KeyValueStore;
use crate::qr::service::{QrImage, QrService};
use crate::render::raster::{Rasterizer, SvgRasterizer};
use crate::render::svg::face_svg;
use crate::render::view::{CardInput, CardView, Face, render_card};

/// Message shown when an image-based export fails.
pub const EXPORT_FAILED_NOTICE: &str = "Export failed. Please try again.";

/// What a [`Notice`] is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// An upload was rejected.
    Upload,
    /// An export failed.
    Export,
    /// Form validation failed.
    Validation,
}

/// A blocking, user-visible message. Never fatal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Category.
    pub kind: NoticeKind,
    /// Text to show.
    pub message: String,
}

/// Counters for committed render and persist cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CycleStats {
    /// View projections performed.
    pub renders: u64,
    /// Snapshot writes performed.
    pub persists: u64,
}

/// Owns the whole card state and routes user actions to the model, renderer, QR service,
/// persistence and exporter.
///
/// Every mutating method runs to completion before returning, and each either applies fully or
/// leaves the state untouched.
#[derive(Debug)]
pub struct Controller<S, R = SvgRasterizer> {
    fields: FieldModel,
    style: StylePrefs,
    registry: TemplateRegistry,
    images: CardImages,
    face: Face,
    qr: QrService,
    view: CardView,
    bridge: PersistenceBridge<S>,
    exporter: Exporter<R>,
    debounce: Debouncer,
    invalid: Vec<FieldName>,
    notices: Vec<Notice>,
    stats: CycleStats,
}

impl<S: KeyValueStore> Controller<S, SvgRasterizer> {
    /// Start a session over `store` using the system-font rasterizer.
    pub fn new(store: S) -> Self {
        Self::init(store, SvgRasterizer::new())
    }
}

impl<S: KeyValueStore, R: Rasterizer> Controller<S, R> {
    /// Start a session: load the saved snapshot (or the sample record), render, generate the QR.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn init(store: S, rasterizer: R) -> Self {
        let registry = TemplateRegistry::default();
        let style = StylePrefs::new(registry.active().accent);
        let fields = FieldModel::sample();
        let images = CardImages::default();
        let face = Face::Front;
        let view = render_card(&CardInput {
            fields: &fields,
            style: &style,
            template: registry.active_id(),
            images: &images,
            face,
            transition: registry.switch_count(),
        });

        let mut ctl = Self {
            fields,
            style,
            registry,
            images,
            face,
            qr: QrService::new(),
            view,
            bridge: PersistenceBridge::new(store),
            exporter: Exporter::new(rasterizer),
            debounce: Debouncer::default(),
            invalid: Vec::new(),
            notices: Vec::new(),
            stats: CycleStats::default(),
        };

        if let Some(snap) = ctl.bridge.load() {
            tracing::info!(template = ?snap.template, "restoring saved card");
            ctl.apply_snapshot(snap);
        }
        ctl.refresh();
        ctl
    }

    fn apply_snapshot(&mut self, snap: Snapshot) {
        self.fields = snap.fields;
        self.images = snap.images;
        if let Some(id) = snap.template {
            self.apply_template(id);
        }
        if let Some(font) = snap.font_family {
            self.style.set_font_family(&font);
        }
        if let Some(accent) = snap.accent {
            self.style.accent = accent;
        }
    }

    // ----- input -----

    /// Record a keystroke: the value changes now, the render + persist cycle is deferred until
    /// the input has been quiet for the debounce period.
    pub fn input(&mut self, field: FieldName, value: impl Into<String>, now: Instant) {
        self.fields.set(field, value);
        self.debounce.poke(now);
    }

    /// Advance time. Returns `true` if a deferred render + persist cycle ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debounce.poll(now) {
            return false;
        }
        self.commit();
        true
    }

    /// Run any deferred cycle immediately.
    pub fn flush(&mut self) -> bool {
        if !self.debounce.take() {
            return false;
        }
        self.commit();
        true
    }

    /// Whether a deferred cycle is waiting.
    pub fn is_input_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// When the deferred cycle will run, if any.
    pub fn input_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    // ----- style -----

    /// Switch template by identifier. Unknown identifiers are rejected without side effects.
    pub fn select_template(&mut self, id: &str) -> CardResult<()> {
        let id: TemplateId = id.parse()?;
        self.switch_template(id);
        Ok(())
    }

    /// Switch template: reset the accent to the template's, regenerate the QR, re-render, save.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn switch_template(&mut self, id: TemplateId) {
        self.apply_template(id);
        self.refresh();
        self.persist();
    }

    fn apply_template(&mut self, id: TemplateId) {
        let template = self.registry.select(id);
        self.style.accent = template.accent;
    }

    /// Change the card font. Blank input restores the default.
    pub fn set_font(&mut self, family: &str) {
        self.style.set_font_family(family);
        self.rerender();
        self.persist();
    }

    /// Override the accent colour (`#RRGGBB`). Invalid colours change nothing.
    pub fn set_accent(&mut self, color: &str) -> CardResult<()> {
        self.style.set_accent(color)?;
        self.refresh();
        self.persist();
        Ok(())
    }

    // ----- images -----

    /// Embed an uploaded image. Oversized or non-image files leave the card untouched.
    pub fn upload(&mut self, slot: ImageSlot, bytes: &[u8]) -> CardResult<()> {
        let uri = match DataUri::from_upload(slot, bytes) {
            Ok(uri) => uri,
            Err(err) => {
                tracing::warn!(?slot, bytes = bytes.len(), error = %err, "upload rejected");
                self.notify(NoticeKind::Upload, err.to_string());
                return Err(err);
            }
        };
        self.images.set(slot, Some(uri));
        self.rerender();
        self.persist();
        Ok(())
    }

    // ----- presentation -----

    /// Toggle the presented face.
    pub fn flip(&mut self) -> Face {
        self.face = self.face.flipped();
        self.rerender();
        self.face
    }

    /// Restore the sample record and default style, and forget the saved snapshot.
    pub fn reset(&mut self) -> CardResult<()> {
        self.debounce.take();
        self.fields = FieldModel::sample();
        self.images = CardImages::default();
        self.apply_template(TemplateId::default());
        self.style = StylePrefs::new(self.registry.active().accent);
        self.face = Face::Front;
        self.invalid.clear();
        self.refresh();
        self.bridge.clear()
    }

    /// Explicit submit: validate, mark invalid fields and raise a notice on failure.
    pub fn submit(&mut self) -> ValidationReport {
        let report = validate(&self.fields);
        self.invalid = report.invalid.clone();
        if !report.is_valid() {
            self.notify(NoticeKind::Validation, VALIDATION_NOTICE);
        }
        report
    }

    // ----- export -----

    /// Build an export artifact for the presented face.
    ///
    /// Pending keystrokes are committed first so the artifact matches the form. Failures raise
    /// a notice and leave the preview as it was.
    pub fn export(&mut self, kind: ExportKind) -> CardResult<Artifact> {
        self.flush();
        match self
            .exporter
            .export(kind, &self.view, self.qr.current(), &self.fields)
        {
            Ok(artifact) => {
                tracing::info!(%kind, file = %artifact.file_name, bytes = artifact.bytes.len(), "exported");
                Ok(artifact)
            }
            Err(err) => {
                tracing::error!(%kind, error = %err, "export failed");
                self.notify(NoticeKind::Export, EXPORT_FAILED_NOTICE);
                Err(err)
            }
        }
    }

    /// Export and hand the artifact to `sink`. Nothing reaches the sink on failure.
    pub fn export_to(
        &mut self,
        kind: ExportKind,
        sink: &mut dyn ArtifactSink,
    ) -> CardResult<Option<PathBuf>> {
        let artifact = self.export(kind)?;
        sink.deliver(&artifact).inspect_err(|err| {
            tracing::error!(%kind, error = %err, "delivering export failed");
            self.notify(NoticeKind::Export, EXPORT_FAILED_NOTICE);
        })
    }

    /// SVG document of the presented face.
    pub fn face_svg(&self) -> String {
        face_svg(&self.view, self.qr.current())
    }

    // ----- accessors -----

    /// Current form values.
    pub fn fields(&self) -> &FieldModel {
        &self.fields
    }

    /// Current style preferences.
    pub fn style(&self) -> &StylePrefs {
        &self.style
    }

    /// Active template.
    pub fn template(&self) -> Template {
        self.registry.active()
    }

    /// Uploaded images.
    pub fn images(&self) -> &CardImages {
        &self.images
    }

    /// Presented face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Last committed view.
    pub fn view(&self) -> &CardView {
        &self.view
    }

    /// Latest QR image.
    pub fn qr(&self) -> Option<&QrImage> {
        self.qr.current()
    }

    /// Fields marked invalid by the last submit.
    pub fn invalid_fields(&self) -> &[FieldName] {
        &self.invalid
    }

    /// Counter for the "about" input.
    pub fn about_count(&self) -> CharCount {
        about_char_count(self.fields.raw(FieldName::About))
    }

    /// Notices raised so far and not yet taken.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain raised notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Render / persist counters.
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Borrow the snapshot store.
    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    /// The snapshot that would be persisted right now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            fields: self.fields.clone(),
            template: Some(self.registry.active_id()),
            accent: Some(self.style.accent),
            font_family: Some(self.style.font_family.clone()),
            images: self.images.clone(),
        }
    }

    // ----- internals -----

    fn commit(&mut self) {
        self.refresh();
        self.persist();
    }

    fn refresh(&mut self) {
        // Failures are logged by the service and the previous image stays up.
        let _ = self.qr.refresh(&self.fields, &self.registry.active());
        self.rerender();
    }

    fn rerender(&mut self) {
        self.view = render_card(&CardInput {
            fields: &self.fields,
            style: &self.style,
            template: self.registry.active_id(),
            images: &self.images,
            face: self.face,
            transition: self.registry.switch_count(),
        });
        self.stats.renders += 1;
    }

    fn persist(&mut self) {
        match self.bridge.save(&self.snapshot()) {
            Ok(()) => self.stats.persists += 1,
            Err(err) => tracing::warn!(error = %err, "failed to save card data"),
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            message: message.into(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/controller.rs"]
mod tests;
