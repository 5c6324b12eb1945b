//! Wizard selection state.
//!
//! One `SelectionState` value holds everything the user picked during a
//! wizard session. Category-specific choices live inside the matching
//! `CategoryChoice` variant, so switching category drops them.

use anyhow::{Context, Result};
use bytes::Bytes;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::SelectionError;

pub mod luge;
pub mod options;

pub use luge::LugeKind;
pub use options::{LogoPlacement, LogoShape, LugeFinish, LugeTopper, TextOption, ThreeDLogoStyle};

pub const MAX_REFERENCE_FILES: usize = 3;

/// An in-memory file. Two handles are the same file when name, mime and
/// contents all match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime: String,
    /// Source on disk for selections loaded from a file; filled into `bytes`
    /// by `SelectionState::hydrate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip)]
    pub bytes: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self { name: name.into(), mime: mime.into(), path: None, bytes: bytes.into() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn hydrate(&mut self, base_dir: &Path) -> Result<(), SelectionError> {
        let Some(rel) = self.path.clone() else {
            return Ok(());
        };
        let abs = if rel.is_absolute() { rel.clone() } else { base_dir.join(&rel) };
        let data = fs::read(&abs).map_err(|source| SelectionError::Upload {
            path: abs.display().to_string(),
            source,
        })?;
        if self.name.is_empty() {
            self.name = rel
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        if self.mime.is_empty() {
            self.mime = mime_for(&self.name).to_string();
        }
        self.bytes = Bytes::from(data);
        Ok(())
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// A catalog image the backend already knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub image_url: String,
}

impl Template {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self { name: name.into(), image_url: image_url.into() }
    }

    /// Filename used when the template image is fetched as a file: the last
    /// path segment when it looks like a file, else a slug of the name.
    pub fn filename(&self) -> String {
        let last = Url::parse(&self.image_url).ok().and_then(|u| {
            u.path_segments()
                .and_then(|mut segs| segs.next_back())
                .filter(|seg| seg.contains('.'))
                .map(str::to_string)
        });
        last.unwrap_or_else(|| format!("{}.png", slug(&self.name)))
    }
}

fn slug(name: &str) -> String {
    let s: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let s = s.split('-').filter(|p| !p.is_empty()).collect::<Vec<_>>().join("-");
    if s.is_empty() { "template".into() } else { s }
}

/// The template-or-upload pair behind one wizard slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<FileHandle>,
}

/// What a slot resolves to after precedence is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Template(&'a Template),
    Upload(&'a FileHandle),
}

impl Slot<'_> {
    /// Name used in prompt lines and luge detection.
    pub fn display_name(&self) -> String {
        match self {
            Slot::Template(t) => t.name.clone(),
            Slot::Upload(f) => format!("custom upload ({})", f.name),
        }
    }

    pub fn match_name(&self) -> &str {
        match self {
            Slot::Template(t) => &t.name,
            Slot::Upload(f) => &f.name,
        }
    }
}

impl SlotPair {
    pub fn template(t: Template) -> Self {
        Self { template: Some(t), upload: None }
    }

    pub fn upload(f: FileHandle) -> Self {
        Self { template: None, upload: Some(f) }
    }

    pub fn select_template(&mut self, t: Template) {
        self.template = Some(t);
        self.upload = None;
    }

    pub fn select_upload(&mut self, f: FileHandle) {
        self.upload = Some(f);
        self.template = None;
    }

    pub fn clear(&mut self) {
        self.template = None;
        self.upload = None;
    }

    /// The custom upload wins if both halves are somehow set.
    pub fn effective(&self) -> Option<Slot<'_>> {
        match (&self.upload, &self.template) {
            (Some(f), _) => Some(Slot::Upload(f)),
            (None, Some(t)) => Some(Slot::Template(t)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LugeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_placement: Option<LogoPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<LugeFinish>,
    pub front_piece: bool,
    pub front_piece_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topper: Option<LugeTopper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addon_shape: Option<LogoShape>,
}

/// Logo options shared by 3D showpieces and seafood displays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowpieceLogo {
    pub want_logo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ThreeDLogoStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardOptions {
    /// Standard showpieces use the base as their primary image.
    pub base: SlotPair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_shape: Option<LogoShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextOption>,
    pub engrave_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum CategoryChoice {
    #[serde(rename = "luges")]
    Luges(LugeOptions),
    #[serde(rename = "3d-showpiece")]
    ThreeDShowpiece(ShowpieceLogo),
    #[serde(rename = "standard-showpiece")]
    StandardShowpiece(StandardOptions),
    #[serde(rename = "seafood-display")]
    SeafoodDisplay(ShowpieceLogo),
    #[serde(rename = "ice-bars")]
    IceBars,
    #[serde(rename = "ice-cubes")]
    IceCubes,
    #[default]
    #[serde(rename = "none")]
    Unselected,
}

impl CategoryChoice {
    /// Label for the "Sculpture category:" prompt line.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            CategoryChoice::Luges(_) => Some("Luge"),
            CategoryChoice::ThreeDShowpiece(_) => Some("3D Showpiece"),
            CategoryChoice::StandardShowpiece(_) => Some("Standard Showpiece"),
            CategoryChoice::SeafoodDisplay(_) => Some("Seafood Display"),
            CategoryChoice::IceBars => Some("Ice Bar"),
            CategoryChoice::IceCubes => Some("Ice Cube"),
            CategoryChoice::Unselected => None,
        }
    }
}

/// Base/topper/logo toggles offered outside the special categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericExtras {
    pub want_base: bool,
    pub base: SlotPair,
    pub want_topper: bool,
    pub topper: SlotPair,
    pub want_logo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReferenceSetDoc")]
pub struct ReferenceSet {
    files: Vec<FileHandle>,
    pub notes: String,
}

#[derive(Deserialize)]
struct ReferenceSetDoc {
    #[serde(default)]
    files: Vec<FileHandle>,
    #[serde(default)]
    notes: String,
}

impl TryFrom<ReferenceSetDoc> for ReferenceSet {
    type Error = SelectionError;

    fn try_from(doc: ReferenceSetDoc) -> Result<Self, Self::Error> {
        if doc.files.len() > MAX_REFERENCE_FILES {
            return Err(SelectionError::TooManyReferences { max: MAX_REFERENCE_FILES });
        }
        Ok(Self { files: doc.files, notes: doc.notes })
    }
}

impl ReferenceSet {
    pub fn push(&mut self, file: FileHandle) -> Result<(), SelectionError> {
        if self.files.len() >= MAX_REFERENCE_FILES {
            return Err(SelectionError::TooManyReferences { max: MAX_REFERENCE_FILES });
        }
        self.files.push(file);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<FileHandle> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    pub category: CategoryChoice,
    pub subject: SlotPair,
    pub extras: GenericExtras,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<FileHandle>,
    pub references: ReferenceSet,
    pub additional_prompt: String,
    /// Files attached in the free-form chat box, outside the wizard.
    pub chat_attachments: Vec<FileHandle>,
}

impl SelectionState {
    /// Load a selection document (`.json`, `.yaml` or `.yml`) and read every
    /// upload it references, relative to the document's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let mut state: SelectionState = match ext.to_ascii_lowercase().as_str() {
            "json" => serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            other => return Err(SelectionError::Format(other.to_string()).into()),
        };
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        state.hydrate(base_dir)?;
        Ok(state)
    }

    pub fn hydrate(&mut self, base_dir: &Path) -> Result<(), SelectionError> {
        for file in self.uploads_mut() {
            file.hydrate(base_dir)?;
        }
        Ok(())
    }

    /// Switch category. Options belonging to the previous category are dropped.
    pub fn set_category(&mut self, category: CategoryChoice) {
        self.category = category;
    }

    /// Sub-type when the category is Luges and the subject name carries a
    /// known token.
    pub fn luge_kind(&self) -> Option<LugeKind> {
        match self.category {
            CategoryChoice::Luges(_) => {
                self.subject.effective().and_then(|s| LugeKind::detect(s.match_name()))
            }
            _ => None,
        }
    }

    fn uploads_mut(&mut self) -> Vec<&mut FileHandle> {
        let SelectionState { category, subject, extras, logo, references, chat_attachments, .. } = self;
        let mut out: Vec<&mut FileHandle> = Vec::new();
        out.extend(subject.upload.as_mut());
        out.extend(extras.base.upload.as_mut());
        out.extend(extras.topper.upload.as_mut());
        out.extend(logo.as_mut());
        match category {
            CategoryChoice::StandardShowpiece(opts) => out.extend(opts.base.upload.as_mut()),
            CategoryChoice::Luges(LugeOptions { topper: Some(LugeTopper::Custom { file }), .. }) => {
                out.extend(file.as_mut())
            }
            _ => {}
        }
        out.extend(references.files.iter_mut());
        out.extend(chat_attachments.iter_mut());
        out
    }
}
