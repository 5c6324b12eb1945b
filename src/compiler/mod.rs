//! Selection-to-payload compiler.
//!
//! `plan` is pure: it walks a `SelectionState` and yields the ordered
//! attachments (some still remote) and the prompt lines. `CompilePlan::resolve`
//! fetches the remote attachments through a `FileResolver` and numbers the
//! survivors. `compile` does both.

use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::catalog::TopperAssets;
use crate::payload::CompiledPayload;
use crate::prompt::{self, PromptLines};
use crate::resolver::FileResolver;
use crate::selection::{FileHandle, LugeTopper, SelectionState, Slot};

pub mod branch;

pub use branch::Branch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Subject,
    Base,
    Topper,
    LugeTopper,
    Logo,
    Reference,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Ready(FileHandle),
    Remote { url: String, filename: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub role: Role,
    pub source: Source,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilePlan {
    pub attachments: Vec<Attachment>,
    pub lines: PromptLines,
}

impl CompilePlan {
    pub fn prompt(&self) -> String {
        self.lines.render()
    }

    /// Fetch remote attachments and number what survives. A failed or empty
    /// fetch drops only that attachment; indices stay contiguous.
    pub async fn resolve(self, resolver: &dyn FileResolver) -> CompiledPayload {
        let prompt = self.lines.render();
        let fetched = join_all(self.attachments.into_iter().map(|a| async move {
            let file = match a.source {
                Source::Ready(file) => Some(file),
                Source::Remote { url, filename } => match resolver.fetch_as_file(&url, &filename).await {
                    Ok(Some(file)) => Some(file),
                    Ok(None) => {
                        warn!(%url, role = ?a.role, "template image unavailable, dropping attachment");
                        None
                    }
                    Err(e) => {
                        warn!(%url, role = ?a.role, error = %e, "template image fetch failed, dropping attachment");
                        None
                    }
                },
            };
            file.map(|f| (f, a.instruction))
        }))
        .await;

        let mut files = Vec::new();
        let mut instructions = BTreeMap::new();
        for (file, instruction) in fetched.into_iter().flatten() {
            instructions.insert(files.len(), instruction);
            files.push(file);
        }
        debug!(files = files.len(), "compiled payload");

        CompiledPayload { files, instructions, prompt }
    }
}

pub async fn compile(
    sel: &SelectionState,
    assets: &TopperAssets,
    resolver: &dyn FileResolver,
) -> CompiledPayload {
    plan(sel, assets).resolve(resolver).await
}

fn source_of(slot: Slot<'_>) -> Source {
    match slot {
        Slot::Upload(f) => Source::Ready(f.clone()),
        Slot::Template(t) => Source::Remote { url: t.image_url.clone(), filename: t.filename() },
    }
}

pub fn plan(sel: &SelectionState, assets: &TopperAssets) -> CompilePlan {
    let branch = Branch::of(sel);
    let logo = branch.logo(sel);
    let has_logo = logo.is_some();
    debug!(?branch, has_logo, "planning compile");

    let mut attachments = Vec::new();
    let mut push = |role: Role, source: Source, instruction: String| {
        attachments.push(Attachment { role, source, instruction });
    };

    // Primary image. Standard showpieces use their base here instead.
    match branch {
        Branch::Standard(opts) => {
            if let Some(base) = opts.base.effective() {
                push(Role::Base, source_of(base), prompt::standard_base(&base.display_name(), has_logo));
            }
        }
        _ => {
            if let Some(subject) = sel.subject.effective() {
                let name = subject.display_name();
                let instruction = match branch {
                    Branch::Luge { kind, .. } => prompt::luge_subject(kind, &name, has_logo),
                    Branch::IceCube => prompt::cube_subject(&name),
                    _ => prompt::subject(&name, has_logo),
                };
                push(Role::Subject, source_of(subject), instruction);
            }
        }
    }

    let standard = matches!(branch, Branch::Standard(_));
    if !standard && sel.extras.want_base {
        if let Some(base) = sel.extras.base.effective() {
            push(Role::Base, source_of(base), prompt::extra_base(&base.display_name()));
        }
    }
    if sel.extras.want_topper {
        if let Some(topper) = sel.extras.topper.effective() {
            push(Role::Topper, source_of(topper), prompt::extra_topper(&topper.display_name()));
        }
    }

    if let Branch::Luge { options, .. } = branch {
        match &options.topper {
            Some(topper @ LugeTopper::Custom { file: Some(file) }) => {
                push(Role::LugeTopper, Source::Ready(file.clone()), prompt::luge_topper(topper));
            }
            Some(topper) => {
                if let Some(asset) = assets.for_topper(topper) {
                    push(
                        Role::LugeTopper,
                        Source::Remote { url: asset.url.to_string(), filename: asset.filename.to_string() },
                        prompt::luge_topper(topper),
                    );
                }
            }
            None => {}
        }
    }

    if let Some((file, instruction)) = logo {
        push(Role::Logo, Source::Ready(file.clone()), instruction);
    }

    for file in sel.references.files() {
        push(Role::Reference, Source::Ready(file.clone()), prompt::reference(&sel.references.notes));
    }
    for file in &sel.chat_attachments {
        push(Role::Chat, Source::Ready(file.clone()), prompt::chat_attachment());
    }

    CompilePlan { attachments, lines: prompt_lines(sel, branch) }
}

fn prompt_lines(sel: &SelectionState, branch: Branch<'_>) -> PromptLines {
    let mut lines = PromptLines::new();

    if let Some(label) = sel.category.label() {
        lines.push(format!("Sculpture category: {label}"));
    }
    let subject = sel.subject.effective();
    if let Some(subject) = subject {
        lines.push(format!("Sculpture design: {}", subject.display_name()));
    }

    match branch {
        Branch::Standard(opts) => {
            if let Some(base) = opts.base.effective() {
                lines.push(format!("Base: {}", base.display_name()));
            }
            if let Some(shape) = opts.logo_shape {
                lines.push(format!("Add-on logo shape: {}", shape.describe()));
                if let Some(logo) = &sel.logo {
                    lines.push(format!("Logo file: {}", logo.name));
                }
            }
            if let Some(text) = opts.text {
                lines.push(format!("Text / content: {}", text.describe()));
                if !opts.engrave_text.trim().is_empty() {
                    lines.push_text(&format!("Text to engrave: \"{}\"", opts.engrave_text.trim()));
                }
            }
        }
        Branch::Showpiece(logo) => {
            if let (true, Some(style)) = (logo.want_logo, logo.style) {
                lines.push(format!("Logo style: {}", style.describe()));
                if let Some(file) = &sel.logo {
                    lines.push(format!("Logo file: {}", file.name));
                }
            }
        }
        Branch::IceCube => {
            if let Some(file) = &sel.logo {
                let effect = subject.map(|s| s.display_name()).unwrap_or_else(|| "selected".to_string());
                lines.push(format!(
                    "Logo embedding: embed the logo from \"{}\" inside the ice cube using the \"{effect}\" effect",
                    file.name
                ));
            }
        }
        Branch::Luge { options, .. } => {
            if let Some(placement) = options.logo_placement {
                lines.push(format!("Logo placement: {}", placement.describe()));
            }
            if let Some(finish) = options.finish {
                lines.push(format!("Ice finish: {}", finish.describe()));
            }
            if options.front_piece {
                let text = options.front_piece_text.trim();
                if text.is_empty() {
                    lines.push("Front piece: yes, no description");
                } else {
                    lines.push_text(&format!("Front piece: {text}"));
                }
            }
            if let Some(topper) = &options.topper {
                lines.push(format!("Topper style: {}", topper.describe()));
            }
            if let (Some(placement), Some(shape)) = (options.logo_placement, options.addon_shape) {
                if placement.has_addon() {
                    lines.push(format!("Add-on shape: {}", shape.describe()));
                }
            }
        }
        Branch::Generic => {
            let extras = &sel.extras;
            if extras.want_base {
                if let Some(base) = extras.base.effective() {
                    lines.push(format!("Include base: {}", base.display_name()));
                }
            }
            if extras.want_topper {
                if let Some(topper) = extras.topper.effective() {
                    lines.push(format!("Include topper: {}", topper.display_name()));
                }
            }
            if extras.want_logo {
                if let Some(file) = &sel.logo {
                    lines.push(format!("Include logo: embed the uploaded logo ({})", file.name));
                }
            }
        }
    }

    let notes = sel.references.notes.trim();
    if !notes.is_empty() {
        lines.push_text(&format!("Reference notes: {notes}"));
    }
    lines.push_text(&sel.additional_prompt);

    lines
}
