//! Directive text handed to the image generator: the per-image instructions
//! and the prompt line builder.

use crate::selection::{LogoPlacement, LogoShape, LugeFinish, LugeKind, LugeTopper, ThreeDLogoStyle};

pub const DEFAULT_PROMPT: &str = "Create an ice sculpture render";

const NO_BRANDING: &str = "Ignore any logo, text or branding visible in this photo and treat it as shape reference only; \
the real logo is supplied as a separate image and must not be duplicated or invented.";

/// Ordered prompt lines, joined with `\n`. Anything pushed is split at
/// newlines so the joined prompt re-splits into exactly these lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptLines {
    lines: Vec<String>,
}

impl PromptLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.lines.extend(line.split('\n').map(str::to_string));
    }

    /// Free text is kept verbatim. Blank input adds nothing.
    pub fn push_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.push(text);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            self.lines.join("\n")
        }
    }
}

pub fn subject(name: &str, logo_present: bool) -> String {
    let mut s = format!(
        "Main sculpture design reference ({name}). Reproduce this shape carved in clear ice."
    );
    if logo_present {
        s.push(' ');
        s.push_str(NO_BRANDING);
    }
    s
}

pub fn luge_subject(kind: LugeKind, name: &str, logo_present: bool) -> String {
    let mut s = format!(
        "Luge reference ({name}, {} luge). Keep the luge body, channel and ice block proportions exactly as shown.",
        kind.label()
    );
    if logo_present {
        s.push(' ');
        s.push_str(NO_BRANDING);
    }
    s
}

pub fn cube_subject(name: &str) -> String {
    format!(
        "Ice cube style reference ({name}). Match the cube shape and the embedding effect shown. \
Do not copy any logo that appears in this photo."
    )
}

pub fn standard_base(name: &str, logo_present: bool) -> String {
    let mut s = format!(
        "Showpiece base ({name}). This is the primary shape of the standard showpiece; carve it in clear ice."
    );
    if logo_present {
        s.push(' ');
        s.push_str(NO_BRANDING);
    }
    s
}

pub fn extra_base(name: &str) -> String {
    format!("Base design ({name}). Place the sculpture on an ice base shaped like this.")
}

pub fn extra_topper(name: &str) -> String {
    format!("Topper design ({name}). Carve this piece on top of the sculpture.")
}

pub fn luge_topper(topper: &LugeTopper) -> String {
    match topper {
        LugeTopper::Custom { .. } => {
            "Custom luge topper. Carve this uploaded design as the piece on top of the luge.".to_string()
        }
        LugeTopper::Round | LugeTopper::Crown => format!(
            "Luge topper reference: {}. Use this exact topper shape on top of the luge.",
            topper.describe()
        ),
    }
}

// Logo instructions

pub fn cube_logo() -> String {
    "Logo to embed in the ice cube. Use this exact logo, do not invent another one or alter its colours, letters or proportions."
        .to_string()
}

pub fn showpiece_logo(style: ThreeDLogoStyle) -> String {
    match style {
        ThreeDLogoStyle::Paper => "Logo for the showpiece. Print this exact logo on a paper card frozen inside the ice, \
facing the viewer, colours preserved. Do not invent another logo."
            .to_string(),
        ThreeDLogoStyle::Snowfilled => "Logo for the showpiece. Carve this exact logo into the ice and fill the carving with white snow \
(snowfilled, monochrome). Do not invent another logo."
            .to_string(),
    }
}

pub fn standard_logo(shape: LogoShape) -> String {
    format!(
        "Add-on logo for the showpiece. Print this exact logo on a {} paper card frozen into an ice add-on block. \
Do not invent another logo.",
        shape.describe()
    )
}

pub fn luge_logo(placement: LogoPlacement, finish: Option<LugeFinish>, addon_shape: Option<LogoShape>) -> String {
    let mut s = format!(
        "Logo for the luge. Use this exact logo, placed on the {}.",
        placement.describe()
    );
    if placement.has_addon() {
        if let Some(shape) = addon_shape {
            s.push_str(&format!(" The add-on block is {}.", shape.describe()));
        }
    }
    match finish {
        Some(f) if f.uses_paper() && f.uses_snow() => s.push_str(
            " Render it as a printed paper label frozen into the ice, outlined by a carved snowfilled border.",
        ),
        Some(f) if f.uses_snow() => {
            s.push_str(" Carve the logo into the ice and fill it with white snow (snowfilled overlay).")
        }
        Some(f) if f.uses_paper() => {
            s.push_str(" Render it as a printed paper label frozen into the ice (paper overlay), colours preserved.")
        }
        Some(_) => s.push_str(" Engrave it lightly into clear ice with no fill."),
        None => {}
    }
    s.push_str(" Do not invent or duplicate any other logo.");
    s
}

pub fn generic_logo() -> String {
    "Logo to include. Embed this exact logo into the sculpture; do not invent another one.".to_string()
}

pub fn reference(notes: &str) -> String {
    if notes.trim().is_empty() {
        "Additional reference image. Use it for style and detail only.".to_string()
    } else {
        format!("Additional reference image. Use it for style and detail only. Notes: {}", notes.trim())
    }
}

pub fn chat_attachment() -> String {
    "Image attached by the user in chat. Use it as supporting reference.".to_string()
}
