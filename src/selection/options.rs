use serde::{Deserialize, Serialize};

use super::FileHandle;

/// Where the logo goes on a luge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPlacement {
    Top,
    Addon,
    Both,
}

impl LogoPlacement {
    pub fn describe(self) -> &'static str {
        match self {
            LogoPlacement::Top => "top surface",
            LogoPlacement::Addon => "side/front (add-on)",
            LogoPlacement::Both => "top surface AND side/front (add-on)",
        }
    }

    pub fn has_addon(self) -> bool {
        matches!(self, LogoPlacement::Addon | LogoPlacement::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LugeFinish {
    Clear,
    Snowfilled,
    Paper,
    PaperSnowfilled,
}

impl LugeFinish {
    pub fn describe(self) -> &'static str {
        match self {
            LugeFinish::Clear => "Clear (crystal-clear ice, no logo effect)",
            LugeFinish::Snowfilled => "Snowfilled (logo carved in and filled with frosted snow)",
            LugeFinish::Paper => "Paper (printed paper label frozen into the ice)",
            LugeFinish::PaperSnowfilled => {
                "Paper + Snowfilled (paper label combined with snofilled effect)"
            }
        }
    }

    pub fn uses_paper(self) -> bool {
        matches!(self, LugeFinish::Paper | LugeFinish::PaperSnowfilled)
    }

    pub fn uses_snow(self) -> bool {
        matches!(self, LugeFinish::Snowfilled | LugeFinish::PaperSnowfilled)
    }
}

/// Topper on a luge: an uploaded custom design or one of two stock shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum LugeTopper {
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file: Option<FileHandle>,
    },
    Round,
    Crown,
}

impl LugeTopper {
    pub fn describe(&self) -> &'static str {
        match self {
            LugeTopper::Custom { .. } => "custom topper (follow the uploaded topper design)",
            LugeTopper::Round => "round topper (smooth round disc on top of the luge)",
            LugeTopper::Crown => "crown topper (crown-shaped piece on top of the luge)",
        }
    }
}

/// Outline of an add-on logo block. Shared by luges and standard showpieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoShape {
    Round,
    Square,
    Rectangle,
}

impl LogoShape {
    pub fn describe(self) -> &'static str {
        match self {
            LogoShape::Round => "round/circular",
            LogoShape::Square => "square",
            LogoShape::Rectangle => "rectangular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreeDLogoStyle {
    Paper,
    Snowfilled,
}

impl ThreeDLogoStyle {
    pub fn describe(self) -> &'static str {
        match self {
            ThreeDLogoStyle::Paper => "paper card (printed logo on a paper card frozen in the ice)",
            ThreeDLogoStyle::Snowfilled => "carved and snowfilled (logo engraved and filled with snow)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOption {
    Names,
    Date,
    Message,
}

impl TextOption {
    pub fn describe(self) -> &'static str {
        match self {
            TextOption::Names => "engrave names / words",
            TextOption::Date => "engrave a date / number",
            TextOption::Message => "engrave a short message",
        }
    }
}
