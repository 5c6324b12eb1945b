use serde::{Deserialize, Serialize};

use crate::selection::LugeTopper;

pub const DEFAULT_ROUND_TOPPER_URL: &str = "https://cdn.icecraft.example/templates/luge/topper-round.png";
pub const DEFAULT_CROWN_TOPPER_URL: &str = "https://cdn.icecraft.example/templates/luge/topper-crown.png";

/// Stock topper images attached when a luge uses a round or crown topper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopperAssets {
    pub round_url: String,
    pub crown_url: String,
}

impl Default for TopperAssets {
    fn default() -> Self {
        Self {
            round_url: DEFAULT_ROUND_TOPPER_URL.into(),
            crown_url: DEFAULT_CROWN_TOPPER_URL.into(),
        }
    }
}

/// A stock image to fetch: url plus the filename it is uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAsset<'a> {
    pub url: &'a str,
    pub filename: &'static str,
}

impl TopperAssets {
    /// Custom toppers come from an upload, not the catalog.
    pub fn for_topper(&self, topper: &LugeTopper) -> Option<StockAsset<'_>> {
        match topper {
            LugeTopper::Round => Some(StockAsset { url: &self.round_url, filename: "luge-topper-round.png" }),
            LugeTopper::Crown => Some(StockAsset { url: &self.crown_url, filename: "luge-topper-crown.png" }),
            LugeTopper::Custom { .. } => None,
        }
    }
}
