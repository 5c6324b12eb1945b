use serde::{Deserialize, Serialize};

/// Luge sub-type, derived from the chosen subject's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LugeKind {
    DoubleMartini,
    Tube,
    Mini,
}

impl LugeKind {
    /// Case-insensitive token match. Earlier tokens win, so
    /// "Mini Double Martini" is a double-martini.
    pub fn detect(subject_name: &str) -> Option<LugeKind> {
        let name = subject_name.to_lowercase();
        if name.contains("double") || name.contains("martini") {
            Some(LugeKind::DoubleMartini)
        } else if name.contains("tube") {
            Some(LugeKind::Tube)
        } else if name.contains("mini") {
            Some(LugeKind::Mini)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LugeKind::DoubleMartini => "double-martini",
            LugeKind::Tube => "tube",
            LugeKind::Mini => "mini",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_known_tokens() {
        assert_eq!(LugeKind::detect("Double Martini Luge"), Some(LugeKind::DoubleMartini));
        assert_eq!(LugeKind::detect("Mini Luge"), Some(LugeKind::Mini));
        assert_eq!(LugeKind::detect("Classic Tube"), Some(LugeKind::Tube));
        assert_eq!(LugeKind::detect("MARTINI glass"), Some(LugeKind::DoubleMartini));
    }

    #[test]
    fn unknown_name_has_no_kind() {
        assert_eq!(LugeKind::detect("Swan Luge"), None);
        assert_eq!(LugeKind::detect(""), None);
    }
}
