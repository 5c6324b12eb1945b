use crate::prompt;
use crate::selection::{
    CategoryChoice, FileHandle, LugeKind, LugeOptions, SelectionState, ShowpieceLogo, StandardOptions,
};

/// Which category-specific rule set drives a compile. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch<'a> {
    Standard(&'a StandardOptions),
    /// 3D showpieces and seafood displays.
    Showpiece(&'a ShowpieceLogo),
    IceCube,
    Luge { kind: LugeKind, options: &'a LugeOptions },
    /// Everything else, including luges whose subject name carries no
    /// sub-type token.
    Generic,
}

impl<'a> Branch<'a> {
    pub fn of(sel: &'a SelectionState) -> Branch<'a> {
        match &sel.category {
            CategoryChoice::StandardShowpiece(opts) => Branch::Standard(opts),
            CategoryChoice::ThreeDShowpiece(logo) | CategoryChoice::SeafoodDisplay(logo) => Branch::Showpiece(logo),
            CategoryChoice::IceCubes => Branch::IceCube,
            CategoryChoice::Luges(options) => match sel.luge_kind() {
                Some(kind) => Branch::Luge { kind, options },
                None => Branch::Generic,
            },
            CategoryChoice::IceBars | CategoryChoice::Unselected => Branch::Generic,
        }
    }

    /// The logo attachment this branch contributes, if any.
    pub fn logo<'s>(&self, sel: &'s SelectionState) -> Option<(&'s FileHandle, String)> {
        let file = sel.logo.as_ref()?;
        let instruction = match self {
            Branch::IceCube => prompt::cube_logo(),
            Branch::Showpiece(ShowpieceLogo { want_logo: true, style: Some(style) }) => {
                prompt::showpiece_logo(*style)
            }
            Branch::Showpiece(_) => return None,
            Branch::Standard(StandardOptions { logo_shape: Some(shape), .. }) => prompt::standard_logo(*shape),
            Branch::Standard(_) => return None,
            Branch::Luge { options, .. } => {
                let placement = options.logo_placement?;
                prompt::luge_logo(placement, options.finish, options.addon_shape)
            }
            Branch::Generic if sel.extras.want_logo => prompt::generic_logo(),
            Branch::Generic => return None,
        };
        Some((file, instruction))
    }
}
