use anyhow::{anyhow, Result};
use async_trait::async_trait;

use icecraft::compiler::{self, Branch};
use icecraft::selection::{
    CategoryChoice, GenericExtras, LogoPlacement, LogoShape, LugeFinish, LugeOptions, LugeTopper,
    ShowpieceLogo, StandardOptions, TextOption, ThreeDLogoStyle,
};
use icecraft::{FileHandle, FileResolver, LugeKind, SelectionState, SlotPair, StaticResolver, Template, TopperAssets};

const X: &str = "https://cdn.example/cubes/paper.png";
const Y: &str = "https://cdn.example/bases/round-base.png";
const TUBE: &str = "https://cdn.example/luges/tube.png";
const ROUND: &str = "https://cdn.example/toppers/round.png";
const CROWN: &str = "https://cdn.example/toppers/crown.png";

fn png(name: &str) -> FileHandle {
    FileHandle::new(name, "image/png", format!("bytes of {name}").into_bytes())
}

fn assets() -> TopperAssets {
    TopperAssets { round_url: ROUND.into(), crown_url: CROWN.into() }
}

fn fixtures() -> StaticResolver {
    StaticResolver::new()
        .with(X, png("x"))
        .with(Y, png("y"))
        .with(TUBE, png("tube"))
        .with(ROUND, png("round"))
        .with(CROWN, png("crown"))
}

/// Fails every fetch.
struct Offline;

#[async_trait]
impl FileResolver for Offline {
    async fn fetch_as_file(&self, url: &str, _filename: &str) -> Result<Option<FileHandle>> {
        Err(anyhow!("network down: {url}"))
    }
}

fn assert_contiguous(payload: &icecraft::CompiledPayload) {
    let keys: Vec<usize> = payload.instructions.keys().copied().collect();
    assert_eq!(keys, (0..payload.files.len()).collect::<Vec<_>>());
}

fn tube_luge(options: LugeOptions, logo: Option<FileHandle>) -> SelectionState {
    SelectionState {
        category: CategoryChoice::Luges(options),
        subject: SlotPair::template(Template::new("Tube Luge", TUBE)),
        logo,
        ..Default::default()
    }
}

#[tokio::test]
async fn ice_cube_with_logo() {
    let sel = SelectionState {
        category: CategoryChoice::IceCubes,
        subject: SlotPair::template(Template::new("Paper", X)),
        logo: Some(png("acme.png")),
        ..Default::default()
    };
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    assert_eq!(payload.files.len(), 2);
    assert_eq!(payload.files[0].name, "paper.png");
    assert_eq!(payload.files[0].bytes, png("x").bytes);
    assert_eq!(payload.files[1], png("acme.png"));
    assert!(payload.instruction_for(0).unwrap().contains("Do not copy any logo"));
    assert!(payload.instruction_for(1).unwrap().contains("Use this exact logo"));

    let lines = payload.prompt_lines();
    assert!(lines.contains(&"Sculpture category: Ice Cube"));
    assert!(lines.contains(&"Sculpture design: Paper"));
    let embed = lines.iter().find(|l| l.starts_with("Logo embedding:")).unwrap();
    assert!(embed.contains("Paper") && embed.contains("acme.png"));
    assert_contiguous(&payload);
}

fn showpiece(category: CategoryChoice) -> SelectionState {
    SelectionState {
        category,
        subject: SlotPair::template(Template::new("Paper", X)),
        logo: Some(png("acme.png")),
        ..Default::default()
    }
}

#[tokio::test]
async fn three_d_showpiece_with_paper_logo() {
    let sel = showpiece(CategoryChoice::ThreeDShowpiece(ShowpieceLogo {
        want_logo: true,
        style: Some(ThreeDLogoStyle::Paper),
    }));
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    assert_eq!(payload.files.len(), 2);
    assert_eq!(payload.files[0].bytes, png("x").bytes);
    assert_eq!(payload.files[1], png("acme.png"));
    assert!(payload.instruction_for(0).unwrap().contains("must not be duplicated or invented"));
    assert!(payload.instruction_for(1).unwrap().contains("paper card frozen inside the ice"));

    let lines = payload.prompt_lines();
    assert!(lines.contains(&"Sculpture category: 3D Showpiece"));
    assert!(lines.contains(&"Logo style: paper card (printed logo on a paper card frozen in the ice)"));
    assert!(lines.contains(&"Logo file: acme.png"));
    assert_contiguous(&payload);
}

#[tokio::test]
async fn seafood_display_with_snowfilled_logo() {
    let sel = showpiece(CategoryChoice::SeafoodDisplay(ShowpieceLogo {
        want_logo: true,
        style: Some(ThreeDLogoStyle::Snowfilled),
    }));
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    assert_eq!(payload.files.len(), 2);
    assert_eq!(payload.files[1].name, "acme.png");
    assert!(payload.instruction_for(1).unwrap().contains("(snowfilled, monochrome)"));

    let lines = payload.prompt_lines();
    assert!(lines.contains(&"Sculpture category: Seafood Display"));
    assert!(lines.contains(&"Logo style: carved and snowfilled (logo engraved and filled with snow)"));
    assert!(lines.contains(&"Logo file: acme.png"));
    assert_contiguous(&payload);
}

#[tokio::test]
async fn showpiece_without_want_logo_drops_the_logo() {
    let sel = showpiece(CategoryChoice::ThreeDShowpiece(ShowpieceLogo {
        want_logo: false,
        style: Some(ThreeDLogoStyle::Paper),
    }));
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    let names: Vec<&str> = payload.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["paper.png"]);
    assert!(!payload.instruction_for(0).unwrap().contains("must not be duplicated or invented"));
    let lines = payload.prompt_lines();
    assert!(!lines.iter().any(|l| l.starts_with("Logo style:") || l.starts_with("Logo file:")));
}

#[tokio::test]
async fn standard_showpiece_uses_base_as_primary() {
    let sel = SelectionState {
        category: CategoryChoice::StandardShowpiece(StandardOptions {
            base: SlotPair::template(Template::new("Round Base", Y)),
            logo_shape: Some(LogoShape::Round),
            text: Some(TextOption::Names),
            engrave_text: "Happy 50th".into(),
        }),
        logo: Some(png("m.png")),
        ..Default::default()
    };
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    assert_eq!(payload.files.len(), 2);
    assert_eq!(payload.files[0].bytes, png("y").bytes);
    assert_eq!(payload.files[1].name, "m.png");
    assert!(payload.instruction_for(1).unwrap().contains("round/circular"));

    let lines = payload.prompt_lines();
    for expected in [
        "Sculpture category: Standard Showpiece",
        "Base: Round Base",
        "Add-on logo shape: round/circular",
        "Logo file: m.png",
        "Text / content: engrave names / words",
        "Text to engrave: \"Happy 50th\"",
    ] {
        assert!(lines.contains(&expected), "missing line {expected:?} in {lines:?}");
    }
    let base_at = lines.iter().position(|l| *l == "Base: Round Base").unwrap();
    let shape_at = lines.iter().position(|l| l.starts_with("Add-on logo shape")).unwrap();
    assert!(base_at < shape_at);
}

#[tokio::test]
async fn standard_showpiece_ignores_generic_base() {
    let sel = SelectionState {
        category: CategoryChoice::StandardShowpiece(StandardOptions::default()),
        extras: GenericExtras { want_base: true, base: SlotPair::upload(png("stale.png")), ..Default::default() },
        ..Default::default()
    };
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;
    assert!(payload.files.is_empty());
}

#[tokio::test]
async fn tube_luge_round_topper_both_placements() {
    let sel = tube_luge(
        LugeOptions {
            logo_placement: Some(LogoPlacement::Both),
            finish: Some(LugeFinish::PaperSnowfilled),
            topper: Some(LugeTopper::Round),
            addon_shape: Some(LogoShape::Square),
            ..Default::default()
        },
        Some(png("n.png")),
    );
    let payload = compiler::compile(&sel, &assets(), &fixtures()).await;

    let names: Vec<&str> = payload.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["tube.png", "luge-topper-round.png", "n.png"]);
    assert_eq!(payload.files[1].bytes, png("round").bytes);
    assert!(payload.instruction_for(0).unwrap().contains("must not be duplicated or invented"));

    let lines = payload.prompt_lines();
    assert!(lines.contains(&"Logo placement: top surface AND side/front (add-on)"));
    assert!(lines.contains(&"Ice finish: Paper + Snowfilled (paper label combined with snofilled effect)"));
    assert!(lines.contains(&"Add-on shape: square"));
    assert!(lines.iter().any(|l| l.starts_with("Topper style: round")));
    assert_contiguous(&payload);
}

#[tokio::test]
async fn failed_crown_fetch_leaves_no_gap() {
    let sel = tube_luge(
        LugeOptions {
            logo_placement: Some(LogoPlacement::Top),
            topper: Some(LugeTopper::Crown),
            ..Default::default()
        },
        Some(png("n.png")),
    );
    let resolver = StaticResolver::new().with(TUBE, png("tube"));
    let payload = compiler::compile(&sel, &assets(), &resolver).await;

    let names: Vec<&str> = payload.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["tube.png", "n.png"]);
    assert!(payload.instruction_for(1).unwrap().contains("Logo for the luge"));
    assert!(payload.instruction_for(2).is_none());
    assert_contiguous(&payload);
}

#[tokio::test]
async fn resolver_errors_are_not_fatal() {
    let sel = tube_luge(
        LugeOptions { topper: Some(LugeTopper::Crown), logo_placement: Some(LogoPlacement::Top), ..Default::default() },
        Some(png("n.png")),
    );
    let payload = compiler::compile(&sel, &assets(), &Offline).await;
    assert_eq!(payload.files, vec![png("n.png")]);
    assert_contiguous(&payload);
    assert!(payload.prompt.contains("Topper style: crown"));
}

#[tokio::test]
async fn empty_selection_is_a_valid_payload() {
    let payload = compiler::compile(&SelectionState::default(), &assets(), &Offline).await;
    assert!(payload.files.is_empty());
    assert!(payload.instructions.is_empty());
    assert_eq!(payload.prompt, "Create an ice sculpture render");
}

#[tokio::test]
async fn compile_is_deterministic() {
    let mut sel = tube_luge(
        LugeOptions {
            logo_placement: Some(LogoPlacement::Addon),
            finish: Some(LugeFinish::Snowfilled),
            front_piece: true,
            topper: Some(LugeTopper::Crown),
            addon_shape: Some(LogoShape::Rectangle),
            ..Default::default()
        },
        Some(png("n.png")),
    );
    sel.references.push(png("ref.png")).unwrap();
    sel.additional_prompt = "glowing blue\nat night".into();
    sel.chat_attachments.push(png("chat.png"));

    let first = compiler::compile(&sel, &assets(), &fixtures()).await;
    let second = compiler::compile(&sel, &assets(), &fixtures()).await;
    assert_eq!(first, second);
    assert!(first.prompt_lines().contains(&"Front piece: yes, no description"));
}

#[tokio::test]
async fn prompt_resplits_into_planned_lines() {
    let mut sel = tube_luge(
        LugeOptions {
            front_piece: true,
            front_piece_text: "company name in block letters".into(),
            ..Default::default()
        },
        None,
    );
    sel.references.notes = "see photo\nmatch the curve".into();
    sel.additional_prompt = "line one\nline two".into();

    let plan = compiler::plan(&sel, &assets());
    let planned: Vec<String> = plan.lines.lines().to_vec();
    let payload = plan.resolve(&fixtures()).await;
    assert_eq!(payload.prompt_lines(), planned);
    assert!(planned.contains(&"Front piece: company name in block letters".to_string()));
}

#[tokio::test]
async fn template_name_with_newline_stays_resplittable() {
    let sel = SelectionState {
        category: CategoryChoice::IceBars,
        subject: SlotPair::template(Template::new("Swan\nDeluxe", X)),
        ..Default::default()
    };
    let plan = compiler::plan(&sel, &assets());
    let planned: Vec<String> = plan.lines.lines().to_vec();
    let payload = plan.resolve(&fixtures()).await;

    assert_eq!(payload.prompt_lines(), planned);
    assert_eq!(planned, ["Sculpture category: Ice Bar", "Sculpture design: Swan", "Deluxe"]);
}

#[tokio::test]
async fn special_categories_never_emit_generic_lines() {
    let extras = GenericExtras {
        want_base: true,
        base: SlotPair::upload(png("base.png")),
        want_topper: true,
        topper: SlotPair::upload(png("top.png")),
        want_logo: true,
    };
    let categories = [
        CategoryChoice::IceCubes,
        CategoryChoice::ThreeDShowpiece(ShowpieceLogo { want_logo: true, style: Some(ThreeDLogoStyle::Paper) }),
        CategoryChoice::SeafoodDisplay(ShowpieceLogo::default()),
        CategoryChoice::StandardShowpiece(StandardOptions::default()),
        CategoryChoice::Luges(LugeOptions::default()),
    ];
    for category in categories {
        let sel = SelectionState {
            category,
            subject: SlotPair::template(Template::new("Mini Luge", TUBE)),
            extras: extras.clone(),
            logo: Some(png("logo.png")),
            ..Default::default()
        };
        assert_ne!(Branch::of(&sel), Branch::Generic);
        let payload = compiler::compile(&sel, &assets(), &fixtures()).await;
        assert!(
            !payload.prompt_lines().iter().any(|l| l.starts_with("Include ")),
            "generic line leaked for {:?}",
            sel.category
        );
        let logos = payload.files.iter().filter(|f| f.name == "logo.png").count();
        assert!(logos <= 1);
        assert_contiguous(&payload);
    }
}

#[test]
fn luge_detection_examples() {
    assert_eq!(LugeKind::detect("Double Martini Luge"), Some(LugeKind::DoubleMartini));
    assert_eq!(LugeKind::detect("Mini Luge"), Some(LugeKind::Mini));
    assert_eq!(LugeKind::detect("Classic Tube"), Some(LugeKind::Tube));

    let swan = SelectionState {
        category: CategoryChoice::Luges(LugeOptions::default()),
        subject: SlotPair::template(Template::new("Swan Luge", "https://cdn.example/swan.png")),
        ..Default::default()
    };
    assert_eq!(swan.luge_kind(), None);
    assert_eq!(Branch::of(&swan), Branch::Generic);
}
