use anyhow::Context;
use clap::Parser;
use uuid::Uuid;
use std::path::Path;

use icecraft::cli::Args;
use icecraft::config::Config;
use icecraft::gateway::{Gateway, HttpGateway};
use icecraft::resolver::HttpResolver;
use icecraft::selection::SelectionState;
use icecraft::{compiler, log, ux};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log::init(args.debug);

    let mut cfg = Config::load_or_default(args.config.as_deref())?;
    args.apply(&mut cfg);

    let run_id = Uuid::new_v4();
    let root = Path::new(&cfg.output_root);
    if args.debug {
        log::print_planned_path(root, run_id);
    }

    let selection = SelectionState::load(&args.selection)
        .with_context(|| format!("loading selection {}", args.selection.display()))?;

    let plan = compiler::plan(&selection, &cfg.topper_assets);
    if args.dry_run {
        ux::show_plan(&plan);
        return Ok(());
    }

    let resolver = HttpResolver::new(cfg.timeout_secs);
    let payload = plan.resolve(&resolver).await;
    let manifest = payload.manifest(run_id);
    ux::show_payload(&manifest);

    if args.save_payload {
        let saved = log::save_payload(root, &manifest)?;
        log::print_saved_paths(&saved);
    }

    if !args.submit {
        return Ok(());
    }
    if payload.files.is_empty() && !args.auto_approve
        && !ux::confirm("No images are attached. Submit the prompt alone?")
    {
        println!("Aborted by user.");
        return Ok(());
    }
    if !args.auto_approve && !ux::confirm("Submit this payload?") {
        println!("Aborted by user.");
        return Ok(());
    }

    let gateway = HttpGateway::new(cfg.endpoint.clone(), cfg.timeout_secs)?;
    let receipt = gateway.submit(&payload, &cfg.submit).await?;
    ux::show_receipt(&receipt);

    Ok(())
}
