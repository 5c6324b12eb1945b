use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "icecraft", version, about = "Compile an ice sculpture wizard selection into a generation payload")]
pub struct Args {
    /// Selection document (.json, .yaml or .yml).
    #[arg(long)]
    pub selection: PathBuf,

    /// TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub aspect_ratio: Option<String>,

    #[arg(long)]
    pub resolution: Option<String>,

    #[arg(long)]
    pub template_name: Option<String>,

    /// Show the planned attachments and prompt without fetching anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// POST the compiled payload to the endpoint.
    #[arg(long, default_value_t = false)]
    pub submit: bool,

    #[arg(long, default_value_t = false)]
    pub auto_approve: bool,

    #[arg(long, default_value_t = false)]
    pub save_payload: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Flags given on the command line override the config file.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(e) = &self.endpoint {
            cfg.endpoint = Some(e.clone());
        }
        if let Some(t) = self.timeout_secs {
            cfg.timeout_secs = t;
        }
        if let Some(v) = &self.aspect_ratio {
            cfg.submit.aspect_ratio = Some(v.clone());
        }
        if let Some(v) = &self.resolution {
            cfg.submit.resolution = Some(v.clone());
        }
        if let Some(v) = &self.template_name {
            cfg.submit.template_name = Some(v.clone());
        }
    }
}
