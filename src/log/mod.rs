use crate::payload::Manifest;
use fs_err as fs;
use serde_json::to_string_pretty;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub manifest: PathBuf,
    pub prompt: PathBuf,
}

fn run_dir(root: &Path, run: Uuid) -> PathBuf {
    root.join(".icecraft").join("runs").join(run.to_string())
}

/// Install the global subscriber. `RUST_LOG` wins over the `--debug` default.
pub fn init(debug: bool) {
    let default = if debug { "icecraft=debug" } else { "icecraft=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Write the manifest and the raw prompt into the run directory.
pub fn save_payload(root: &Path, manifest: &Manifest) -> anyhow::Result<SavedPaths> {
    let dir = run_dir(root, manifest.run_id);
    fs::create_dir_all(&dir)?;

    let manifest_path = dir.join("payload.json");
    fs::write(&manifest_path, to_string_pretty(manifest)?)?;

    let prompt_path = dir.join("prompt.txt");
    fs::write(&prompt_path, &manifest.prompt)?;

    Ok(SavedPaths { dir, manifest: manifest_path, prompt: prompt_path })
}

pub fn print_planned_path(root: &Path, run: Uuid) {
    let dir = run_dir(root, run);
    println!("debug: planned artifacts directory: {}", dir.display());
    std::io::stdout().flush().ok();
}

pub fn print_saved_paths(saved: &SavedPaths) {
    println!("artifacts directory: {}", saved.dir.display());
    println!("payload manifest saved at: {}", saved.manifest.display());
    println!("prompt saved at: {}", saved.prompt.display());
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::CompiledPayload;
    use crate::selection::FileHandle;
    use std::collections::BTreeMap;

    #[test]
    fn saves_manifest_and_prompt_under_run_dir() {
        let dir = tempfile::tempdir().unwrap();
        let payload = CompiledPayload {
            files: vec![FileHandle::new("a.png", "image/png", vec![9u8; 3])],
            instructions: BTreeMap::from([(0, "subject".to_string())]),
            prompt: "Sculpture category: Ice Bar".into(),
        };
        let run = Uuid::new_v4();
        let saved = save_payload(dir.path(), &payload.manifest(run)).unwrap();

        assert!(saved.dir.ends_with(run.to_string()));
        let prompt = std::fs::read_to_string(&saved.prompt).unwrap();
        assert_eq!(prompt, "Sculpture category: Ice Bar");
        let manifest: Manifest =
            serde_json::from_str(&std::fs::read_to_string(&saved.manifest).unwrap()).unwrap();
        assert_eq!(manifest.run_id, run);
        assert_eq!(manifest.files[0].instruction, "subject");
    }
}
