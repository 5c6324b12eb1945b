use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::selection::FileHandle;

/// Output of one compile: images, their instructions keyed by image index,
/// and the aggregated prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPayload {
    pub files: Vec<FileHandle>,
    pub instructions: BTreeMap<usize, String>,
    pub prompt: String,
}

impl CompiledPayload {
    /// JSON object with stringified image indices as keys.
    pub fn instructions_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.instructions)
    }

    pub fn prompt_lines(&self) -> Vec<&str> {
        self.prompt.split('\n').collect()
    }

    pub fn instruction_for(&self, index: usize) -> Option<&str> {
        self.instructions.get(&index).map(String::as_str)
    }

    pub fn manifest(&self, run_id: Uuid) -> Manifest {
        Manifest {
            run_id,
            created_at: Utc::now(),
            prompt: self.prompt.clone(),
            files: self
                .files
                .iter()
                .enumerate()
                .map(|(index, f)| ManifestFile {
                    index,
                    name: f.name.clone(),
                    mime: f.mime.clone(),
                    bytes: f.len(),
                    instruction: self.instructions.get(&index).cloned().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Serializable summary of a payload, without the image bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub prompt: String,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub index: usize,
    pub name: String,
    pub mime: String,
    pub bytes: usize,
    pub instruction: String,
}
