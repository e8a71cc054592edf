//! Persists a finished chain run: `plan.json` and `output.md`.
//!
//! Both artifacts are written to temporary siblings first and only then
//! renamed into place, so a failed write leaves neither file from this run.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

use crate::models::ChainResult;

pub const PLAN_FILE: &str = "plan.json";
pub const DOCUMENT_FILE: &str = "output.md";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub plan: PathBuf,
    pub document: PathBuf,
}

pub fn write_artifacts(dir: &Path, result: &ChainResult) -> Result<ArtifactPaths, OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let plan_json = serde_json::to_string_pretty(&result.plan)?;
    let plan = stage(dir, PLAN_FILE, plan_json.as_bytes())?;
    let document = stage(dir, DOCUMENT_FILE, result.document.as_str().as_bytes())?;

    let plan = plan.publish()?;
    let document = match document.publish() {
        Ok(path) => path,
        Err(e) => {
            // Never leave this run's plan without its document
            let _ = std::fs::remove_file(&plan);
            return Err(e);
        }
    };

    info!(
        "Artifacts written: {} and {}",
        plan.display(),
        document.display()
    );
    Ok(ArtifactPaths { plan, document })
}

/// A fully written and synced temp file waiting to be renamed into place.
/// Dropping it without publishing deletes the temp file.
struct Staged {
    file: NamedTempFile,
    path: PathBuf,
}

impl Staged {
    fn publish(self) -> Result<PathBuf, OutputError> {
        let Staged { file, path } = self;
        file.persist(&path).map_err(|e| OutputError::Write {
            path: path.clone(),
            source: e.error,
        })?;
        Ok(path)
    }
}

fn stage(dir: &Path, name: &str, contents: &[u8]) -> Result<Staged, OutputError> {
    let path = dir.join(name);
    let write_error = |source| OutputError::Write {
        path: path.clone(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    file.write_all(contents).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;

    Ok(Staged { file, path })
}
