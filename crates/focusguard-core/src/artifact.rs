//! # Model Artifact
//!
//! JSON persistence for a fitted [`Pipeline`]. The file carries a format
//! version; loading an artifact written with a different version fails
//! instead of silently producing wrong predictions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FocusGuardError, Result};
use crate::pipeline::Pipeline;

/// Layout version of the artifact file written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Default artifact filename shared by trainer and server.
pub const DEFAULT_MODEL_PATH: &str = "focusguard_model.json";

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    created_by: &'a str,
    pipeline: &'a Pipeline,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
    #[serde(default)]
    created_by: String,
}

#[derive(Deserialize)]
struct ArtifactOwned {
    pipeline: Pipeline,
}

fn producer() -> String {
    format!("focusguard-core {}", env!("CARGO_PKG_VERSION"))
}

/// Serialize a pipeline to an artifact JSON string.
pub fn to_json(pipeline: &Pipeline) -> Result<String> {
    let created_by = producer();
    let artifact = ArtifactRef {
        format_version: FORMAT_VERSION,
        created_by: &created_by,
        pipeline,
    };
    Ok(serde_json::to_string(&artifact)?)
}

/// Parse an artifact JSON string, checking the format version.
pub fn from_json(json: &str) -> Result<Pipeline> {
    let header: ArtifactHeader = serde_json::from_str(json)?;
    if header.format_version != FORMAT_VERSION {
        return Err(FocusGuardError::IncompatibleArtifact {
            found: header.format_version,
            expected: FORMAT_VERSION,
        });
    }
    debug!(created_by = %header.created_by, "Artifact header accepted");

    let artifact: ArtifactOwned = serde_json::from_str(json)?;
    artifact.pipeline.validate()?;
    Ok(artifact.pipeline)
}

/// Write the pipeline to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(pipeline: &Pipeline, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json(pipeline)?)?;
    info!(path = %path.display(), "Model saved");
    Ok(())
}

/// Read a pipeline previously written by [`save`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Pipeline> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let pipeline = from_json(&content)?;
    info!(
        path = %path.display(),
        classes = pipeline.classes().len(),
        vocabulary = pipeline.vectorizer().vocabulary_size(),
        "Model loaded"
    );
    Ok(pipeline)
}
