use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::StageKind;

/// Failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage received empty content for lecture '{lecture}' in section '{section}'")]
    EmptyContent {
        stage: StageKind,
        section: String,
        lecture: String,
    },
    #[error("{stage} generation failed for {target}: {source:#}")]
    Generation {
        stage: StageKind,
        target: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("filesystem error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize curriculum: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn generation(stage: StageKind, target: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Generation {
            stage,
            target: target.into(),
            source,
        }
    }
}
