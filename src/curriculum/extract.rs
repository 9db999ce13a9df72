use thiserror::Error;
use tracing::debug;

use super::model::{Curriculum, ValidationError};
use super::parser::{self, ParseError};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no fenced json block found")]
    NoJsonBlock,
    #[error("fenced json block is not a curriculum: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("fenced json curriculum is invalid: {0}")]
    Invalid(#[source] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurriculumError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result of the JSON-then-Markdown strategy chain.
#[derive(Debug)]
pub enum Extraction {
    /// Decoded from the last fenced json block.
    Extracted(Curriculum),
    /// Recovered by the line-based Markdown parser.
    Parsed(Curriculum),
    Failed {
        json: ExtractionError,
        text: CurriculumError,
    },
}

impl Extraction {
    pub fn curriculum(&self) -> Option<&Curriculum> {
        match self {
            Extraction::Extracted(curriculum) | Extraction::Parsed(curriculum) => Some(curriculum),
            Extraction::Failed { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<Curriculum, CurriculumError> {
        match self {
            Extraction::Extracted(curriculum) | Extraction::Parsed(curriculum) => Ok(curriculum),
            Extraction::Failed { text, .. } => Err(text),
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            Extraction::Extracted(_) => "json",
            Extraction::Parsed(_) => "markdown",
            Extraction::Failed { .. } => "none",
        }
    }
}

/// Returns the body of the last ```json fenced block, if it is closed.
pub fn last_json_block(raw: &str) -> Option<&str> {
    let start = raw.rfind(JSON_FENCE)? + JSON_FENCE.len();
    let end = raw[start..].find(FENCE)? + start;
    Some(raw[start..end].trim())
}

pub fn extract_json(raw: &str) -> Result<Curriculum, ExtractionError> {
    let block = last_json_block(raw).ok_or(ExtractionError::NoJsonBlock)?;
    let curriculum: Curriculum = serde_json::from_str(block)?;
    curriculum.validated().map_err(ExtractionError::Invalid)
}

pub fn parse_validated(raw: &str) -> Result<Curriculum, CurriculumError> {
    Ok(parser::parse(raw)?.validated()?)
}

/// Tries the fenced JSON block first and falls back to Markdown parsing.
pub fn extract(raw: &str) -> Extraction {
    let json = match extract_json(raw) {
        Ok(curriculum) => return Extraction::Extracted(curriculum),
        Err(error) => error,
    };
    debug!(reason = %json, "json extraction failed; parsing markdown outline");

    match parse_validated(raw) {
        Ok(curriculum) => Extraction::Parsed(curriculum),
        Err(text) => Extraction::Failed { json, text },
    }
}
