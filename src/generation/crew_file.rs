use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::CrewStep;

#[derive(Debug, Error)]
pub enum CrewFileError {
    #[error("failed reading crew file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{crew} crew step {step} has an empty {field}")]
    EmptyField {
        crew: &'static str,
        step: usize,
        field: &'static str,
    },
}

/// Replacement steps for the built-in crews, read from YAML.
///
/// ```yaml
/// content:
///   - role: a friendly tutor
///     goal: Explain gently
///     backstory: You teach evening classes.
///     description: Write the lecture "{lecture_title}" for {audience_level}.
///     expected_output: Markdown lecture
/// ```
///
/// A crew left out (or given an empty list) keeps its built-in steps.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrewFile {
    pub design: Vec<CrewStep>,
    pub content: Vec<CrewStep>,
    pub slides: Vec<CrewStep>,
}

impl CrewFile {
    pub fn from_yaml(text: &str) -> Result<Self, CrewFileError> {
        let file: CrewFile = serde_yaml::from_str(text)?;
        file.check()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, CrewFileError> {
        let text = fs::read_to_string(path).map_err(|source| CrewFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    fn check(&self) -> Result<(), CrewFileError> {
        let crews = [
            ("design", &self.design),
            ("content", &self.content),
            ("slides", &self.slides),
        ];

        for (crew, steps) in crews {
            for (index, step) in steps.iter().enumerate() {
                let fields = [
                    ("role", &step.role.role),
                    ("description", &step.task.description),
                ];
                if let Some(&(field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
                    return Err(CrewFileError::EmptyField {
                        crew,
                        step: index + 1,
                        field,
                    });
                }
            }
        }

        Ok(())
    }
}
