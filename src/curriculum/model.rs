use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single lecture inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub title: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub activity: String,
}

impl Lecture {
    pub fn new(
        title: impl Into<String>,
        objective: impl Into<String>,
        activity: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            objective: objective.into(),
            activity: activity.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub lectures: Vec<Lecture>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lectures: Vec::new(),
        }
    }
}

/// Structured course outline produced by the design stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("curriculum title is empty")]
    EmptyTitle,
    #[error("curriculum has no sections")]
    NoSections,
    #[error("section at position {index} has an empty title")]
    EmptySectionTitle { index: usize },
    #[error("section '{section}' has no lectures")]
    EmptySection { section: String },
    #[error("section '{section}' contains a lecture without a title")]
    EmptyLectureTitle { section: String },
}

impl Curriculum {
    pub fn lecture_count(&self) -> usize {
        self.sections.iter().map(|section| section.lectures.len()).sum()
    }

    /// Checks the structural guarantees a stored curriculum must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.sections.is_empty() {
            return Err(ValidationError::NoSections);
        }

        for (index, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(ValidationError::EmptySectionTitle { index });
            }
            if section.lectures.is_empty() {
                return Err(ValidationError::EmptySection {
                    section: section.title.clone(),
                });
            }
            if section
                .lectures
                .iter()
                .any(|lecture| lecture.title.trim().is_empty())
            {
                return Err(ValidationError::EmptyLectureTitle {
                    section: section.title.clone(),
                });
            }
        }

        Ok(())
    }

    /// Consumes the curriculum, returning it only if it passes validation.
    pub fn validated(self) -> Result<Self, ValidationError> {
        self.validate()?;
        Ok(self)
    }
}
