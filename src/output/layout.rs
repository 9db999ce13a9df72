use std::path::{Path, PathBuf};

use super::sanitize;

pub const DEFAULT_OUTPUT_DIR: &str = "output";

const CURRICULUM_DIR: &str = "curriculum";
const LECTURES_DIR: &str = "lectures";
const SLIDES_DIR: &str = "slides";
const RAW_CURRICULUM_FILE: &str = "course_curriculum_raw.md";
const CURRICULUM_JSON_FILE: &str = "course_curriculum.json";

/// Paths of every artifact a run produces, relative to one output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn curriculum_dir(&self) -> PathBuf {
        self.root.join(CURRICULUM_DIR)
    }

    pub fn raw_curriculum_file(&self) -> &'static str {
        RAW_CURRICULUM_FILE
    }

    pub fn curriculum_json_file(&self) -> &'static str {
        CURRICULUM_JSON_FILE
    }

    pub fn lectures_root(&self) -> PathBuf {
        self.root.join(LECTURES_DIR)
    }

    pub fn lecture_dir(&self, section_title: &str) -> PathBuf {
        self.lectures_root().join(sanitize(section_title))
    }

    pub fn slides_root(&self) -> PathBuf {
        self.root.join(SLIDES_DIR)
    }

    pub fn slides_dir(&self, section_title: &str) -> PathBuf {
        self.slides_root().join(sanitize(section_title))
    }

    /// File name shared by a lecture and its slide deck.
    pub fn lecture_file_name(lecture_title: &str) -> String {
        format!("{}.md", sanitize(lecture_title))
    }

    pub fn lecture_path(&self, section_title: &str, lecture_title: &str) -> PathBuf {
        self.lecture_dir(section_title)
            .join(Self::lecture_file_name(lecture_title))
    }

    pub fn slides_path(&self, section_title: &str, lecture_title: &str) -> PathBuf {
        self.slides_dir(section_title)
            .join(Self::lecture_file_name(lecture_title))
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
