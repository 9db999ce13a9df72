use thiserror::Error;
use tracing::warn;

use super::model::{Curriculum, Lecture, Section};

pub const UNTITLED_COURSE: &str = "Untitled Course";

const OBJECTIVE_LABEL: &str = "- Objective:";
const ACTIVITY_LABEL: &str = "- Activity:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no sections found in curriculum output")]
    NoSectionsFound,
}

/// Parses a Markdown curriculum outline.
///
/// `# ` sets the course title (first one wins), `## ` headings mentioning
/// "section" open a section and `### ` headings open a lecture whose
/// `- Objective:` / `- Activity:` lines are collected until the next heading.
/// The result is not validated; sections without lectures are kept.
pub fn parse(raw: &str) -> Result<Curriculum, ParseError> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut title: Option<String> = None;
    let mut sections = Vec::new();
    let mut current: Option<Section> = None;
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];

        if let Some(text) = line.strip_prefix("# ") {
            if title.is_none() {
                title = Some(text.trim().to_string());
            }
        } else if let Some(text) = line.strip_prefix("## ") {
            if text.to_lowercase().contains("section") {
                if let Some(done) = current.take() {
                    sections.push(done);
                }
                current = Some(Section::new(strip_numbering(text)));
            }
        } else if let Some(text) = line.strip_prefix("### ") {
            let mut lecture = Lecture::new(strip_numbering(text), "", "");

            idx += 1;
            while idx < lines.len() && !is_outline_heading(lines[idx]) {
                let field = lines[idx];
                if let Some(value) = field.strip_prefix(OBJECTIVE_LABEL) {
                    lecture.objective = value.trim().to_string();
                } else if let Some(value) = field.strip_prefix(ACTIVITY_LABEL) {
                    lecture.activity = value.trim().to_string();
                }
                idx += 1;
            }

            match current.as_mut() {
                Some(section) => section.lectures.push(lecture),
                None => warn!(lecture = %lecture.title, "lecture heading before any section; dropped"),
            }
            continue;
        }

        idx += 1;
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    if sections.is_empty() {
        return Err(ParseError::NoSectionsFound);
    }

    let title = title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED_COURSE.to_string());

    Ok(Curriculum { title, sections })
}

fn is_outline_heading(line: &str) -> bool {
    line.starts_with("# ") || line.starts_with("## ") || line.starts_with("### ")
}

/// Drops a leading "1." / "Section 2." style label, keeping what follows the
/// first period.
fn strip_numbering(text: &str) -> String {
    let text = text.trim();
    match text.split_once('.') {
        Some((_, rest)) => rest.trim().to_string(),
        None => text.to_string(),
    }
}
