use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::generation::{self, ContentGenerator, CrewSpec, run_crew};
use crate::output::{OutputLayout, sanitize, write_file};

use super::error::PipelineError;
use super::types::StageKind;

/// Result of regenerating slides from lecture files already on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|source| PipelineError::io(dir, source))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| PipelineError::io(dir, source))?;
    entries.sort();
    Ok(entries)
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Walks `<root>/lectures/<section>/*.md` and writes a slide deck for every
/// lecture found. Unlike the pipeline, unreadable lectures and empty model
/// output are skipped rather than aborting the batch.
pub async fn regenerate_slides(
    generator: &dyn ContentGenerator,
    crew: &CrewSpec,
    layout: &OutputLayout,
    audience: &str,
) -> Result<BatchReport, PipelineError> {
    let mut report = BatchReport::default();

    for section_dir in sorted_entries(&layout.lectures_root())? {
        if !section_dir.is_dir() {
            continue;
        }
        let Some(folder) = section_dir.file_name().map(|name| name.to_string_lossy().into_owned())
        else {
            continue;
        };
        let section_description = folder.replace('_', " ");
        let slides_dir = layout.slides_root().join(sanitize(&folder));
        info!(section = %section_description, "processing section");

        for lecture_path in sorted_entries(&section_dir)? {
            if lecture_path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(filename) = lecture_path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_owned)
            else {
                continue;
            };

            let lecture_content = match fs::read_to_string(&lecture_path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(path = %lecture_path.display(), error = %err, "failed to read lecture; skipping");
                    report.skipped.push(lecture_path);
                    continue;
                }
            };

            let lecture_title = file_label(&lecture_path);
            let objective = format!("Understand {lecture_title}");
            let inputs = generation::inputs([
                ("lecture_title", lecture_title.as_str()),
                ("lecture_objective", objective.as_str()),
                ("lecture_activity", ""),
                ("section_description", section_description.as_str()),
                ("audience_level", audience),
                ("lecture_content", lecture_content.as_str()),
            ]);

            info!(lecture = %lecture_title, "generating slides");
            let slides = run_crew(generator, crew, &inputs).await.map_err(|source| {
                PipelineError::generation(
                    StageKind::Slides,
                    format!("lecture file {}", lecture_path.display()),
                    source,
                )
            })?;

            if slides.trim().is_empty() {
                warn!(lecture = %lecture_title, "empty slide content returned; skipping");
                report.skipped.push(lecture_path);
                continue;
            }

            let path = write_file(&slides_dir, &filename, &slides)
                .map_err(|source| PipelineError::io(slides_dir.join(&filename), source))?;
            info!(path = %path.display(), "slides saved");
            report.generated.push(path);
        }
    }

    Ok(report)
}
