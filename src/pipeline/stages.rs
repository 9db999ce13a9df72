use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::curriculum::{self, Curriculum, Extraction, Lecture, Section};
use crate::generation::{self, ContentGenerator, CrewSpec, GenerationInputs, run_crew};
use crate::output::{OutputLayout, write_file};

use super::context::{CourseContext, CourseState};
use super::error::PipelineError;
use super::outcome::CourseReport;
use super::types::StageKind;

const NO_PREVIOUS_SECTIONS: &str = "No previous sections.";

#[async_trait]
pub trait CourseStage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn execute(&self, context: &mut CourseContext) -> Result<(), PipelineError>;
}

/// Inputs shared by the lecture and slide crews.
fn lecture_inputs(state: &CourseState, section: &Section, lecture: &Lecture) -> GenerationInputs {
    generation::inputs([
        ("course_title", state.course_title.as_str()),
        ("section_description", section.title.as_str()),
        ("lecture_title", lecture.title.as_str()),
        ("lecture_objective", lecture.objective.as_str()),
        ("lecture_activity", lecture.activity.as_str()),
        ("audience_level", state.target_audience.as_str()),
    ])
}

fn previous_sections(curriculum: &Curriculum, index: usize) -> String {
    if index == 0 {
        return NO_PREVIOUS_SECTIONS.to_string();
    }
    curriculum.sections[..index]
        .iter()
        .map(|section| section.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn lecture_target(section: &Section, lecture: &Lecture) -> String {
    format!("lecture '{}' in section '{}'", lecture.title, section.title)
}

pub struct DesignStage {
    generator: Arc<dyn ContentGenerator>,
    crew: CrewSpec,
}

impl DesignStage {
    pub fn new(generator: Arc<dyn ContentGenerator>, crew: CrewSpec) -> Self {
        Self { generator, crew }
    }
}

#[async_trait]
impl CourseStage for DesignStage {
    fn kind(&self) -> StageKind {
        StageKind::Design
    }

    async fn execute(&self, context: &mut CourseContext) -> Result<(), PipelineError> {
        let state = &context.state;
        info!(course = %state.course_title, "designing course curriculum");

        let inputs = generation::inputs([
            ("course_title", state.course_title.clone()),
            ("course_subtitle", state.course_subtitle.clone()),
            ("course_goal", state.course_goal.clone()),
            ("target_audience", state.target_audience.clone()),
            ("description_points", state.description_points.join("\n")),
        ]);

        let raw = run_crew(self.generator.as_ref(), &self.crew, &inputs)
            .await
            .map_err(|source| PipelineError::generation(self.kind(), "curriculum", source))?;

        let dir = context.layout().curriculum_dir();
        let raw_file = context.layout().raw_curriculum_file();
        let raw_path =
            write_file(&dir, raw_file, &raw).map_err(|source| PipelineError::io(dir.join(raw_file), source))?;
        info!(path = %raw_path.display(), "raw curriculum saved");
        context.record_raw_curriculum(raw_path);

        let extraction = curriculum::extract(&raw);
        let source = extraction.source_label();
        match extraction {
            Extraction::Extracted(curriculum) | Extraction::Parsed(curriculum) => {
                let json = serde_json::to_string_pretty(&curriculum)?;
                let json_file = context.layout().curriculum_json_file();
                let json_path = write_file(&dir, json_file, &json)
                    .map_err(|source| PipelineError::io(dir.join(json_file), source))?;
                info!(
                    source,
                    sections = curriculum.sections.len(),
                    lectures = curriculum.lecture_count(),
                    path = %json_path.display(),
                    "curriculum validated and stored"
                );
                context.record_curriculum(curriculum, source);
            }
            Extraction::Failed { json, text } => {
                warn!(
                    stage = %self.kind(),
                    json_error = %json,
                    markdown_error = %text,
                    "curriculum extraction failed; later stages will be skipped"
                );
                context.record_rejection(format!("{text} (json: {json})"));
            }
        }

        Ok(())
    }
}

pub struct LectureStage {
    generator: Arc<dyn ContentGenerator>,
    crew: CrewSpec,
}

impl LectureStage {
    pub fn new(generator: Arc<dyn ContentGenerator>, crew: CrewSpec) -> Self {
        Self { generator, crew }
    }
}

#[async_trait]
impl CourseStage for LectureStage {
    fn kind(&self) -> StageKind {
        StageKind::Lectures
    }

    async fn execute(&self, context: &mut CourseContext) -> Result<(), PipelineError> {
        let Some(curriculum) = context.state.curriculum().cloned() else {
            warn!(stage = %self.kind(), "no curriculum found; skipping lecture writing");
            context.record_stage_skip(self.kind(), "no curriculum available");
            return Ok(());
        };

        for (index, section) in curriculum.sections.iter().enumerate() {
            let dir = context.layout().lecture_dir(&section.title);
            info!(section = %section.title, dir = %dir.display(), "writing section lectures");

            for lecture in &section.lectures {
                info!(section = %section.title, lecture = %lecture.title, "generating lecture");
                let mut inputs = lecture_inputs(&context.state, section, lecture);
                inputs.insert(
                    "previous_sections".to_string(),
                    previous_sections(&curriculum, index),
                );

                let content = run_crew(self.generator.as_ref(), &self.crew, &inputs)
                    .await
                    .map_err(|source| {
                        PipelineError::generation(self.kind(), lecture_target(section, lecture), source)
                    })?;

                if content.trim().is_empty() {
                    error!(section = %section.title, lecture = %lecture.title, "empty lecture content");
                    return Err(PipelineError::EmptyContent {
                        stage: self.kind(),
                        section: section.title.clone(),
                        lecture: lecture.title.clone(),
                    });
                }

                let filename = OutputLayout::lecture_file_name(&lecture.title);
                let path = write_file(&dir, &filename, &content)
                    .map_err(|source| PipelineError::io(dir.join(&filename), source))?;
                info!(path = %path.display(), "lecture saved");
                context.record_lecture_written(path);
            }
        }

        Ok(())
    }
}

pub struct SlideStage {
    generator: Arc<dyn ContentGenerator>,
    crew: CrewSpec,
}

impl SlideStage {
    pub fn new(generator: Arc<dyn ContentGenerator>, crew: CrewSpec) -> Self {
        Self { generator, crew }
    }
}

#[async_trait]
impl CourseStage for SlideStage {
    fn kind(&self) -> StageKind {
        StageKind::Slides
    }

    async fn execute(&self, context: &mut CourseContext) -> Result<(), PipelineError> {
        let Some(curriculum) = context.state.curriculum().cloned() else {
            warn!(stage = %self.kind(), "no curriculum found; skipping slide generation");
            context.record_stage_skip(self.kind(), "no curriculum available");
            return Ok(());
        };

        for section in &curriculum.sections {
            let dir = context.layout().slides_dir(&section.title);

            for lecture in &section.lectures {
                let lecture_path = context.layout().lecture_path(&section.title, &lecture.title);
                let lecture_content = match fs::read_to_string(&lecture_path) {
                    Ok(content) => content,
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        warn!(
                            section = %section.title,
                            lecture = %lecture.title,
                            path = %lecture_path.display(),
                            "lecture file not found; skipping slides"
                        );
                        context.record_lecture_missing(lecture_path);
                        continue;
                    }
                    Err(err) => return Err(PipelineError::io(lecture_path, err)),
                };

                info!(section = %section.title, lecture = %lecture.title, "creating slides");
                let mut inputs = lecture_inputs(&context.state, section, lecture);
                inputs.insert("lecture_content".to_string(), lecture_content);

                let slides = run_crew(self.generator.as_ref(), &self.crew, &inputs)
                    .await
                    .map_err(|source| {
                        PipelineError::generation(self.kind(), lecture_target(section, lecture), source)
                    })?;

                if slides.trim().is_empty() {
                    error!(section = %section.title, lecture = %lecture.title, "empty slide content");
                    return Err(PipelineError::EmptyContent {
                        stage: self.kind(),
                        section: section.title.clone(),
                        lecture: lecture.title.clone(),
                    });
                }

                let filename = OutputLayout::lecture_file_name(&lecture.title);
                let target = context.layout().slides_path(&section.title, &lecture.title);
                let path = write_file(&dir, &filename, &slides)
                    .map_err(|source| PipelineError::io(target, source))?;
                info!(path = %path.display(), "slides saved");
                context.record_slides_written(path);
            }
        }

        Ok(())
    }
}

/// Logs summary counts; never fails.
pub struct ReportStage;

#[async_trait]
impl CourseStage for ReportStage {
    fn kind(&self) -> StageKind {
        StageKind::Report
    }

    async fn execute(&self, context: &mut CourseContext) -> Result<(), PipelineError> {
        let report = context.state.curriculum().map(|curriculum| CourseReport {
            sections: curriculum.sections.len(),
            lectures: curriculum.lecture_count(),
            lectures_written: context.lectures_written(),
            slides_written: context.slides_written(),
        });

        match &report {
            Some(report) => info!(
                sections = report.sections,
                lectures = report.lectures,
                lectures_written = report.lectures_written,
                slides_written = report.slides_written,
                "course generation report"
            ),
            None => warn!("curriculum not available; check the design stage output"),
        }

        context.record_report(report);
        Ok(())
    }
}
