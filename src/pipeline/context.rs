use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::curriculum::Curriculum;
use crate::output::OutputLayout;

use super::error::PipelineError;
use super::outcome::{CourseOutcome, CourseReport, PipelineRun};
use super::types::{RunPhase, StageKind};

/// Caller-supplied description of the course to generate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseInputs {
    pub course_title: String,
    pub course_subtitle: String,
    pub description_points: Vec<String>,
    pub target_audience: String,
    pub course_goal: String,
}

impl CourseInputs {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed reading course inputs at {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing course inputs at {}", path.display()))
    }
}

/// Single source of truth shared by every stage of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseState {
    pub course_title: String,
    pub course_subtitle: String,
    pub description_points: Vec<String>,
    pub target_audience: String,
    pub course_goal: String,
    curriculum: Option<Curriculum>,
}

impl CourseState {
    pub fn new(inputs: CourseInputs) -> Self {
        let CourseInputs {
            course_title,
            course_subtitle,
            description_points,
            target_audience,
            course_goal,
        } = inputs;

        Self {
            course_title,
            course_subtitle,
            description_points,
            target_audience,
            course_goal,
            curriculum: None,
        }
    }

    pub fn curriculum(&self) -> Option<&Curriculum> {
        self.curriculum.as_ref()
    }

    /// Stores the validated curriculum. It can only be set once per run.
    fn store_curriculum(&mut self, curriculum: Curriculum) -> bool {
        if self.curriculum.is_some() {
            return false;
        }
        self.curriculum = Some(curriculum);
        true
    }
}

/// Structured audit events emitted while progressing through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageSkipped { stage: StageKind, reason: String },
    StageFailed { stage: StageKind, error: String },
    RawCurriculumSaved { path: PathBuf },
    CurriculumReady {
        source: &'static str,
        sections: usize,
        lectures: usize,
    },
    CurriculumRejected { reason: String },
    LectureWritten { path: PathBuf },
    LectureMissing { path: PathBuf },
    SlidesWritten { path: PathBuf },
    Reported(Option<CourseReport>),
}

/// Mutable context threaded through the stages by the pipeline driver.
#[derive(Debug)]
pub struct CourseContext {
    pub state: CourseState,
    layout: OutputLayout,
    phase: RunPhase,
    events: Vec<CourseEvent>,
    rejection: Option<String>,
    report: Option<CourseReport>,
    lectures_written: usize,
    slides_written: usize,
}

impl CourseContext {
    pub fn new(inputs: CourseInputs, layout: OutputLayout) -> Self {
        Self {
            state: CourseState::new(inputs),
            layout,
            phase: RunPhase::Init,
            events: Vec::new(),
            rejection: None,
            report: None,
            lectures_written: 0,
            slides_written: 0,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn events(&self) -> &[CourseEvent] {
        &self.events
    }

    pub fn lectures_written(&self) -> usize {
        self.lectures_written
    }

    pub fn slides_written(&self) -> usize {
        self.slides_written
    }

    pub fn record_event(&mut self, event: CourseEvent) {
        self.events.push(event);
    }

    pub fn record_stage_start(&mut self, stage: StageKind) {
        self.record_event(CourseEvent::StageStarted(stage));
    }

    /// Marks `stage` complete and advances the run phase.
    pub fn record_stage_end(&mut self, stage: StageKind) {
        debug_assert_eq!(self.phase.next(), Some(stage.completes()));
        self.phase = stage.completes();
        self.record_event(CourseEvent::StageCompleted(stage));
    }

    pub fn record_stage_skip(&mut self, stage: StageKind, reason: impl Into<String>) {
        self.record_event(CourseEvent::StageSkipped {
            stage,
            reason: reason.into(),
        });
    }

    pub fn record_stage_failure(&mut self, stage: StageKind, error: &PipelineError) {
        self.record_event(CourseEvent::StageFailed {
            stage,
            error: error.to_string(),
        });
    }

    pub fn record_raw_curriculum(&mut self, path: PathBuf) {
        self.record_event(CourseEvent::RawCurriculumSaved { path });
    }

    pub fn record_curriculum(&mut self, curriculum: Curriculum, source: &'static str) {
        let sections = curriculum.sections.len();
        let lectures = curriculum.lecture_count();
        if !self.state.store_curriculum(curriculum) {
            warn!("curriculum already stored for this run; keeping the first one");
            return;
        }
        self.record_event(CourseEvent::CurriculumReady {
            source,
            sections,
            lectures,
        });
    }

    pub fn record_rejection(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.rejection = Some(reason.clone());
        self.record_event(CourseEvent::CurriculumRejected { reason });
    }

    pub fn record_lecture_written(&mut self, path: PathBuf) {
        self.lectures_written += 1;
        self.record_event(CourseEvent::LectureWritten { path });
    }

    pub fn record_lecture_missing(&mut self, path: PathBuf) {
        self.record_event(CourseEvent::LectureMissing { path });
    }

    pub fn record_slides_written(&mut self, path: PathBuf) {
        self.slides_written += 1;
        self.record_event(CourseEvent::SlidesWritten { path });
    }

    pub fn record_report(&mut self, report: Option<CourseReport>) {
        self.report = report;
        self.record_event(CourseEvent::Reported(report));
    }

    pub fn into_run(self) -> PipelineRun {
        let outcome = match (self.report, self.state.curriculum.is_some()) {
            (Some(report), true) => CourseOutcome::Completed(report),
            _ => CourseOutcome::Degraded {
                reason: self
                    .rejection
                    .clone()
                    .unwrap_or_else(|| "curriculum not available".to_string()),
            },
        };
        self.into_run_with_outcome(outcome)
    }

    pub fn into_run_with_outcome(self, outcome: CourseOutcome) -> PipelineRun {
        let CourseContext {
            state,
            phase,
            events,
            ..
        } = self;

        PipelineRun {
            outcome,
            phase,
            state,
            events,
        }
    }
}
