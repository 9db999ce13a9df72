use serde::Serialize;

use super::context::{CourseEvent, CourseState};
use super::error::PipelineError;
use super::types::{RunPhase, StageKind};

/// Summary counts computed by the report stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CourseReport {
    pub sections: usize,
    pub lectures: usize,
    pub lectures_written: usize,
    pub slides_written: usize,
}

/// Terminal result of a pipeline run.
#[derive(Debug)]
pub enum CourseOutcome {
    /// Every stage ran against a stored curriculum.
    Completed(CourseReport),
    /// The design stage could not produce a curriculum; later stages were no-ops.
    Degraded { reason: String },
    Failed {
        stage: StageKind,
        error: PipelineError,
    },
}

impl CourseOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CourseOutcome::Failed { .. })
    }
}

#[derive(Debug)]
pub struct PipelineRun {
    pub outcome: CourseOutcome,
    pub phase: RunPhase,
    pub state: CourseState,
    pub events: Vec<CourseEvent>,
}
