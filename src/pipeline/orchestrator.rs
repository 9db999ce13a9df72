use std::sync::Arc;

use tracing::{debug, error, info};

use crate::generation::{ContentGenerator, CrewFile, CrewSpec};
use crate::output::OutputLayout;

use super::context::{CourseContext, CourseInputs};
use super::outcome::{CourseOutcome, PipelineRun};
use super::stages::{CourseStage, DesignStage, LectureStage, ReportStage, SlideStage};
use super::types::StageKind;

/// Crews used by the three generating stages.
#[derive(Debug, Clone)]
pub struct CourseCrews {
    pub design: CrewSpec,
    pub content: CrewSpec,
    pub slides: CrewSpec,
}

impl Default for CourseCrews {
    fn default() -> Self {
        Self {
            design: CrewSpec::course_design(),
            content: CrewSpec::lecture_content(),
            slides: CrewSpec::slides(),
        }
    }
}

impl CourseCrews {
    /// Swaps in the steps of every crew the file defines.
    pub fn with_overrides(mut self, file: CrewFile) -> Self {
        let CrewFile {
            design,
            content,
            slides,
        } = file;

        for (crew, steps) in [
            (&mut self.design, design),
            (&mut self.content, content),
            (&mut self.slides, slides),
        ] {
            if !steps.is_empty() {
                info!(crew = crew.name, steps = steps.len(), "using crew steps from file");
                crew.steps = steps;
            }
        }

        self
    }
}

/// Drives design → lectures → slides → report over one [`CourseContext`].
pub struct CoursePipeline {
    stages: Vec<Box<dyn CourseStage>>,
}

impl CoursePipeline {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self::with_crews(generator, CourseCrews::default())
    }

    pub fn with_crews(generator: Arc<dyn ContentGenerator>, crews: CourseCrews) -> Self {
        let CourseCrews {
            design,
            content,
            slides,
        } = crews;

        let stages: Vec<Box<dyn CourseStage>> = vec![
            Box::new(DesignStage::new(generator.clone(), design)),
            Box::new(LectureStage::new(generator.clone(), content)),
            Box::new(SlideStage::new(generator, slides)),
            Box::new(ReportStage),
        ];
        debug_assert!(
            stages
                .iter()
                .map(|stage| stage.kind())
                .eq(StageKind::ORDER.iter().copied())
        );

        Self { stages }
    }

    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(|stage| stage.kind()).collect()
    }

    /// Runs every stage in order against fresh state. The first stage error
    /// stops the run and is returned as [`CourseOutcome::Failed`].
    pub async fn run(&self, inputs: CourseInputs, layout: OutputLayout) -> PipelineRun {
        let mut context = CourseContext::new(inputs, layout);
        info!(
            course = %context.state.course_title,
            output = %context.layout().root().display(),
            stages = ?self.stage_kinds(),
            "starting course generation"
        );

        for stage in &self.stages {
            let kind = stage.kind();
            context.record_stage_start(kind);
            match stage.execute(&mut context).await {
                Ok(()) => {
                    context.record_stage_end(kind);
                    debug!(
                        stage = %kind,
                        phase = ?context.phase(),
                        events = context.events().len(),
                        "stage completed"
                    );
                }
                Err(err) => {
                    error!(stage = %kind, error = %err, "stage failed; aborting run");
                    context.record_stage_failure(kind, &err);
                    return context.into_run_with_outcome(CourseOutcome::Failed {
                        stage: kind,
                        error: err,
                    });
                }
            }
        }

        context.into_run()
    }
}
