use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use colored::*;
use tracing::debug;

use crate::config::Config;
use crate::generation::LlmGenerator;
use crate::pipeline::{CourseInputs, CourseOutcome, CoursePipeline};

use super::args::RunArgs;
use super::util;

/// Inputs file first, then individual flags on top.
pub(crate) fn course_inputs(args: &RunArgs) -> Result<CourseInputs> {
    let mut inputs = match &args.inputs {
        Some(path) => CourseInputs::from_json_file(path)?,
        None => CourseInputs::default(),
    };

    if let Some(title) = &args.title {
        inputs.course_title = title.clone();
    }
    if let Some(subtitle) = &args.subtitle {
        inputs.course_subtitle = subtitle.clone();
    }
    if !args.points.is_empty() {
        inputs.description_points = args.points.clone();
    }
    if let Some(audience) = &args.audience {
        inputs.target_audience = audience.clone();
    }
    if let Some(goal) = &args.goal {
        inputs.course_goal = goal.clone();
    }

    if inputs.course_title.trim().is_empty() {
        bail!("A course title is required. Pass --title or --inputs FILE.");
    }

    Ok(inputs)
}

pub(crate) async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let inputs = course_inputs(&args)?;
    let layout = util::output_layout(args.output, config);
    let crews = util::course_crews(args.crews.as_deref())?;
    let generator = LlmGenerator::from_config(config)?;

    println!(
        "🚀 Generating '{}' into {}",
        inputs.course_title.bold(),
        layout.root().display()
    );
    println!(
        "   Provider: {} | Model: {}",
        config.llm.provider.display_name(),
        config.models.model
    );

    let pipeline = CoursePipeline::with_crews(Arc::new(generator), crews);
    let run = pipeline.run(inputs, layout).await;

    for event in &run.events {
        debug!(?event, "pipeline event");
    }
    debug!(phase = ?run.phase, "pipeline finished");

    if !run.outcome.is_failure() {
        println!("{}", util::outcome_headline(&run.outcome));
    }
    if let Some(curriculum) = run.state.curriculum() {
        println!("   Curriculum: {}", curriculum.title.bold());
    }

    match run.outcome {
        CourseOutcome::Completed(report) => {
            util::print_report(&report);
            Ok(())
        }
        CourseOutcome::Degraded { .. } => {
            println!("   Check the raw curriculum response under the output directory.");
            Ok(())
        }
        CourseOutcome::Failed { stage, error } => Err(anyhow!(error)
            .context(format!("Course generation failed during the {stage} stage"))),
    }
}
