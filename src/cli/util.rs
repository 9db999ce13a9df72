use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use crate::generation::CrewFile;
use crate::output::OutputLayout;
use crate::pipeline::{CourseCrews, CourseOutcome, CourseReport};

pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible: String = key.chars().take(8).collect();
    format!("{visible}***")
}

/// Output root from the command line, falling back to the configured one.
pub(crate) fn output_layout(output: Option<PathBuf>, config: &Config) -> OutputLayout {
    OutputLayout::new(output.unwrap_or_else(|| config.output.directory.clone()))
}

/// Built-in crews, with any steps from `crews_file` swapped in.
pub(crate) fn course_crews(crews_file: Option<&Path>) -> Result<CourseCrews> {
    let crews = CourseCrews::default();
    match crews_file {
        Some(path) => {
            let file = CrewFile::load(path)
                .with_context(|| format!("Invalid crew file {}", path.display()))?;
            Ok(crews.with_overrides(file))
        }
        None => Ok(crews),
    }
}

pub(crate) fn print_report(report: &CourseReport) {
    println!("{}", "📊 Course generation report".bold());
    println!("   Sections: {}", report.sections);
    println!("   Lectures: {}", report.lectures);
    println!("   Lectures written: {}", report.lectures_written);
    println!("   Slide decks written: {}", report.slides_written);
}

pub(crate) fn outcome_headline(outcome: &CourseOutcome) -> String {
    match outcome {
        CourseOutcome::Completed(_) => "✅ Course generation complete!".green().to_string(),
        CourseOutcome::Degraded { reason } => {
            format!("⚠️  No usable curriculum was produced: {reason}")
                .yellow()
                .to_string()
        }
        CourseOutcome::Failed { stage, error } => {
            format!("❌ {stage} stage failed: {error}").red().to_string()
        }
    }
}
