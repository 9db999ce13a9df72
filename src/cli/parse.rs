use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::curriculum;
use crate::output::{OutputLayout, write_file};

use super::args::ParseArgs;

pub(crate) fn handle_parse(args: ParseArgs) -> Result<()> {
    let json = curriculum_json(&args.file)?;

    if let Some(root) = args.output {
        let layout = OutputLayout::new(root);
        let path = write_file(layout.curriculum_dir(), layout.curriculum_json_file(), &json)
            .context("Failed writing curriculum JSON")?;
        eprintln!("✅ Curriculum saved to {}", path.display());
    }

    println!("{json}");
    Ok(())
}

/// Runs the extraction chain over a saved model response.
pub(crate) fn curriculum_json(file: &Path) -> Result<String> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed reading {}", file.display()))?;

    let extraction = curriculum::extract(&raw);
    if let Some(curriculum) = extraction.curriculum() {
        info!(
            source = extraction.source_label(),
            sections = curriculum.sections.len(),
            lectures = curriculum.lecture_count(),
            "curriculum parsed"
        );
    }
    let curriculum = extraction
        .into_result()
        .with_context(|| format!("No usable curriculum in {}", file.display()))?;

    Ok(serde_json::to_string_pretty(&curriculum)?)
}
