use anyhow::Result;
use colored::*;

use crate::config::Config;
use crate::generation::LlmGenerator;
use crate::pipeline::regenerate_slides;

use super::args::SlidesArgs;
use super::util;

pub(crate) async fn handle_slides(args: SlidesArgs, config: &Config) -> Result<()> {
    let layout = util::output_layout(args.output, config);
    let crews = util::course_crews(args.crews.as_deref())?;
    let generator = LlmGenerator::from_config(config)?;

    println!(
        "🎞️  Regenerating slides from {}",
        layout.lectures_root().display()
    );

    let report = regenerate_slides(&generator, &crews.slides, &layout, &args.audience).await?;

    println!(
        "{}",
        format!("✅ {} slide deck(s) written", report.generated.len()).green()
    );
    for path in &report.generated {
        println!("   {}", path.display());
    }
    if !report.skipped.is_empty() {
        println!(
            "{}",
            format!("⚠️  {} lecture(s) skipped", report.skipped.len()).yellow()
        );
        for path in &report.skipped {
            println!("   {}", path.display());
        }
    }

    Ok(())
}
