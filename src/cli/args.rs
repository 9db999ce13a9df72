use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `coursesmith` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "coursesmith",
    about = "Generate a complete course (curriculum, lectures, slides) with an LLM",
    version,
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: design, lectures, slides, report.
    Run(RunArgs),
    /// Parse a saved curriculum response and print it as JSON.
    Parse(ParseArgs),
    /// Regenerate slide decks from lecture files already on disk.
    Slides(SlidesArgs),
    /// Update and persist settings.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON file with course_title, course_subtitle, description_points,
    /// target_audience and course_goal.
    #[arg(long)]
    pub inputs: Option<PathBuf>,

    /// Course title (overrides the inputs file).
    #[arg(long)]
    pub title: Option<String>,

    /// Course subtitle (overrides the inputs file).
    #[arg(long)]
    pub subtitle: Option<String>,

    /// Description point; repeat for several (replaces the file's list).
    #[arg(long = "point")]
    pub points: Vec<String>,

    /// Target audience (overrides the inputs file).
    #[arg(long)]
    pub audience: Option<String>,

    /// Main course goal (overrides the inputs file).
    #[arg(long)]
    pub goal: Option<String>,

    /// Output root directory (defaults to the configured one).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML file replacing the steps of the design, content or slides crews.
    #[arg(long)]
    pub crews: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// File holding a raw model response.
    pub file: PathBuf,

    /// Also write course_curriculum.json under this output root.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SlidesArgs {
    /// Audience description passed to the slide crew.
    #[arg(long, default_value = "General audience")]
    pub audience: String,

    /// Output root holding lectures/ (defaults to the configured one).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML file whose `slides` steps replace the built-in slide crew.
    #[arg(long)]
    pub crews: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// LLM provider (openai or openrouter).
    #[arg(long)]
    pub provider: Option<String>,

    /// Set the API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Set the chat model
    #[arg(long)]
    pub model: Option<String>,

    /// Set max tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Set timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Set sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Set the default output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
            && self.api_key.is_none()
            && self.model.is_none()
            && self.max_tokens.is_none()
            && self.timeout.is_none()
            && self.temperature.is_none()
            && self.output_dir.is_none()
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        commands::run(self).await
    }
}
