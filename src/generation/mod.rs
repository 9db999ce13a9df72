//! Content generation collaborators.
//!
//! A [`ContentGenerator`] turns one role + task + inputs triple into text. A
//! [`CrewSpec`] chains several of those calls, handing each step the previous
//! step's output.

mod crew_file;
mod llm;
mod roles;
mod template;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

pub use crew_file::CrewFile;
pub use llm::LlmGenerator;
pub use roles::{CrewSpec, CrewStep, RoleConfig, TaskSpec};
pub use template::render;

/// Named string inputs interpolated into task templates.
pub type GenerationInputs = BTreeMap<String, String>;

/// Key under which a crew step receives the output of the step before it.
pub const PREVIOUS_OUTPUT_KEY: &str = "previous_output";

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        role: &RoleConfig,
        task: &TaskSpec,
        inputs: &GenerationInputs,
    ) -> Result<String>;
}

/// Runs every step of `crew` in order and returns the last step's output.
pub async fn run_crew(
    generator: &dyn ContentGenerator,
    crew: &CrewSpec,
    inputs: &GenerationInputs,
) -> Result<String> {
    let mut step_inputs = inputs.clone();
    let mut output = String::new();

    for (position, step) in crew.steps.iter().enumerate() {
        debug!(crew = crew.name, role = %step.role.role, step = position + 1, "running crew step");
        output = generator
            .generate(&step.role, &step.task, &step_inputs)
            .await
            .with_context(|| format!("{} crew step '{}' failed", crew.name, step.role.role))?;
        step_inputs.insert(PREVIOUS_OUTPUT_KEY.to_string(), output.clone());
    }

    Ok(output)
}

/// Builds a [`GenerationInputs`] map from `(key, value)` pairs.
pub fn inputs<I, K, V>(pairs: I) -> GenerationInputs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
