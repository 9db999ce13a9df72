use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use crate::client::{AIClient, ChatCompletionRequest, ChatMessage, DynLlmClient};
use crate::config::{Config, ModelSettings};

use super::{ContentGenerator, GenerationInputs, RoleConfig, TaskSpec, render};

/// [`ContentGenerator`] backed by a chat completion model.
pub struct LlmGenerator {
    client: Arc<DynLlmClient>,
    models: ModelSettings,
}

impl LlmGenerator {
    pub fn new(client: Arc<DynLlmClient>, models: ModelSettings) -> Self {
        Self { client, models }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = AIClient::new(&config.llm)?;
        Ok(Self::new(Arc::new(client), config.models.clone()))
    }

    fn build_request(
        &self,
        role: &RoleConfig,
        task: &TaskSpec,
        inputs: &GenerationInputs,
    ) -> ChatCompletionRequest {
        let mut prompt = render(&task.description, inputs);
        if !task.expected_output.is_empty() {
            prompt.push_str("\n\nExpected output: ");
            prompt.push_str(&task.expected_output);
        }

        ChatCompletionRequest {
            model: self.models.model.clone(),
            messages: vec![ChatMessage::system(role.system_prompt()), ChatMessage::user(prompt)],
            max_tokens: Some(self.models.max_tokens),
            temperature: Some(self.models.temperature),
        }
    }
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    async fn generate(
        &self,
        role: &RoleConfig,
        task: &TaskSpec,
        inputs: &GenerationInputs,
    ) -> Result<String> {
        let request = self.build_request(role, task, inputs);
        let response = self
            .client
            .chat_completion(request)
            .await
            .with_context(|| format!("Model call for {} failed", role.role))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Model returned no choices for {}", role.role))?;

        Ok(choice.message.content)
    }
}
