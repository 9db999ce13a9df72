use super::{Config, LlmSettings, ModelSettings, OutputSettings};

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    llm: LlmSettings,
    models: ModelSettings,
    output: OutputSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_output<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut OutputSettings),
    {
        update(&mut self.output);
        self
    }

    pub fn build(self) -> Config {
        Config {
            llm: self.llm,
            models: self.models,
            output: self.output,
        }
    }
}
