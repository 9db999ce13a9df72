use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;

use super::constants::{CONFIG_DIR, CONFIG_FILE};
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;
use super::{Config, ConfigBuilder};

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads defaults, the config file (if present) and environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            debug!(path = %path.display(), "loading config file");
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;
        Ok(builder.build())
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    /// Switches provider, resetting the base URL to the provider default.
    pub fn set_provider(&mut self, provider: LlmProvider) {
        if self.llm.provider != provider {
            self.llm.provider = provider;
            self.llm.base_url = provider.default_base_url().to_string();
        }
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let provider = self
            .llm
            .provider
            .as_deref()
            .map(str::parse::<LlmProvider>)
            .transpose()
            .context("Invalid provider in config file")?;

        let llm = self.llm;
        let builder = builder.with_llm(|settings| {
            if let Some(provider) = provider {
                if settings.provider != provider {
                    settings.provider = provider;
                    settings.base_url = provider.default_base_url().to_string();
                }
            }
            if let Some(api_key) = llm.api_key {
                settings.api_key = api_key;
            }
            if let Some(timeout) = llm.timeout_secs {
                settings.timeout_secs = timeout;
            }
            if let Some(base_url) = llm.base_url {
                settings.base_url = base_url;
            }
            if let Some(user_agent) = llm.user_agent {
                settings.user_agent = user_agent;
            }
        });

        let models = self.models;
        let builder = builder.with_models(|settings| {
            if let Some(model) = models.model {
                settings.model = model;
            }
            if let Some(temperature) = models.temperature {
                settings.temperature = temperature;
            }
            if let Some(max_tokens) = models.max_tokens {
                settings.max_tokens = max_tokens;
            }
        });

        let output = self.output;
        Ok(builder.with_output(|settings| {
            if let Some(directory) = output.directory {
                settings.directory = directory;
            }
        }))
    }
}
