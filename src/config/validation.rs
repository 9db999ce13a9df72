use anyhow::{Result, anyhow};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        return Err(anyhow!(
            "{} API key not found. Set {} or run `coursesmith config --api-key <KEY>` (writes {})",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        ));
    }

    if !(0.0..=2.0).contains(&config.models.temperature) {
        return Err(anyhow!(
            "Temperature {} is out of range (expected 0.0 to 2.0)",
            config.models.temperature
        ));
    }

    if config.models.max_tokens == 0 {
        return Err(anyhow!("max_tokens must be greater than zero"));
    }

    Ok(())
}
