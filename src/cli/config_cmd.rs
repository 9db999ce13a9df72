use std::str::FromStr;

use anyhow::{Result, bail};

use crate::config::{Config, LlmProvider};

use super::args::ConfigArgs;
use super::util::mask_api_key;

/// Applies the given flags to `config` without persisting anything.
pub(crate) fn apply_config_args(args: &ConfigArgs, config: &mut Config) -> Result<()> {
    if let Some(provider) = &args.provider {
        config.set_provider(LlmProvider::from_str(provider)?);
    }

    if let Some(api_key) = &args.api_key {
        config.llm.api_key = api_key.clone();
    }

    if let Some(model) = &args.model {
        config.models.model = model.clone();
    }

    if let Some(max_tokens) = args.max_tokens {
        if max_tokens == 0 {
            bail!("Max tokens must be greater than zero.");
        }
        config.models.max_tokens = max_tokens;
    }

    if let Some(timeout) = args.timeout {
        config.llm.timeout_secs = timeout;
    }

    if let Some(temperature) = args.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            bail!("Temperature {temperature} is out of range (expected 0.0 to 2.0)");
        }
        config.models.temperature = temperature;
    }

    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }

    Ok(())
}

pub(crate) fn handle_config(args: ConfigArgs, config: &mut Config) -> Result<()> {
    if args.is_empty() {
        println!("📋 Current configuration ({}):", Config::config_path()?.display());
    } else {
        apply_config_args(&args, config)?;
        let path = config.save()?;
        println!("✅ Configuration saved to {}", path.display());
        println!("📋 Current configuration:");
    }

    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   Base URL: {}", config.llm.base_url);
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Model: {}", config.models.model);
    println!("   Temperature: {}", config.models.temperature);
    println!("   Max Tokens: {}", config.models.max_tokens);
    println!("   Output Directory: {}", config.output.directory.display());

    if config.llm.api_key.trim().is_empty() {
        println!(
            "⚠️  {} API key is not configured. Set {} or pass --api-key.",
            config.llm.provider.display_name(),
            config.llm.provider.api_key_env_var()
        );
    }

    Ok(())
}
