mod types;

pub use types::*;

use crate::variants::VariantRegistry;
use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./clipforge.toml",
        "~/.config/clipforge/config.toml",
        "/etc/clipforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.pipeline.concurrency == 0 {
        anyhow::bail!("pipeline.concurrency cannot be 0");
    }

    if config.pipeline.timeout_secs == 0 {
        anyhow::bail!("pipeline.timeout_secs cannot be 0");
    }

    if config.distribution.channels.is_empty() {
        anyhow::bail!("distribution.channels must name at least one target channel");
    }

    // Surface catalog problems (duplicate ids, bad rates) at load time.
    VariantRegistry::from_specs(config.variants.clone())?;

    Ok(())
}

impl Config {
    /// The variant catalog this configuration selects.
    pub fn registry(&self) -> Result<VariantRegistry> {
        VariantRegistry::from_specs(self.variants.clone())
    }
}
