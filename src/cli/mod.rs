pub mod fields;
pub mod init;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};

use mascara::MascaraConfig;

/// Settings from `--config` (or `./mascara.toml`), with `--profile` applied.
pub fn load_settings(config: Option<&Path>, profile: Option<&str>) -> Result<MascaraConfig> {
    let settings = match config {
        Some(path) => MascaraConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => MascaraConfig::load().context("Failed to load mascara.toml")?,
    };

    let Some(profile) = profile else {
        return Ok(settings);
    };
    if !settings.profiles.contains_key(profile) {
        anyhow::bail!("Unknown configuration profile '{profile}'");
    }
    let settings = settings.with_profile(profile);
    settings.validate()?;
    Ok(settings)
}
