use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::presets::{PRESET_DEFAULT, PRESET_DEVELOPMENT, PRESET_STRICT};

pub fn run_init(preset: &str, force: bool) -> Result<()> {
    let config_path = PathBuf::from("mascara.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "mascara.toml already exists. Use --force to overwrite the existing configuration."
        );
    }

    let contents = match preset {
        "strict" => PRESET_STRICT,
        "development" => PRESET_DEVELOPMENT,
        _ => PRESET_DEFAULT,
    };

    fs::write(&config_path, contents)
        .with_context(|| format!("Failed to write configuration to {}", config_path.display()))?;

    println!(
        "mascara.toml created with '{}' preset at {}",
        preset,
        config_path.display()
    );

    Ok(())
}
