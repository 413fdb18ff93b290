use std::path::Path;

use anyhow::Result;

use crate::application::config::AppConfig;

/// Effective configuration as TOML, preceded by a comment naming its source.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn render_config(config: &AppConfig, source: Option<&Path>) -> Result<String> {
    let origin = source.map_or_else(
        || "# built-in defaults".to_string(),
        |path| format!("# {}", path.display()),
    );
    Ok(format!("{origin}\n{}", config.to_toml()?))
}

/// Print the effective configuration (file values plus command-line overrides).
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig, source: Option<&Path>) -> Result<()> {
    print!("{}", render_config(config, source)?);
    Ok(())
}
