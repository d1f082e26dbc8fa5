//! Handler functions for config CLI commands.
//!
//! Implements `qiita-mcp config {path,show}`.

use crate::cli::ConfigAction;
use crate::config::QiitaConfig;
use qiita_core::{Error, Result};

/// Handle a config subcommand.
///
/// Receives the raw `--config` path because `path` works before a config
/// file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = QiitaConfig::load(config_path)?;
            println!("{}", render_config(&config)?);
            Ok(())
        }
    }
}

/// Show the resolved config file path.
fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match QiitaConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; built-in defaults apply)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Render a config as TOML with the access token masked.
pub fn render_config(config: &QiitaConfig) -> Result<String> {
    config.redacted().to_toml_string()
}
