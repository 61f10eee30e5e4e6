//! `taskflow config`.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::TaskflowError;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be read or written.
pub fn config(
    paths: &Paths,
    settings: &Config,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, TaskflowError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(settings)?),
            OutputFormat::Pretty => settings.to_yaml(),
        },
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(TaskflowError::Config(format!(
                    "{} already exists; pass --force to overwrite",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!("Wrote {}", paths.config_file.display()))
        },
    }
}
