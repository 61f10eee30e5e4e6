//! Configuration management.
//!
//! Loads and saves settings under `~/.taskflow/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{BoardConfig, ColorSetting, Config, GeneralConfig, LoggingConfig};
