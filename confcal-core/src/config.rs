//! Generator configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ConfCalError, ConfCalResult};
use crate::event::{EventDefaults, EventInput};
use crate::utils::expand_path;

static DEFAULT_OUTPUT_DIR: &str = ".";

/// Configuration at ~/.config/confcal/config.toml, overridable with
/// `CONFCAL_*` environment variables (nested keys joined with `__`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where generated .ics files are written
    pub output_dir: PathBuf,

    /// Domain part of generated UIDs
    pub uid_domain: String,

    pub product_id: String,

    /// IANA zone used to read timestamps that carry no offset
    pub timezone: String,

    /// Fallbacks for fields an event leaves out
    pub defaults: EventDefaults,

    /// The featured event generated by the interactive and demo flows
    pub event: EventInput,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            uid_domain: "ai.engineer".into(),
            product_id: "-//AI Engineer Summit//Calendar Event Generator//EN".into(),
            timezone: "UTC".into(),
            defaults: EventDefaults::default(),
            event: EventInput::ai_engineer_summit(),
        }
    }
}

impl GeneratorConfig {
    pub fn config_path() -> ConfCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfCalError::Config("Could not determine config directory".into()))?
            .join("confcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path` layered with the environment. A missing file is not
    /// an error.
    pub fn load_from(path: &Path) -> ConfCalResult<Self> {
        let config: GeneratorConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("CONFCAL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ConfCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfCalError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output_dir.to_string_lossy())
    }

    pub fn tz(&self) -> ConfCalResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfCalError::Config(format!("Unknown time zone '{}'", self.timezone)))
    }
}
