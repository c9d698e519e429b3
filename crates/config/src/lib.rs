//! Layered configuration for wikidump.
//!
//! Sources are merged lowest to highest precedence:
//!
//! 1. Built-in defaults,
//! 2. a TOML file (either given explicitly, or `config.toml` in the platform
//!    configuration directory),
//! 3. environment variables prefixed with `WIKIDUMP_`, nested with `__`
//!    (e.g. `WIKIDUMP_DATABASE__HOST=db.internal`).
//!
//! Command-line flags are applied on top by the binary.

mod database;
pub mod error;

pub use crate::database::DatabaseConfig;
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "WIKIDUMP_";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
    pub convert: ConvertConfig,
}

/// Settings for `wikidump export`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Only export pages in this namespace (`0` is the main namespace).
    pub namespace: Option<i64>,
    /// Export at most this many pages.
    pub limit: Option<NonZeroU64>,
}
impl Default for ExportConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("pages"), namespace: None, limit: None }
    }
}

/// Settings for `wikidump convert`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}
impl Default for ConvertConfig {
    fn default() -> Self {
        Self { input_dir: PathBuf::from("pages"), output_dir: PathBuf::from("pages_md") }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// An explicitly requested file must exist; the default location is
    /// optional.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::Invalid(format!("config file not found: {}", path.display())));
                }
                Some(path.to_path_buf())
            },
            None => Self::default_path(),
        };
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading configuration file");
            figment = figment.merge(Toml::file_exact(file));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        figment.extract().or_raise(|| ErrorKind::Load)
    }

    /// Location of the configuration file when none is given explicitly.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wikidump").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Check the settings needed to connect to the database.
    ///
    /// Converting does not touch the database, so this is only called before
    /// an export.
    pub fn validate_database(&self) -> Result<()> {
        self.database.validate()
    }
}
