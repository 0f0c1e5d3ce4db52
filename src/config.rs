// Runtime configuration
//
// All endpoints and the output directory are explicit configuration, passed
// into clients and commands by the caller. Loadable from a TOML file and
// overridable from the CLI; no process-wide state.

use crate::error::IntelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILES_DIR: &str = "./files";
pub const NVD_API_BASE: &str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
pub const CTI_RAW_BASE: &str = "https://raw.githubusercontent.com/mitre/cti";
pub const CTI_TAGS_URL: &str = "https://api.github.com/repos/mitre/cti/git/refs/tags";
pub const ATLAS_RAW_BASE: &str = "https://raw.githubusercontent.com/mitre-atlas/atlas-data";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub nvd: NvdSettings,
    #[serde(default)]
    pub cti: CtiSettings,
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory JSON dumps are written to
    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            files_dir: default_files_dir(),
        }
    }
}

/// NVD API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NvdSettings {
    #[serde(default = "default_nvd_api_base")]
    pub api_base: String,
    /// API key for the higher NVD rate-limit tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for NvdSettings {
    fn default() -> Self {
        Self {
            api_base: default_nvd_api_base(),
            api_key: None,
        }
    }
}

/// MITRE CTI endpoints (ATT&CK bundles, release tags, ATLAS data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtiSettings {
    #[serde(default = "default_attack_base")]
    pub attack_base: String,
    #[serde(default = "default_tags_url")]
    pub tags_url: String,
    #[serde(default = "default_atlas_base")]
    pub atlas_base: String,
}

impl Default for CtiSettings {
    fn default() -> Self {
        Self {
            attack_base: default_attack_base(),
            tags_url: default_tags_url(),
            atlas_base: default_atlas_base(),
        }
    }
}

fn default_files_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FILES_DIR)
}

fn default_nvd_api_base() -> String {
    NVD_API_BASE.to_string()
}

fn default_attack_base() -> String {
    CTI_RAW_BASE.to_string()
}

fn default_tags_url() -> String {
    CTI_TAGS_URL.to_string()
}

fn default_atlas_base() -> String {
    ATLAS_RAW_BASE.to_string()
}

impl IntelConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, IntelError> {
        let content = fs::read_to_string(path).map_err(|source| IntelError::FileSystemError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Effective configuration: file if provided, defaults otherwise,
    /// then CLI overrides on top.
    pub fn resolve(args: &crate::cli::Args) -> Result<Self, IntelError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(dir) = &args.output.files_dir {
            config.output.files_dir = dir.clone();
        }

        Ok(config)
    }

    /// Write an example configuration file with the default values.
    pub fn create_example(path: &Path) -> Result<(), IntelError> {
        let content = toml::to_string_pretty(&IntelConfig::default()).map_err(|e| {
            IntelError::ConfigError {
                message: e.to_string(),
            }
        })?;
        fs::write(path, content).map_err(|source| IntelError::FileSystemError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
