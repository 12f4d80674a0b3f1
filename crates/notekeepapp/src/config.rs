//! # Configuration
//!
//! Layered loading via [`confique`]: environment variables override the TOML
//! config file, which overrides compiled defaults. The store backend is
//! picked here, explicitly, at startup.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `local` | Which store backend to use: `local` or `remote` |
//! | `data_file` | OS data dir + `notes.json` | Path of the local JSON blob |
//! | `listen_addr` | `127.0.0.1:5000` | Address `notekeep serve` binds to |
//! | `remote.base_url` | `http://127.0.0.1:5000/api` | Base URL of a running server |
//! | `remote.timeout_secs` | `10` | Per-request timeout for the remote store |

use std::path::{Path, PathBuf};

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Remote,
}

#[derive(Config, Debug, Clone)]
pub struct AppConfig {
    /// Which store backend to use.
    #[config(default = "local", env = "NOTEKEEP_BACKEND")]
    pub backend: Backend,

    /// Path of the local JSON blob. Defaults under the OS data directory.
    #[config(env = "NOTEKEEP_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Address the API server binds to.
    #[config(default = "127.0.0.1:5000", env = "NOTEKEEP_LISTEN_ADDR")]
    pub listen_addr: String,

    #[config(nested)]
    pub remote: RemoteConfig,
}

#[derive(Config, Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of a running notekeep server, including the API prefix.
    #[config(default = "http://127.0.0.1:5000/api", env = "NOTEKEEP_REMOTE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[config(default = 10)]
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from env + the given file (or the default config
    /// location when none is given) + defaults, in that priority order.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let file = file
            .map(Path::to_path_buf)
            .or_else(default_config_file);
        let mut builder = AppConfig::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// Resolved path of the local blob.
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_file)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "notekeep")
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("notekeep.toml"))
}

fn default_data_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("notes.json"))
        .unwrap_or_else(|| PathBuf::from("notes.json"))
}
