// ── Dialog configuration ──────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\<app>\dialogs.json`.
// No `unsafe`: pure safe Rust + serde_json.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DialogError, Result};
use crate::strings::{IDS_APP_NAME, IDS_ERROR, IDS_FATAL_ERROR};

// ── Format version ────────────────────────────────────────────────────────────

const CONFIG_VERSION: u32 = 1;

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Settings shared by both adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub version: u32,
    /// Row holding the application name (caption and default heading).
    pub app_name_id: u32,
    /// Row holding the "Error" heading.
    pub error_id: u32,
    /// Row holding the "Fatal Error" heading.
    pub fatal_error_id: u32,
    /// Directory the process is returned to after every file dialog.
    pub user_data_dir: PathBuf,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name_id: IDS_APP_NAME,
            error_id: IDS_ERROR,
            fatal_error_id: IDS_FATAL_ERROR,
            user_data_dir: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl DialogConfig {
    /// Defaults with an explicit user-data directory.
    pub fn with_user_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            user_data_dir: dir.into(),
            ..Self::default()
        }
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return `%APPDATA%\<app_dir>\dialogs.json`.
///
/// Returns `None` if the `APPDATA` environment variable is not set.
pub fn config_path(app_dir: &str) -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push(app_dir);
    p.push("dialogs.json");
    Some(p)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `config` as pretty JSON, creating the parent directory if needed.
pub fn save_to(path: &Path, config: &DialogConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse a config file.  Missing fields take their defaults; an
/// unrecognised version is rejected.
pub fn load_from(path: &Path) -> Result<DialogConfig> {
    let data = fs::read(path)?;
    let cfg: DialogConfig = serde_json::from_slice(&data)?;
    if cfg.version != CONFIG_VERSION {
        return Err(DialogError::UnsupportedVersion(cfg.version));
    }
    Ok(cfg)
}

/// Load the config for `app_dir`, falling back to defaults on any error.
pub fn load(app_dir: &str) -> DialogConfig {
    let Some(path) = config_path(app_dir) else {
        return DialogConfig::default();
    };
    match load_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::debug!("Config: using defaults ({}: {e})", path.display());
            DialogConfig::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
