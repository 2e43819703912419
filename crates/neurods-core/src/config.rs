//! Course paths and on-disk configuration.
//!
//! The course image used to hard-code a shared dataset root; here the paths
//! are an explicit value handed to the fetcher and the loaders, so tests can
//! substitute their own without process-wide side effects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Per-modality dataset directories under the shared course root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDirs {
    pub eeg: PathBuf,
    pub ecog: PathBuf,
    pub fmri: PathBuf,
}

/// Filesystem locations used by the fetcher and the loaders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePaths {
    /// Default root for downloaded files.
    pub data_root: PathBuf,
    /// Scratch directory for archive downloads.
    pub scratch_dir: PathBuf,
    /// Shared dataset directories, per modality.
    pub datasets: DatasetDirs,
}

impl Default for CoursePaths {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let shared = PathBuf::from("/data/shared/cogneuro88");
        Self {
            data_root: home.join("data"),
            scratch_dir: home.join("tmp"),
            datasets: DatasetDirs {
                eeg: shared.join("eeg"),
                ecog: shared.join("ecog"),
                fmri: shared.join("fMRI"),
            },
        }
    }
}

impl CoursePaths {
    /// Create the download root and scratch dir if they are missing. Idempotent.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.data_root, &self.scratch_dir] {
            if !dir.is_dir() {
                tracing::info!("creating folder {}", dir.display());
                fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
            }
        }
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/neurods/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Branch of the course repository `update` installs from.
    pub update_branch: String,
    /// Path overrides; if missing, defaults under the user home are used.
    #[serde(default)]
    pub paths: Option<CoursePaths>,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            update_branch: "student-sp2017".to_string(),
            paths: None,
        }
    }
}

impl CourseConfig {
    /// Effective paths: the configured override, or the defaults.
    pub fn paths(&self) -> CoursePaths {
        self.paths.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("neurods")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CourseConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CourseConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CourseConfig = toml::from_str(&data)?;
    Ok(cfg)
}
