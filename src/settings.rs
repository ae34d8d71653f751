use crate::config::{DonutConfig, RenderMode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional overrides read from `config.toml`. Every field may be omitted.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub r1: Option<f64>,
    pub r2: Option<f64>,
    pub k1: Option<f64>,
    pub k2: Option<f64>,
    pub a_step: Option<f64>,
    pub b_step: Option<f64>,
    pub theta_step: Option<f64>,
    pub phi_step: Option<f64>,
    pub shading: Option<String>,
    pub benchmark: Option<bool>,
    pub frames: Option<usize>,
    pub mode: Option<RenderMode>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    /// Load settings, falling back to defaults on any problem.
    ///
    /// An explicit path that does not exist is worth a warning; a missing
    /// default file is not.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Self::default();
                }
                path
            }
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termdonut")
            .join("config.toml")
    }

    /// Overlay the fields present in the file onto `cfg`
    pub fn apply(&self, cfg: &mut DonutConfig) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if let Some(v) = self.$field {
                    cfg.$field = v;
                })*
            };
        }
        overlay!(width, height, r1, r2, k1, k2, a_step, b_step, theta_step, phi_step, benchmark, frames, mode);

        if let Some(shading) = &self.shading {
            cfg.shading = shading.chars().collect();
        }
    }
}
