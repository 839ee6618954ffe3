//! Rotator settings loader.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/rotator.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-dev-fusion/rotator.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/rotator.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-dev-fusion/rotator.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
const DEFAULT_CATALOG_PATH: &str = "banners.yaml";
const DEFAULT_SAMPLE_SIZE: usize = 3;
const DEFAULT_SIMULATE_TRIALS: usize = 10_000;
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged rotator settings; every field is optional in the files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RotatorSettings {
    /// Banner rotation settings.
    #[serde(default)]
    pub rotation: RotationSettings,
}

/// `rotation:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RotationSettings {
    /// Banner catalog file (YAML or JSON).
    pub catalog_path: Option<String>,
    /// Sample size when `sample` gets no `--count`.
    pub default_sample_size: Option<usize>,
    /// Fixed RNG seed for reproducible rotation.
    pub seed: Option<u64>,
    /// Trial count for `simulate`.
    pub simulate_trials: Option<usize>,
}

impl RotatorSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            rotation: self.rotation.merge(overlay.rotation),
        }
    }

    /// Catalog path, falling back to `banners.yaml`.
    ///
    /// Relative paths resolve against `PRJ_ROOT` (or the current directory).
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path_from(&project_root())
    }

    #[doc(hidden)]
    #[must_use]
    pub fn catalog_path_from(&self, project_root: &Path) -> PathBuf {
        let configured = self
            .rotation
            .catalog_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_CATALOG_PATH);
        absolutize(project_root, PathBuf::from(configured))
    }

    /// Sample size, falling back to 3.
    #[must_use]
    pub fn default_sample_size(&self) -> usize {
        self.rotation
            .default_sample_size
            .unwrap_or(DEFAULT_SAMPLE_SIZE)
    }

    /// Simulation trials, falling back to 10 000.
    #[must_use]
    pub fn simulate_trials(&self) -> usize {
        self.rotation
            .simulate_trials
            .unwrap_or(DEFAULT_SIMULATE_TRIALS)
    }
}

impl RotationSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            catalog_path: overlay.catalog_path.or(self.catalog_path),
            default_sample_size: overlay.default_sample_size.or(self.default_sample_size),
            seed: overlay.seed.or(self.seed),
            simulate_trials: overlay.simulate_trials.or(self.simulate_trials),
        }
    }
}

/// Load merged rotator settings (user overrides system).
#[must_use]
pub fn load_rotator_settings() -> RotatorSettings {
    let (system_path, user_path) = rotator_settings_paths();
    load_rotator_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
#[must_use]
pub fn rotator_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_rotator_settings_from_paths(system: &Path, user: &Path) -> RotatorSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RotatorSettings {
    if !path.exists() {
        return RotatorSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RotatorSettings::default();
        }
    };
    match serde_yaml::from_str::<RotatorSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RotatorSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
