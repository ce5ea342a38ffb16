use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_FILE: &str = "neuroscan";
const PATH_ENV: &str = "NEUROSCAN_CONFIG";
const ENV_PREFIX: &str = "NEUROSCAN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upload: UploadConfig,
    pub dashboard: DashboardConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub tick_interval_ms: u64,
    pub completion_timeout_ms: u64,
    /// Upper bound (exclusive) of the random progress step per tick.
    pub max_increment: f32,
    pub max_file_bytes: u64,
    pub accepted_extensions: Vec<String>,
    pub validate: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            completion_timeout_ms: 3000,
            max_increment: 30.0,
            max_file_bytes: 100 * 1024 * 1024,
            accepted_extensions: ["dcm", "nii", "png", "jpg", "jpeg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            validate: true,
        }
    }
}

impl UploadConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(self.completion_timeout_ms)
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tick_interval_ms: u64,
    pub max_increment: f32,
    /// A draw above this value reports a detected tumor.
    pub detection_threshold: f64,
    pub seed_demo_jobs: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            max_increment: 5.0,
            detection_threshold: 0.3,
            seed_demo_jobs: true,
        }
    }
}

impl DashboardConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notification_ttl_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: 4000,
            window_width: 1100.0,
            window_height: 860.0,
        }
    }
}

impl UiConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

impl AppConfig {
    /// Loads `neuroscan.toml` (or the file named by `NEUROSCAN_CONFIG`), then
    /// `NEUROSCAN__SECTION__KEY` environment overrides.
    pub fn load() -> Result<Self> {
        let file = match std::env::var(PATH_ENV) {
            Ok(path) => config::File::with_name(&path),
            Err(_) => config::File::with_name(DEFAULT_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        let cfg: AppConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.upload.tick_interval_ms == 0 || self.dashboard.tick_interval_ms == 0 {
            return Err(AppError::InvalidConfig(
                "tick intervals must be greater than zero".to_string(),
            ));
        }
        if self.upload.completion_timeout_ms == 0 {
            return Err(AppError::InvalidConfig(
                "upload.completion_timeout_ms must be greater than zero".to_string(),
            ));
        }
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.upload.max_increment) || !positive(self.dashboard.max_increment) {
            return Err(AppError::InvalidConfig(
                "progress increments must be positive finite numbers".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.dashboard.detection_threshold) {
            return Err(AppError::InvalidConfig(format!(
                "dashboard.detection_threshold must be within [0, 1], got {}",
                self.dashboard.detection_threshold
            )));
        }
        Ok(())
    }
}
