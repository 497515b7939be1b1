//! Settings
//!
//! File locations and the aggregation choice, resolved from defaults, a JSON
//! settings file, environment variables and finally command-line flags.
//! The resolved value is passed explicitly to [`crate::tools::summary::run`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::nutrition::{AggregationRequest, Granularity, UnitPolicy};

/// Environment variable naming the settings file
pub const SETTINGS_PATH_ENV: &str = "NUTRILOG_SETTINGS";
pub const CALORIE_CHANGES_PATH_ENV: &str = "NUTRILOG_CALORIE_CHANGES_PATH";
pub const FOOD_NUTRITION_PATH_ENV: &str = "NUTRILOG_FOOD_NUTRITION_PATH";

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";
pub const DEFAULT_DAILY_CALORIE_TARGET: f64 = 2000.0;

/// Values given on the command line, applied last
///
/// Granularity and unit policy stay as text so that a bad flag reports the
/// same error as a bad settings value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub calorie_changes_path: Option<PathBuf>,
    pub food_nutrition_path: Option<PathBuf>,
    pub granularity: Option<String>,
    pub unit_policy: Option<String>,
    pub daily_calorie_target: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub calorie_changes_path: PathBuf,
    #[serde(alias = "food_nutrition_file_path")]
    pub food_nutrition_path: PathBuf,
    pub granularity: Granularity,
    pub unit_policy: UnitPolicy,
    /// Daily calorie goal shown next to `day` totals
    pub daily_calorie_target: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calorie_changes_path: PathBuf::from("calorie_changes.csv"),
            food_nutrition_path: PathBuf::from("food_nutrition.csv"),
            granularity: Granularity::default(),
            unit_policy: UnitPolicy::default(),
            daily_calorie_target: DEFAULT_DAILY_CALORIE_TARGET,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| ConfigError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidSettings(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Load settings from the explicit path, `NUTRILOG_SETTINGS`, or
    /// `settings.json`, then apply environment overrides
    ///
    /// Only the implicit default file may be missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from);

        let mut settings = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_SETTINGS_PATH);
                    Self::default()
                }
            }
        };

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Override file paths from environment-style lookups
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(CALORIE_CHANGES_PATH_ENV) {
            self.calorie_changes_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(FOOD_NUTRITION_PATH_ENV) {
            self.food_nutrition_path = PathBuf::from(path);
        }
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(path) = overrides.calorie_changes_path {
            self.calorie_changes_path = path;
        }
        if let Some(path) = overrides.food_nutrition_path {
            self.food_nutrition_path = path;
        }
        if let Some(g) = overrides.granularity {
            self.granularity = g.parse()?;
        }
        if let Some(p) = overrides.unit_policy {
            self.unit_policy = p.parse()?;
        }
        if let Some(target) = overrides.daily_calorie_target {
            self.daily_calorie_target = target;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.daily_calorie_target.is_finite() && self.daily_calorie_target > 0.0) {
            return Err(ConfigError::InvalidSettings(format!(
                "daily_calorie_target must be positive, got {}",
                self.daily_calorie_target
            )));
        }
        Ok(())
    }

    /// The part of the settings the nutrition core sees
    pub fn request(&self) -> AggregationRequest {
        AggregationRequest {
            granularity: self.granularity,
            unit_policy: self.unit_policy,
        }
    }
}
