use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

use crate::models::{ActivityType, BaseDistribution, BasicParams, ValuationParams};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub basic: BasicParams,
    pub valuation: ValuationParams,
    pub activities: ActivitySettings,
    pub allocation: BaseDistribution,
    pub sliders: SliderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

/// Defaults for rows in the advanced activity table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySettings {
    /// Rows below this count cannot be deleted.
    pub min_rows: usize,
    pub initial_type: ActivityType,
    pub initial_unit: String,
    pub added_type: ActivityType,
    pub added_unit: String,
    pub default_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    pub fn step_up(&self, value: f64) -> f64 {
        self.clamp(value + self.step)
    }

    pub fn step_down(&self, value: f64) -> f64 {
        self.clamp(value - self.step)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderSettings {
    pub total_activities: SliderRange,
    pub user_activity_percentage: SliderRange,
    pub activity_weight: SliderRange,
    pub airdrop_percentage: SliderRange,
    pub fdv: SliderRange,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Drop Zone".to_string(),
                log_level: "info".to_string(),
            },
            basic: BasicParams::default(),
            valuation: ValuationParams::default(),
            activities: ActivitySettings {
                min_rows: 0,
                initial_type: ActivityType::Transactions,
                initial_unit: "tx".to_string(),
                added_type: ActivityType::Custom,
                added_unit: String::new(),
                default_weight: 1.0,
            },
            allocation: BaseDistribution::default(),
            sliders: SliderSettings {
                total_activities: SliderRange::new(100_000.0, 100_000_000.0, 10_000.0),
                user_activity_percentage: SliderRange::new(0.0001, 1.0, 0.0001),
                activity_weight: SliderRange::new(0.5, 3.0, 0.1),
                airdrop_percentage: SliderRange::new(1.0, 30.0, 0.1),
                fdv: SliderRange::new(100_000_000.0, 20_000_000_000.0, 10_000_000.0),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("DROPZONE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        self.allocation.validate()?;

        let sliders = [
            ("total_activities", &self.sliders.total_activities),
            ("user_activity_percentage", &self.sliders.user_activity_percentage),
            ("activity_weight", &self.sliders.activity_weight),
            ("airdrop_percentage", &self.sliders.airdrop_percentage),
            ("fdv", &self.sliders.fdv),
        ];
        for (name, range) in sliders {
            if !(range.min <= range.max) || !(range.step > 0.0) {
                return Err(format!("Slider range for {} is invalid", name));
            }
        }

        let defaults = [
            ("total_activities", &self.sliders.total_activities, self.basic.total_activities),
            (
                "user_activity_percentage",
                &self.sliders.user_activity_percentage,
                self.basic.user_activity_percentage,
            ),
            ("activity_weight", &self.sliders.activity_weight, self.basic.activity_weight),
            (
                "airdrop_percentage",
                &self.sliders.airdrop_percentage,
                self.valuation.airdrop_percentage,
            ),
            ("fdv", &self.sliders.fdv, self.valuation.fdv),
        ];
        for (name, range, value) in defaults {
            if !range.contains(value) {
                return Err(format!(
                    "Default {} ({}) lies outside its slider range [{}, {}]",
                    name, value, range.min, range.max
                ));
            }
        }

        if self.sliders.airdrop_percentage.min <= 0.0 || self.sliders.airdrop_percentage.max > 100.0 {
            return Err("Airdrop percentage range must lie within (0, 100]".to_string());
        }

        if self.valuation.airdrop_percentage <= 0.0 || self.valuation.airdrop_percentage > 100.0 {
            return Err("Default airdrop percentage must be between 0 and 100".to_string());
        }

        if self.valuation.fdv < 0.0 {
            return Err("Default FDV must be non-negative".to_string());
        }

        if self.basic.user_activity_percentage < 0.0 || self.basic.user_activity_percentage > 100.0 {
            return Err("Default user activity percentage must be between 0 and 100".to_string());
        }

        if !(self.activities.default_weight >= 0.0) {
            return Err("Default activity weight must be non-negative".to_string());
        }

        // Added rows must not collide with each other.
        if !self.activities.added_type.is_repeatable() {
            return Err(format!(
                "Added row type must be repeatable, got {}",
                self.activities.added_type
            ));
        }

        Ok(())
    }
}
