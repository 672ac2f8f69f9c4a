use serde::{Deserialize, Serialize};

use super::{ActivityRow, ActivityType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicParams {
    pub total_activities: f64,
    /// Percent of all protocol activity, so 0.01 means 0.01%.
    pub user_activity_percentage: f64,
    pub activity_weight: f64,
}

impl Default for BasicParams {
    fn default() -> Self {
        Self {
            total_activities: 1_500_000.0,
            user_activity_percentage: 0.01,
            activity_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShareMode {
    #[default]
    Basic,
    Advanced,
}

impl ShareMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareMode::Basic => "Basic",
            ShareMode::Advanced => "Advanced",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ShareMode::Basic => ShareMode::Advanced,
            ShareMode::Advanced => ShareMode::Basic,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ShareInput<'a> {
    Basic(BasicParams),
    Advanced(&'a [ActivityRow]),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub activity_type: ActivityType,
    /// Share of the weighted pool, in percent, before participant dilution.
    pub percentage_of_pool: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareResult {
    pub raw_total_protocol_activities: f64,
    /// Post-dilution fraction of the airdrop pool.
    pub user_share: f64,
    pub breakdown: Vec<BreakdownEntry>,
    pub mode: ShareMode,
}

impl ShareResult {
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|b| b.percentage_of_pool).sum()
    }
}
