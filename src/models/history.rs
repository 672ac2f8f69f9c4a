use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProjectorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAirdrop {
    pub rank: u32,
    pub name: String,
    pub value_raw: Decimal,
    pub date: Option<NaiveDate>,
}

impl HistoricalAirdrop {
    pub fn value_usd(&self) -> f64 {
        self.value_raw.to_f64().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    /// `None` for the live projection, which is shown unranked.
    pub rank: Option<u32>,
    pub name: String,
    pub value_usd: f64,
    pub date: Option<NaiveDate>,
    pub is_current: bool,
}

impl ComparisonEntry {
    pub fn rank_label(&self) -> String {
        match self.rank {
            Some(rank) => rank.to_string(),
            None => "??".to_string(),
        }
    }

    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolInfo {
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProtocolInfo {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ProjectorError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ProjectorError::InvalidInput {
                    field: "end_date".to_string(),
                    message: format!("{} is before start date {}", end, start),
                });
            }
        }
        Ok(())
    }

    /// One-line description, e.g. `Uniswap, 2024-01-01 to 2024-03-01 (60 days)`.
    pub fn summary(&self) -> String {
        let name = if self.name.trim().is_empty() {
            "Unnamed protocol"
        } else {
            self.name.trim()
        };
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string());

        match (self.start_date, self.end_date) {
            (None, None) => name.to_string(),
            (start, end) => {
                let mut label = format!("{}, {} to {}", name, date(start), date(end));
                if let Some(days) = self.window_days() {
                    label.push_str(&format!(" ({} days)", days));
                }
                label
            }
        }
    }

    /// Days covered by the activity window, when both ends are set and ordered.
    pub fn window_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end >= start => Some((end - start).num_days()),
            _ => None,
        }
    }
}
