use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationCategory {
    Airdrop,
    Team,
    Investors,
    Treasury,
    EcosystemDev,
}

impl AllocationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationCategory::Airdrop => "Airdrop",
            AllocationCategory::Team => "Team",
            AllocationCategory::Investors => "Investors",
            AllocationCategory::Treasury => "Treasury",
            AllocationCategory::EcosystemDev => "Ecosystem Dev",
        }
    }
}

/// Token split among non-airdrop categories before rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseDistribution {
    pub team: f64,
    pub investors: f64,
    pub treasury: f64,
    pub ecosystem_dev: f64,
}

impl Default for BaseDistribution {
    fn default() -> Self {
        Self {
            team: 15.0,
            investors: 15.0,
            treasury: 20.0,
            ecosystem_dev: 30.0,
        }
    }
}

impl BaseDistribution {
    pub fn total(&self) -> f64 {
        self.team + self.investors + self.treasury + self.ecosystem_dev
    }

    pub fn entries(&self) -> [(AllocationCategory, f64); 4] {
        [
            (AllocationCategory::Team, self.team),
            (AllocationCategory::Investors, self.investors),
            (AllocationCategory::Treasury, self.treasury),
            (AllocationCategory::EcosystemDev, self.ecosystem_dev),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entries().iter().any(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err("Base distribution values must be non-negative".to_string());
        }
        if self.total() >= 100.0 {
            return Err(format!(
                "Base distribution must leave room for the airdrop, got {}",
                self.total()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub category: AllocationCategory,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    /// All five categories, summing to 100.
    pub slices: Vec<AllocationSlice>,
    pub visibility_threshold: f64,
}

impl AllocationBreakdown {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.percentage).sum()
    }

    /// Slices large enough to draw.
    pub fn visible(&self) -> Vec<AllocationSlice> {
        self.slices
            .iter()
            .filter(|s| s.percentage > self.visibility_threshold)
            .copied()
            .collect()
    }

    pub fn get(&self, category: AllocationCategory) -> Option<f64> {
        self.slices
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.percentage)
    }
}
