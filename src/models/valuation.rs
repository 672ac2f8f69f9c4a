use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationParams {
    /// Fully diluted valuation in USD.
    pub fdv: f64,
    pub airdrop_percentage: f64,
    pub total_participants: i64,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            fdv: 5_000_000_000.0,
            airdrop_percentage: 7.5,
            total_participants: 100_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ValuationResult {
    pub total_airdrop_value: f64,
    pub estimated_user_airdrop: f64,
    pub min_estimate: f64,
    pub max_estimate: f64,
}

impl ValuationResult {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.total_airdrop_value == 0.0 && self.estimated_user_airdrop == 0.0
    }
}
