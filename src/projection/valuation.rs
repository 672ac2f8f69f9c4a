use crate::models::ValuationResult;
use tracing::warn;

/// Lower edge of the estimate band. A fixed heuristic, not a statistical interval.
pub const ESTIMATE_BAND_LOW: f64 = 0.5;
/// Upper edge of the estimate band.
pub const ESTIMATE_BAND_HIGH: f64 = 1.5;

pub struct ValuationEngine {
    band_low: f64,
    band_high: f64,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self {
            band_low: ESTIMATE_BAND_LOW,
            band_high: ESTIMATE_BAND_HIGH,
        }
    }

    pub fn compute(&self, user_share: f64, fdv: f64, airdrop_percentage: f64) -> ValuationResult {
        if !is_usable(user_share) || !is_usable(fdv) || !is_usable(airdrop_percentage) {
            warn!(
                "Degenerate valuation inputs (share={}, fdv={}, airdrop%={}), returning zero",
                user_share, fdv, airdrop_percentage
            );
            return ValuationResult::zero();
        }

        let total_airdrop_value = fdv * (airdrop_percentage / 100.0);
        let estimated_user_airdrop = total_airdrop_value * user_share;

        if !total_airdrop_value.is_finite() || !estimated_user_airdrop.is_finite() {
            warn!("Valuation overflowed, returning zero");
            return ValuationResult::zero();
        }

        ValuationResult {
            total_airdrop_value,
            estimated_user_airdrop,
            min_estimate: estimated_user_airdrop * self.band_low,
            max_estimate: estimated_user_airdrop * self.band_high,
        }
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation_example() {
        let engine = ValuationEngine::new();
        let result = engine.compute(1e-9, 5e9, 7.5);

        assert!((result.total_airdrop_value - 3.75e8).abs() < 1e-3);
        assert!((result.estimated_user_airdrop - 0.375).abs() < 1e-12);
        assert!((result.min_estimate - 0.1875).abs() < 1e-12);
        assert!((result.max_estimate - 0.5625).abs() < 1e-12);
    }

    #[test]
    fn test_zero_inputs_give_zero() {
        let engine = ValuationEngine::new();
        assert!(engine.compute(0.5, 0.0, 7.5).is_zero());

        let result = engine.compute(0.5, 5e9, 0.0);
        assert_eq!(result, ValuationResult::zero());
    }

    #[test]
    fn test_degenerate_inputs_never_nan() {
        let engine = ValuationEngine::new();
        for (share, fdv, pct) in [
            (f64::NAN, 5e9, 7.5),
            (0.1, f64::INFINITY, 7.5),
            (0.1, 5e9, -3.0),
            (-1.0, 5e9, 7.5),
            (f64::MAX, f64::MAX, 100.0),
        ] {
            let result = engine.compute(share, fdv, pct);
            assert_eq!(result, ValuationResult::zero());
        }
    }
}
