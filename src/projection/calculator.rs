use crate::{
    config::Settings,
    models::{Projection, ShareInput, ValuationParams},
    projection::{AllocationNormalizer, ShareEngine, ValuationEngine},
};
use chrono::Utc;
use tracing::{debug, info};

pub struct ProjectionCalculator {
    share_engine: ShareEngine,
    valuation_engine: ValuationEngine,
    allocation: AllocationNormalizer,
}

impl ProjectionCalculator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            share_engine: ShareEngine::new(),
            valuation_engine: ValuationEngine::new(),
            allocation: AllocationNormalizer::new(settings.allocation),
        }
    }

    pub fn project(&self, input: ShareInput<'_>, params: &ValuationParams) -> Projection {
        let share = self.share_engine.compute(input, params.total_participants);
        debug!(
            "{} share computed: user_share={:e}, raw_total={}",
            share.mode.as_str(),
            share.user_share,
            share.raw_total_protocol_activities
        );

        let valuation = self
            .valuation_engine
            .compute(share.user_share, params.fdv, params.airdrop_percentage);
        let allocation = self.allocation.normalize(params.airdrop_percentage);

        info!(
            "Projected airdrop: ${:.4} (pool ${:.0})",
            valuation.estimated_user_airdrop, valuation.total_airdrop_value
        );

        Projection {
            share,
            params: *params,
            valuation,
            allocation,
            calculated_at: Utc::now(),
            protocol: None,
        }
    }
}

impl Default for ProjectionCalculator {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityRow, ActivityType, BasicParams, ShareMode};

    #[test]
    fn test_basic_projection_end_to_end() {
        let calculator = ProjectionCalculator::default();
        let params = ValuationParams::default();
        let projection = calculator.project(ShareInput::Basic(BasicParams::default()), &params);

        assert_eq!(projection.share.mode, ShareMode::Basic);
        assert!((projection.valuation.estimated_user_airdrop - 0.375).abs() < 1e-9);
        assert!((projection.allocation.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_advanced_projection_uses_participants() {
        let calculator = ProjectionCalculator::default();
        let rows = vec![ActivityRow::new(0, ActivityType::Staking).with_metrics(10.0, 100.0, 1.0)];
        let params = ValuationParams {
            fdv: 1_000_000.0,
            airdrop_percentage: 10.0,
            total_participants: 0,
        };
        let projection = calculator.project(ShareInput::Advanced(&rows), &params);

        assert!((projection.share.user_share - 0.1).abs() < 1e-12);
        assert!((projection.valuation.estimated_user_airdrop - 10_000.0).abs() < 1e-6);
    }
}
