use crate::models::{AllocationBreakdown, AllocationCategory, AllocationSlice, BaseDistribution};

/// Slices at or below this percentage are not drawn.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

pub struct AllocationNormalizer {
    base: BaseDistribution,
    visibility_threshold: f64,
}

impl AllocationNormalizer {
    pub fn new(base: BaseDistribution) -> Self {
        Self {
            base,
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }

    /// Rescales the non-airdrop categories so all five sum to 100.
    pub fn normalize(&self, airdrop_percentage: f64) -> AllocationBreakdown {
        let airdrop = if airdrop_percentage.is_finite() {
            airdrop_percentage.clamp(0.0, 100.0)
        } else {
            0.0
        };

        let base_total = self.base.total();
        let scale_factor = if base_total > 0.0 {
            (100.0 - airdrop) / base_total
        } else {
            0.0
        };

        let mut slices = Vec::with_capacity(5);
        slices.push(AllocationSlice {
            category: AllocationCategory::Airdrop,
            percentage: airdrop,
        });
        for (category, base_value) in self.base.entries() {
            slices.push(AllocationSlice {
                category,
                percentage: base_value * scale_factor,
            });
        }

        AllocationBreakdown {
            slices,
            visibility_threshold: self.visibility_threshold,
        }
    }
}

impl Default for AllocationNormalizer {
    fn default() -> Self {
        Self::new(BaseDistribution::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices_sum_to_hundred() {
        let normalizer = AllocationNormalizer::default();
        for pct in [1.0, 7.5, 20.0, 30.0, 99.95] {
            let breakdown = normalizer.normalize(pct);
            assert_eq!(breakdown.slices.len(), 5);
            assert!((breakdown.total() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_default_rescaling() {
        let breakdown = AllocationNormalizer::default().normalize(20.0);
        // base sums to 80, so the factor is exactly 1
        assert_eq!(breakdown.get(AllocationCategory::Team), Some(15.0));
        assert_eq!(breakdown.get(AllocationCategory::EcosystemDev), Some(30.0));
        assert_eq!(breakdown.get(AllocationCategory::Airdrop), Some(20.0));
    }

    #[test]
    fn test_tiny_slices_hidden_but_counted() {
        let breakdown = AllocationNormalizer::default().normalize(99.95);
        let visible = breakdown.visible();

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, AllocationCategory::Airdrop);
        assert!((breakdown.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_base_distribution() {
        let base = BaseDistribution {
            team: 0.0,
            investors: 0.0,
            treasury: 0.0,
            ecosystem_dev: 0.0,
        };
        let breakdown = AllocationNormalizer::new(base).normalize(10.0);
        assert_eq!(breakdown.get(AllocationCategory::Team), Some(0.0));
        assert_eq!(breakdown.visible().len(), 1);
    }
}
