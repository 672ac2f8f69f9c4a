use crate::data::historical_airdrops;
use crate::models::{ComparisonEntry, HistoricalAirdrop};
use std::cmp::Ordering;
use tracing::debug;

pub const CURRENT_PROJECTION_NAME: &str = "Current Projection";

/// Source of reference airdrops to rank a projection against.
#[cfg_attr(test, mockall::automock)]
pub trait AirdropHistory {
    fn entries(&self) -> Vec<HistoricalAirdrop>;
}

/// The bundled top-50 table.
pub struct StaticHistory;

impl AirdropHistory for StaticHistory {
    fn entries(&self) -> Vec<HistoricalAirdrop> {
        historical_airdrops().to_vec()
    }
}

pub struct HistoricalComparison;

impl HistoricalComparison {
    /// Merges the projected total airdrop value into a re-ranked copy of the history.
    ///
    /// Non-positive or non-finite values leave the table unchanged apart from
    /// ranking. Historical entries are ranked by position in the merged list;
    /// the projection itself carries no rank.
    pub fn build(history: &dyn AirdropHistory, total_airdrop_value: f64) -> Vec<ComparisonEntry> {
        let mut entries: Vec<ComparisonEntry> = history
            .entries()
            .into_iter()
            .map(|h| ComparisonEntry {
                rank: Some(h.rank),
                value_usd: h.value_usd(),
                name: h.name,
                date: h.date,
                is_current: false,
            })
            .collect();

        if total_airdrop_value.is_finite() && total_airdrop_value > 0.0 {
            entries.push(ComparisonEntry {
                rank: None,
                name: CURRENT_PROJECTION_NAME.to_string(),
                value_usd: total_airdrop_value,
                date: None,
                is_current: true,
            });
        } else {
            debug!("Skipping projection of {} in comparison", total_airdrop_value);
        }

        entries.sort_by(|a, b| b.value_usd.partial_cmp(&a.value_usd).unwrap_or(Ordering::Equal));

        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.rank = if entry.is_current { None } else { Some(idx as u32 + 1) };
        }

        entries
    }

    /// 1-based position the projection would take among the history.
    pub fn projected_rank(history: &dyn AirdropHistory, total_airdrop_value: f64) -> Option<usize> {
        Self::build(history, total_airdrop_value)
            .iter()
            .position(|e| e.is_current)
            .map(|idx| idx + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn airdrop(rank: u32, name: &str, value: u64) -> HistoricalAirdrop {
        HistoricalAirdrop {
            rank,
            name: name.to_string(),
            value_raw: Decimal::from(value),
            date: None,
        }
    }

    fn mock_history() -> MockAirdropHistory {
        let mut mock = MockAirdropHistory::new();
        mock.expect_entries().returning(|| {
            vec![
                airdrop(1, "Alpha", 3_000),
                airdrop(2, "Beta", 2_000),
                airdrop(3, "Gamma", 1_000),
            ]
        });
        mock
    }

    #[test]
    fn test_projection_is_inserted_and_others_reranked() {
        let history = mock_history();
        let entries = HistoricalComparison::build(&history, 2_500.0);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].rank, Some(1));
        assert!(entries[1].is_current);
        assert_eq!(entries[1].rank, None);
        assert_eq!(entries[1].rank_label(), "??");
        assert_eq!(entries[2].name, "Beta");
        assert_eq!(entries[2].rank, Some(3));
        assert_eq!(entries[3].rank, Some(4));
    }

    #[test]
    fn test_non_positive_projection_is_skipped() {
        let history = mock_history();
        for value in [0.0, -5.0, f64::NAN] {
            let entries = HistoricalComparison::build(&history, value);
            assert_eq!(entries.len(), 3);
            assert!(entries.iter().all(|e| !e.is_current));
        }
        assert_eq!(HistoricalComparison::projected_rank(&history, 0.0), None);
    }

    #[test]
    fn test_projected_rank() {
        let history = mock_history();
        assert_eq!(HistoricalComparison::projected_rank(&history, 10_000.0), Some(1));
        assert_eq!(HistoricalComparison::projected_rank(&history, 1.0), Some(4));
    }

    #[test]
    fn test_static_history_has_fifty_entries() {
        let entries = HistoricalComparison::build(&StaticHistory, 3.75e8);
        assert_eq!(entries.len(), 51);
        assert_eq!(entries.iter().filter(|e| e.is_current).count(), 1);
    }
}
