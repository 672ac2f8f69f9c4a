use crate::models::{
    ActivityRow, ActivityType, BasicParams, BreakdownEntry, ShareInput, ShareMode, ShareResult,
};
use tracing::{debug, warn};

/// Breakdown entries at or below this percentage of the pool are dropped.
pub const BREAKDOWN_MIN_PERCENTAGE: f64 = 1e-5;

struct RowContribution {
    activity_type: ActivityType,
    weighted_user: f64,
    weighted_total: f64,
    raw_total: f64,
}

pub struct ShareEngine {
    breakdown_threshold: f64,
}

impl Default for ShareEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShareEngine {
    pub fn new() -> Self {
        Self {
            breakdown_threshold: BREAKDOWN_MIN_PERCENTAGE,
        }
    }

    pub fn compute(&self, input: ShareInput<'_>, total_participants: i64) -> ShareResult {
        match input {
            ShareInput::Basic(params) => self.compute_basic(&params, total_participants),
            ShareInput::Advanced(rows) => self.compute_advanced(rows, total_participants),
        }
    }

    pub fn compute_basic(&self, params: &BasicParams, total_participants: i64) -> ShareResult {
        let percentage = if params.user_activity_percentage.is_finite() {
            params.user_activity_percentage.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let weight = if params.activity_weight.is_finite() {
            params.activity_weight.max(0.0)
        } else {
            0.0
        };

        let base_share = percentage / 100.0;
        let weighted_share = (base_share * weight).min(1.0);
        let user_share = dilute(weighted_share, total_participants);

        ShareResult {
            raw_total_protocol_activities: finite_total(params.total_activities),
            user_share,
            breakdown: Vec::new(),
            mode: ShareMode::Basic,
        }
    }

    pub fn compute_advanced(&self, rows: &[ActivityRow], total_participants: i64) -> ShareResult {
        let mut weighted_user_sum = 0.0;
        let mut weighted_total_sum = 0.0;
        let mut raw_total = 0.0;
        let mut per_type: Vec<(ActivityType, f64)> = Vec::new();

        for row in rows {
            let Some(contribution) = contribution(row) else {
                debug!("Excluding activity row {} ({})", row.id, row.activity_type);
                continue;
            };

            weighted_user_sum += contribution.weighted_user;
            weighted_total_sum += contribution.weighted_total;
            raw_total += contribution.raw_total;

            match per_type.iter_mut().find(|(t, _)| *t == contribution.activity_type) {
                Some((_, sum)) => *sum += contribution.weighted_user,
                None => per_type.push((contribution.activity_type, contribution.weighted_user)),
            }
        }

        // Not capped at 1: a user metric above the protocol total passes through.
        let activity_share = if weighted_total_sum > 0.0 {
            weighted_user_sum / weighted_total_sum
        } else {
            0.0
        };

        let activity_share = if activity_share.is_finite() {
            activity_share
        } else {
            warn!("Weighted activity sums overflowed, treating share as 0");
            0.0
        };

        let breakdown = per_type
            .into_iter()
            .map(|(activity_type, weighted_user)| BreakdownEntry {
                activity_type,
                percentage_of_pool: if weighted_total_sum > 0.0 {
                    weighted_user / weighted_total_sum * 100.0
                } else {
                    0.0
                },
            })
            .filter(|entry| {
                entry.percentage_of_pool.is_finite()
                    && entry.percentage_of_pool > self.breakdown_threshold
            })
            .collect();

        ShareResult {
            raw_total_protocol_activities: finite_total(raw_total),
            user_share: dilute(activity_share, total_participants),
            breakdown,
            mode: ShareMode::Advanced,
        }
    }
}

fn contribution(row: &ActivityRow) -> Option<RowContribution> {
    let weight = row.weight.weight()?;
    let total_metric = row.total_metric.metric();
    if total_metric <= 0.0 {
        return None;
    }
    let user_metric = row.user_metric.metric();

    Some(RowContribution {
        activity_type: row.activity_type,
        weighted_user: user_metric * weight,
        weighted_total: total_metric * weight,
        raw_total: total_metric,
    })
}

/// Overflowed totals saturate at `f64::MAX`; NaN reads as 0.
fn finite_total(total: f64) -> f64 {
    if total.is_finite() {
        return total;
    }
    warn!("Protocol activity total is not finite ({}), saturating", total);
    if total > 0.0 {
        f64::MAX
    } else {
        0.0
    }
}

/// Splits a share across participants; counts below one are floored to one.
pub fn dilute(share: f64, total_participants: i64) -> f64 {
    let safe_participants = total_participants.max(1) as f64;
    share / safe_participants
}
