use dropzone::{
    models::{ActivityRow, ActivityType, AllocationCategory, BasicParams, RowField, ShareInput, ShareMode, ValuationParams},
    projection::{
        AllocationNormalizer, HistoricalComparison, ProjectionCalculator, ShareEngine, StaticHistory,
        ValuationEngine,
    },
    FormSession,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1e-300)
}

fn random_row(rng: &mut StdRng, id: u64) -> ActivityRow {
    let activity_type = ActivityType::ALL[rng.gen_range(0..ActivityType::ALL.len())];
    let total: f64 = rng.gen_range(1.0..1e9);
    let user: f64 = rng.gen_range(0.0..=total);
    let weight: f64 = rng.gen_range(0.0..5.0);
    ActivityRow::new(id, activity_type).with_metrics(user, total, weight)
}

#[test]
fn test_basic_projection_end_to_end() {
    let calculator = ProjectionCalculator::default();
    let params = BasicParams {
        total_activities: 1_500_000.0,
        user_activity_percentage: 0.01,
        activity_weight: 1.0,
    };

    let projection = calculator.project(ShareInput::Basic(params), &ValuationParams::default());

    assert_eq!(projection.share.mode, ShareMode::Basic);
    assert!(approx(projection.share.user_share, 1e-9));
    assert!(approx(projection.valuation.total_airdrop_value, 3.75e8));
    assert!(approx(projection.valuation.estimated_user_airdrop, 0.375));
    assert!(approx(projection.valuation.min_estimate, 0.1875));
    assert!(approx(projection.valuation.max_estimate, 0.5625));
    assert!((projection.allocation.total() - 100.0).abs() < 1e-9);
}

#[test]
fn test_advanced_projection_end_to_end() {
    let rows = vec![ActivityRow::new(0, ActivityType::Transactions).with_metrics(1.0, 100_000_000.0, 1.0)];

    let share = ShareEngine::new().compute(ShareInput::Advanced(&rows), 100_000);

    assert!(approx(share.user_share, 1e-13));
    assert_eq!(share.raw_total_protocol_activities, 100_000_000.0);
    assert!(share.breakdown.is_empty());
}

#[test]
fn test_valuation_end_to_end() {
    let result = ValuationEngine::new().compute(1e-9, 5e9, 7.5);
    assert!(approx(result.total_airdrop_value, 3.75e8));
    assert!(approx(result.estimated_user_airdrop, 0.375));
    assert!(result.min_estimate <= result.estimated_user_airdrop);
    assert!(result.estimated_user_airdrop <= result.max_estimate);
}

#[test]
fn test_advanced_share_is_finite_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(7);
    let engine = ShareEngine::new();

    for _ in 0..200 {
        let rows: Vec<ActivityRow> = (0..rng.gen_range(0..8)).map(|id| random_row(&mut rng, id)).collect();
        let participants = rng.gen_range(-10..1_000_000);
        let share = engine.compute_advanced(&rows, participants);

        assert!(share.user_share.is_finite());
        assert!(share.user_share >= 0.0);
        assert!(share.breakdown_total() <= 100.0 + 1e-9);
    }
}

#[test]
fn test_basic_share_bounded_by_one_over_participants() {
    let mut rng = StdRng::seed_from_u64(11);
    let engine = ShareEngine::new();

    for _ in 0..200 {
        let params = BasicParams {
            total_activities: rng.gen_range(1e5..1e8),
            user_activity_percentage: rng.gen_range(-10.0..200.0),
            activity_weight: rng.gen_range(-1.0..5.0),
        };
        let participants: i64 = rng.gen_range(-5..1_000);
        let share = engine.compute_basic(&params, participants);

        let safe = participants.max(1) as f64;
        assert!(share.user_share >= 0.0);
        assert!(share.user_share <= 1.0 / safe + 1e-15);
    }
}

#[test]
fn test_non_positive_participants_behave_like_one() {
    let engine = ShareEngine::new();
    let rows = vec![ActivityRow::new(0, ActivityType::Staking).with_metrics(25.0, 100.0, 2.0)];

    let one = engine.compute_advanced(&rows, 1);
    for participants in [0, -1, -100_000] {
        assert_eq!(engine.compute_advanced(&rows, participants).user_share, one.user_share);
    }
    assert_eq!(one.user_share, 0.25);
}

#[test]
fn test_excluded_rows_do_not_change_result() {
    let mut rng = StdRng::seed_from_u64(23);
    let engine = ShareEngine::new();

    for _ in 0..50 {
        let rows: Vec<ActivityRow> = (0..4).map(|id| random_row(&mut rng, id)).collect();
        let mut with_junk = rows.clone();
        with_junk.push(ActivityRow::new(100, ActivityType::Custom).with_metrics(5.0, 0.0, 1.0));
        with_junk.push(ActivityRow::new(101, ActivityType::Custom).with_metrics(5.0, 10.0, -2.0));
        with_junk.push(ActivityRow::new(102, ActivityType::Custom).with_metrics("5", "lots", "1"));

        assert_eq!(engine.compute_advanced(&rows, 1_000), engine.compute_advanced(&with_junk, 1_000));
    }
}

#[test]
fn test_share_computation_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(31);
    let engine = ShareEngine::new();
    let rows: Vec<ActivityRow> = (0..6).map(|id| random_row(&mut rng, id)).collect();

    assert_eq!(engine.compute_advanced(&rows, 500), engine.compute_advanced(&rows, 500));
}

#[test]
fn test_allocation_always_sums_to_hundred() {
    let normalizer = AllocationNormalizer::default();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let pct = rng.gen_range(1.0..30.0);
        let breakdown = normalizer.normalize(pct);
        assert!((breakdown.total() - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.get(AllocationCategory::Airdrop), Some(pct));
    }
}

#[test]
fn test_comparison_against_history() {
    let entries = HistoricalComparison::build(&StaticHistory, 3.75e8);
    assert_eq!(entries.len(), 51);
    assert!(entries.windows(2).all(|w| w[0].value_usd >= w[1].value_usd));

    let current = entries.iter().find(|e| e.is_current).unwrap();
    assert_eq!(current.rank_label(), "??");

    assert_eq!(HistoricalComparison::build(&StaticHistory, 0.0).len(), 50);
}

#[test]
fn test_session_advanced_flow() {
    let mut session = FormSession::default();
    session.set_mode(ShareMode::Advanced);

    let first = session.rows()[0].id;
    session.update_field(first, RowField::UserMetric, "1").unwrap();
    session.update_field(first, RowField::TotalMetric, "100000000").unwrap();

    let second = session.add_row();
    assert_ne!(first, second);
    assert!(session.set_row_type(second, ActivityType::Transactions).is_err());
    session.set_row_type(second, ActivityType::Staking).unwrap();

    let projection = session.project();
    assert_eq!(projection.share.mode, ShareMode::Advanced);
    assert!(approx(projection.share.user_share, 1e-13));

    session.delete_row(second).unwrap();
    let third = session.add_row();
    assert!(third > second);
}

#[test]
fn test_activity_type_parsing() {
    assert_eq!(ActivityType::from_str("Transactions"), Some(ActivityType::Transactions));
    assert_eq!(ActivityType::from_str("governance participation"), Some(ActivityType::GovernanceParticipation));
    assert_eq!(ActivityType::from_str("Kaito-Yaps"), Some(ActivityType::KaitoYaps));
    assert_eq!(ActivityType::from_str("invalid"), None);
}
