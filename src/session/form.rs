use crate::{
    config::{Settings, SliderRange},
    models::{
        duplicate_types, ActivityRow, ActivityType, BasicParams, FieldValue, ProjectorError, Projection,
        ProtocolInfo, Result, RowField, ShareInput, ShareMode, ValuationParams,
    },
    projection::ProjectionCalculator,
};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    TotalActivities,
    UserActivityPercentage,
    ActivityWeight,
    AirdropPercentage,
    Fdv,
}

impl Slider {
    pub const BASIC: [Slider; 3] = [
        Slider::TotalActivities,
        Slider::UserActivityPercentage,
        Slider::ActivityWeight,
    ];
    pub const VALUATION: [Slider; 2] = [Slider::AirdropPercentage, Slider::Fdv];

    pub fn label(&self) -> &'static str {
        match self {
            Slider::TotalActivities => "Total Protocol Activities",
            Slider::UserActivityPercentage => "Your Share of Activities",
            Slider::ActivityWeight => "Activity Weight Multiplier",
            Slider::AirdropPercentage => "Airdrop Allocation",
            Slider::Fdv => "Projected Fully Diluted Valuation (FDV)",
        }
    }
}

/// Editable state behind one projection form.
///
/// The session is the only writer. Row ids come from a counter owned here,
/// so they are unique within the session and never reused after deletion.
pub struct FormSession {
    settings: Settings,
    calculator: ProjectionCalculator,
    mode: ShareMode,
    basic: BasicParams,
    valuation: ValuationParams,
    protocol: ProtocolInfo,
    rows: Vec<ActivityRow>,
    next_id: u64,
}

impl FormSession {
    pub fn new(settings: Settings) -> Self {
        let calculator = ProjectionCalculator::new(&settings);
        let mut session = Self {
            mode: ShareMode::Basic,
            basic: settings.basic,
            valuation: settings.valuation,
            protocol: ProtocolInfo::default(),
            rows: Vec::new(),
            next_id: 0,
            calculator,
            settings,
        };
        session.reset();
        session
    }

    /// Restores every input to its configured default. Ids keep counting up
    /// and the protocol description is kept.
    pub fn reset(&mut self) {
        self.mode = ShareMode::Basic;
        self.basic = self.settings.basic;
        self.valuation = self.settings.valuation;
        self.rows.clear();

        let id = self.generate_id();
        let defaults = &self.settings.activities;
        self.rows.push(
            ActivityRow::new(id, defaults.initial_type)
                .with_unit(defaults.initial_unit.clone())
                .with_metrics(FieldValue::blank(), FieldValue::blank(), defaults.default_weight),
        );
        info!("Form reset to defaults");
    }

    fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> ShareMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ShareMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn basic(&self) -> &BasicParams {
        &self.basic
    }

    pub fn valuation(&self) -> &ValuationParams {
        &self.valuation
    }

    pub fn protocol(&self) -> &ProtocolInfo {
        &self.protocol
    }

    pub fn set_protocol(&mut self, protocol: ProtocolInfo) -> Result<()> {
        protocol.validate()?;
        debug!("Protocol set to {}", protocol.summary());
        self.protocol = protocol;
        Ok(())
    }

    pub fn rows(&self) -> &[ActivityRow] {
        &self.rows
    }

    pub fn row(&self, id: u64) -> Option<&ActivityRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn add_row(&mut self) -> u64 {
        let id = self.generate_id();
        let defaults = &self.settings.activities;
        let mut activity_type = defaults.added_type;
        if !activity_type.is_repeatable() && self.rows.iter().any(|r| r.activity_type == activity_type) {
            activity_type = ActivityType::Custom;
        }
        self.rows.push(
            ActivityRow::new(id, activity_type)
                .with_unit(defaults.added_unit.clone())
                .with_metrics(FieldValue::blank(), FieldValue::blank(), defaults.default_weight),
        );
        debug!("Added activity row {}", id);
        id
    }

    pub fn delete_row(&mut self, id: u64) -> Result<()> {
        let idx = self
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(ProjectorError::RowNotFound(id))?;

        let min = self.settings.activities.min_rows;
        if self.rows.len() <= min {
            return Err(ProjectorError::MinimumRows { min });
        }

        self.rows.remove(idx);
        debug!("Deleted activity row {}", id);
        Ok(())
    }

    pub fn set_row_type(&mut self, id: u64, activity_type: ActivityType) -> Result<()> {
        if !activity_type.is_repeatable() && self.used_types_in_other_rows(id).contains(&activity_type) {
            return Err(ProjectorError::DuplicateActivityType(activity_type));
        }
        let row = self.row_mut(id)?;
        row.activity_type = activity_type;
        Ok(())
    }

    /// Edits one field from its text form.
    pub fn update_field(&mut self, id: u64, field: RowField, value: &str) -> Result<()> {
        match field {
            RowField::Type => {
                let activity_type = ActivityType::from_str(value).ok_or_else(|| {
                    ProjectorError::InvalidInput {
                        field: field.label().to_string(),
                        message: format!("unknown activity type '{}'", value),
                    }
                })?;
                self.set_row_type(id, activity_type)
            }
            RowField::UserMetric => {
                self.row_mut(id)?.user_metric = FieldValue::from(value);
                Ok(())
            }
            RowField::Unit => {
                self.row_mut(id)?.unit = value.to_string();
                Ok(())
            }
            RowField::TotalMetric => {
                self.row_mut(id)?.total_metric = FieldValue::from(value);
                Ok(())
            }
            RowField::Weight => {
                self.row_mut(id)?.weight = FieldValue::from(value);
                Ok(())
            }
        }
    }

    fn row_mut(&mut self, id: u64) -> Result<&mut ActivityRow> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ProjectorError::RowNotFound(id))
    }

    pub fn used_types_in_other_rows(&self, id: u64) -> HashSet<ActivityType> {
        self.rows
            .iter()
            .filter(|r| r.id != id)
            .map(|r| r.activity_type)
            .collect()
    }

    /// Every type paired with whether the given row may select it.
    pub fn available_types(&self, id: u64) -> Vec<(ActivityType, bool)> {
        let used = self.used_types_in_other_rows(id);
        ActivityType::ALL
            .iter()
            .map(|t| (*t, t.is_repeatable() || !used.contains(t)))
            .collect()
    }

    /// Next selectable type after the row's current one, wrapping around.
    pub fn cycle_row_type(&mut self, id: u64) -> Result<ActivityType> {
        let current = self.row(id).ok_or(ProjectorError::RowNotFound(id))?.activity_type;
        let used = self.used_types_in_other_rows(id);

        let mut candidate = current.next();
        while candidate != current {
            if candidate.is_repeatable() || !used.contains(&candidate) {
                break;
            }
            candidate = candidate.next();
        }

        self.set_row_type(id, candidate)?;
        Ok(candidate)
    }

    /// Non-repeatable types that appear on more than one row.
    pub fn duplicate_types(&self) -> Vec<ActivityType> {
        duplicate_types(&self.rows)
    }

    fn range(&self, slider: Slider) -> SliderRange {
        let sliders = &self.settings.sliders;
        match slider {
            Slider::TotalActivities => sliders.total_activities,
            Slider::UserActivityPercentage => sliders.user_activity_percentage,
            Slider::ActivityWeight => sliders.activity_weight,
            Slider::AirdropPercentage => sliders.airdrop_percentage,
            Slider::Fdv => sliders.fdv,
        }
    }

    pub fn slider_value(&self, slider: Slider) -> f64 {
        match slider {
            Slider::TotalActivities => self.basic.total_activities,
            Slider::UserActivityPercentage => self.basic.user_activity_percentage,
            Slider::ActivityWeight => self.basic.activity_weight,
            Slider::AirdropPercentage => self.valuation.airdrop_percentage,
            Slider::Fdv => self.valuation.fdv,
        }
    }

    /// Sets a slider, clamped to its configured range. Returns the stored value.
    pub fn set_slider(&mut self, slider: Slider, value: f64) -> f64 {
        let clamped = self.range(slider).clamp(value);
        match slider {
            Slider::TotalActivities => self.basic.total_activities = clamped,
            Slider::UserActivityPercentage => self.basic.user_activity_percentage = clamped,
            Slider::ActivityWeight => self.basic.activity_weight = clamped,
            Slider::AirdropPercentage => self.valuation.airdrop_percentage = clamped,
            Slider::Fdv => self.valuation.fdv = clamped,
        }
        clamped
    }

    pub fn step_slider(&mut self, slider: Slider, up: bool) -> f64 {
        let range = self.range(slider);
        let current = self.slider_value(slider);
        let next = if up { range.step_up(current) } else { range.step_down(current) };
        self.set_slider(slider, next)
    }

    pub fn set_total_participants(&mut self, participants: i64) {
        self.valuation.total_participants = participants;
    }

    pub fn share_input(&self) -> ShareInput<'_> {
        match self.mode {
            ShareMode::Basic => ShareInput::Basic(self.basic),
            ShareMode::Advanced => ShareInput::Advanced(&self.rows),
        }
    }

    pub fn project(&self) -> Projection {
        let mut projection = self.calculator.project(self.share_input(), &self.valuation);
        if !self.protocol.is_empty() {
            projection.protocol = Some(self.protocol.clone());
        }
        projection
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = FormSession::default();
        assert_eq!(session.mode(), ShareMode::Basic);
        assert_eq!(session.rows().len(), 1);

        let row = &session.rows()[0];
        assert_eq!(row.activity_type, ActivityType::Transactions);
        assert_eq!(row.unit, "tx");
        assert!(row.user_metric.is_blank());
        assert_eq!(row.weight.weight(), Some(1.0));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut session = FormSession::default();
        let first = session.rows()[0].id;
        let a = session.add_row();
        session.delete_row(a).unwrap();
        let b = session.add_row();

        assert_ne!(a, b);
        assert!(b > a && a > first);

        session.reset();
        assert!(session.rows()[0].id > b);
    }

    #[test]
    fn test_added_rows_are_custom() {
        let mut session = FormSession::default();
        let id = session.add_row();
        let row = session.row(id).unwrap();
        assert_eq!(row.activity_type, ActivityType::Custom);
        assert_eq!(row.unit, "");
    }

    #[test]
    fn test_duplicate_type_rejected_custom_allowed() {
        let mut session = FormSession::default();
        let a = session.add_row();
        let b = session.add_row();

        let err = session.set_row_type(a, ActivityType::Transactions).unwrap_err();
        assert!(matches!(err, ProjectorError::DuplicateActivityType(ActivityType::Transactions)));

        session.set_row_type(a, ActivityType::Staking).unwrap();
        assert!(session.set_row_type(b, ActivityType::Custom).is_ok());
        assert!(session.duplicate_types().is_empty());

        let available = session.available_types(b);
        assert!(available.contains(&(ActivityType::Staking, false)));
        assert!(available.contains(&(ActivityType::Custom, true)));
        assert!(available.contains(&(ActivityType::KaitoYaps, true)));
    }

    #[test]
    fn test_cycle_skips_used_types() {
        let mut session = FormSession::default();
        let id = session.add_row();
        session.set_row_type(id, ActivityType::Custom).unwrap();

        // Custom wraps to Transactions, which row 0 holds
        let next = session.cycle_row_type(id).unwrap();
        assert_eq!(next, ActivityType::LiquidityProvision);
    }

    #[test]
    fn test_update_field_and_unknown_row() {
        let mut session = FormSession::default();
        let id = session.rows()[0].id;
        session.update_field(id, RowField::UserMetric, "25").unwrap();
        session.update_field(id, RowField::TotalMetric, "100").unwrap();
        session.update_field(id, RowField::Type, "Staking").unwrap();

        let row = session.row(id).unwrap();
        assert_eq!(row.user_metric.metric(), 25.0);
        assert_eq!(row.activity_type, ActivityType::Staking);

        assert!(matches!(
            session.update_field(999, RowField::Unit, "x"),
            Err(ProjectorError::RowNotFound(999))
        ));
        assert!(matches!(
            session.update_field(id, RowField::Type, "farming"),
            Err(ProjectorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_minimum_rows_guard() {
        let mut settings = Settings::default();
        settings.activities.min_rows = 1;
        let mut session = FormSession::new(settings);
        let only = session.rows()[0].id;

        assert!(matches!(session.delete_row(only), Err(ProjectorError::MinimumRows { min: 1 })));

        let mut unguarded = FormSession::default();
        let id = unguarded.rows()[0].id;
        unguarded.delete_row(id).unwrap();
        assert!(unguarded.rows().is_empty());
    }

    #[test]
    fn test_added_rows_never_duplicate_configured_type() {
        let mut settings = Settings::default();
        settings.activities.added_type = ActivityType::Staking;
        let mut session = FormSession::new(settings);

        let first = session.add_row();
        let second = session.add_row();

        assert_eq!(session.row(first).unwrap().activity_type, ActivityType::Staking);
        assert_eq!(session.row(second).unwrap().activity_type, ActivityType::Custom);
        assert!(session.duplicate_types().is_empty());
    }

    #[test]
    fn test_protocol_carried_into_projection() {
        let mut session = FormSession::default();
        assert!(session.project().protocol.is_none());

        let protocol = ProtocolInfo {
            name: "Uniswap".to_string(),
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
        };
        session.set_protocol(protocol.clone()).unwrap();
        assert_eq!(session.project().protocol, Some(protocol));

        let reversed = ProtocolInfo {
            start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
            ..Default::default()
        };
        assert!(session.set_protocol(reversed).is_err());
        assert_eq!(session.protocol().name, "Uniswap");

        session.reset();
        assert_eq!(session.protocol().name, "Uniswap");
    }

    #[test]
    fn test_sliders_clamp() {
        let mut session = FormSession::default();
        assert_eq!(session.set_slider(Slider::AirdropPercentage, 90.0), 30.0);
        assert_eq!(session.set_slider(Slider::ActivityWeight, 0.0), 0.5);
        let stepped = session.step_slider(Slider::ActivityWeight, true);
        assert!((stepped - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_project_follows_mode() {
        let mut session = FormSession::default();
        let basic = session.project();
        assert_eq!(basic.share.mode, ShareMode::Basic);
        assert!((basic.share.user_share - 1e-9).abs() < 1e-21);

        session.toggle_mode();
        let id = session.rows()[0].id;
        session.update_field(id, RowField::UserMetric, "1").unwrap();
        session.update_field(id, RowField::TotalMetric, "100000000").unwrap();
        let advanced = session.project();
        assert_eq!(advanced.share.mode, ShareMode::Advanced);
        assert!((advanced.share.user_share - 1e-13).abs() < 1e-25);
    }
}
