use crate::{
    config::Settings,
    models::{ComparisonEntry, Projection, RowField, ShareMode},
    projection::{HistoricalComparison, StaticHistory},
    session::{FormSession, Slider},
};

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Form,
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Activity,
    Valuation,
}

/// Rows of the valuation panel: two sliders, then the participant count.
pub const VALUATION_ITEMS: usize = 3;
const PARTICIPANTS_INDEX: usize = 2;

pub struct App {
    pub session: FormSession,
    pub projection: Projection,
    pub comparison: Vec<ComparisonEntry>,
    pub input_mode: InputMode,
    pub current_screen: Screen,
    pub focus: Focus,
    pub current_input: String,
    pub selected_index: usize,
    pub selected_column: usize,
    pub valuation_index: usize,
    pub comparison_offset: usize,
    pub error_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let session = FormSession::new(settings);
        let projection = session.project();
        let comparison =
            HistoricalComparison::build(&StaticHistory, projection.valuation.total_airdrop_value);

        Self {
            session,
            projection,
            comparison,
            input_mode: InputMode::Normal,
            current_screen: Screen::Form,
            focus: Focus::Activity,
            current_input: String::new(),
            selected_index: 0,
            selected_column: 0,
            valuation_index: 0,
            comparison_offset: 0,
            error_message: None,
            should_quit: false,
        }
    }

    pub fn recompute(&mut self) {
        self.projection = self.session.project();
        self.comparison = HistoricalComparison::build(
            &StaticHistory,
            self.projection.valuation.total_airdrop_value,
        );
    }

    fn activity_len(&self) -> usize {
        match self.session.mode() {
            ShareMode::Basic => Slider::BASIC.len(),
            ShareMode::Advanced => self.session.rows().len(),
        }
    }

    pub fn selected_column_field(&self) -> RowField {
        RowField::ALL[self.selected_column.min(RowField::ALL.len() - 1)]
    }

    pub fn is_editing_participants(&self) -> bool {
        self.input_mode == InputMode::Editing
            && self.focus == Focus::Valuation
            && self.valuation_index == PARTICIPANTS_INDEX
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Activity => Focus::Valuation,
            Focus::Valuation => Focus::Activity,
        };
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Activity => self.selected_index = self.selected_index.saturating_sub(1),
            Focus::Valuation => self.valuation_index = self.valuation_index.saturating_sub(1),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Activity => {
                if self.selected_index < self.activity_len().saturating_sub(1) {
                    self.selected_index += 1;
                }
            }
            Focus::Valuation => {
                if self.valuation_index < VALUATION_ITEMS - 1 {
                    self.valuation_index += 1;
                }
            }
        }
    }

    /// Left/right: nudges a slider, or moves between table columns.
    pub fn adjust(&mut self, up: bool) {
        match self.focus {
            Focus::Valuation => {
                if let Some(slider) = Slider::VALUATION.get(self.valuation_index) {
                    self.session.step_slider(*slider, up);
                    self.recompute();
                }
            }
            Focus::Activity => match self.session.mode() {
                ShareMode::Basic => {
                    if let Some(slider) = Slider::BASIC.get(self.selected_index) {
                        self.session.step_slider(*slider, up);
                        self.recompute();
                    }
                }
                ShareMode::Advanced => {
                    if up {
                        self.selected_column = (self.selected_column + 1).min(RowField::ALL.len() - 1);
                    } else {
                        self.selected_column = self.selected_column.saturating_sub(1);
                    }
                }
            },
        }
    }

    pub fn toggle_mode(&mut self) {
        self.session.toggle_mode();
        self.selected_index = 0;
        self.selected_column = 0;
        self.recompute();
    }

    pub fn add_row(&mut self) {
        if self.session.mode() == ShareMode::Advanced {
            self.session.add_row();
            self.selected_index = self.session.rows().len() - 1;
            self.recompute();
        }
    }

    pub fn remove_selected_row(&mut self) {
        if self.session.mode() != ShareMode::Advanced {
            return;
        }
        let Some(id) = self.session.rows().get(self.selected_index).map(|r| r.id) else {
            return;
        };
        match self.session.delete_row(id) {
            Ok(()) => {
                let len = self.session.rows().len();
                if self.selected_index > 0 && self.selected_index >= len {
                    self.selected_index -= 1;
                }
                self.error_message = None;
                self.recompute();
            }
            Err(e) => self.set_error(&e.to_string()),
        }
    }

    /// Enter in normal mode: cycles the type cell or opens a text edit.
    pub fn begin_edit(&mut self) {
        match self.focus {
            Focus::Valuation if self.valuation_index == PARTICIPANTS_INDEX => {
                self.current_input = self.session.valuation().total_participants.to_string();
                self.input_mode = InputMode::Editing;
            }
            Focus::Activity if self.session.mode() == ShareMode::Advanced => {
                let Some(row) = self.session.rows().get(self.selected_index) else {
                    return;
                };
                let id = row.id;
                let field = self.selected_column_field();
                if field == RowField::Type {
                    match self.session.cycle_row_type(id) {
                        Ok(_) => self.recompute(),
                        Err(e) => self.set_error(&e.to_string()),
                    }
                } else {
                    self.current_input = row.field_text(field);
                    self.input_mode = InputMode::Editing;
                }
            }
            _ => {}
        }
    }

    pub fn commit_edit(&mut self) {
        let input = std::mem::take(&mut self.current_input);
        self.input_mode = InputMode::Normal;

        if self.focus == Focus::Valuation {
            match input.trim().parse::<i64>() {
                Ok(participants) => {
                    self.session.set_total_participants(participants);
                    self.error_message = None;
                }
                Err(_) => self.set_error(&format!("Invalid participant count: {}", input)),
            }
        } else if let Some(id) = self.session.rows().get(self.selected_index).map(|r| r.id) {
            let field = self.selected_column_field();
            match self.session.update_field(id, field, &input) {
                Ok(()) => self.error_message = None,
                Err(e) => self.set_error(&e.to_string()),
            }
        }

        self.recompute();
    }

    pub fn cancel_edit(&mut self) {
        self.current_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.selected_index = 0;
        self.selected_column = 0;
        self.valuation_index = 0;
        self.error_message = None;
        self.recompute();
    }

    pub fn show_comparison(&mut self) {
        self.current_screen = Screen::Comparison;
        self.comparison_offset = self
            .comparison
            .iter()
            .position(|e| e.is_current)
            .map(|idx| idx.saturating_sub(5))
            .unwrap_or(0);
    }

    pub fn scroll_comparison(&mut self, down: bool) {
        if down {
            if self.comparison_offset + 1 < self.comparison.len() {
                self.comparison_offset += 1;
            }
        } else {
            self.comparison_offset = self.comparison_offset.saturating_sub(1);
        }
    }

    pub fn set_error(&mut self, error: &str) {
        self.error_message = Some(error.to_string());
    }

    pub fn back_to_form(&mut self) {
        self.current_screen = Screen::Form;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_adjust_recomputes() {
        let mut app = App::new(Settings::default());
        let before = app.projection.valuation.estimated_user_airdrop;

        // weight slider: 1.0 -> 1.1
        app.selected_index = 2;
        app.adjust(true);
        assert!(app.projection.valuation.estimated_user_airdrop > before);
    }

    #[test]
    fn test_edit_advanced_cell() {
        let mut app = App::new(Settings::default());
        app.toggle_mode();

        app.selected_column = 1;
        app.begin_edit();
        assert_eq!(app.input_mode, InputMode::Editing);
        app.current_input = "10".to_string();
        app.commit_edit();

        app.selected_column = 3;
        app.begin_edit();
        app.current_input = "100".to_string();
        app.commit_edit();

        assert!((app.projection.share.user_share - 0.1 / 100_000.0).abs() < 1e-15);
    }

    #[test]
    fn test_reset_keeps_protocol() {
        let mut app = App::new(Settings::default());
        app.session
            .set_protocol(crate::models::ProtocolInfo {
                name: "Jupiter".to_string(),
                ..Default::default()
            })
            .unwrap();
        app.toggle_mode();
        app.reset();

        assert_eq!(app.session.mode(), ShareMode::Basic);
        let protocol = app.projection.protocol.as_ref().unwrap();
        assert_eq!(protocol.name, "Jupiter");
    }

    #[test]
    fn test_invalid_participants_sets_error() {
        let mut app = App::new(Settings::default());
        app.focus = Focus::Valuation;
        app.valuation_index = PARTICIPANTS_INDEX;
        app.begin_edit();
        app.current_input = "lots".to_string();
        app.commit_edit();

        assert!(app.error_message.is_some());
        assert_eq!(app.session.valuation().total_participants, 100_000);
    }
}
