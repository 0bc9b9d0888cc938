//! The presentation contract and its terminal implementation.
//!
//! The coordinator only ever talks to the [`Surface`] trait. [`TuiSurface`]
//! implements it by keeping a [`ScreenState`] view model that the per-frame
//! renderer in [`ui`](crate::ui) reads; coordinator tests swap in a
//! recording stub instead.
use chrono::Utc;
use chrono_tz::Tz;

use ledger::{Category, EntryKey, Money, Totals};

/// Raw snapshot of the input fields. No validation happens here.
#[derive(Debug, Clone)]
pub struct EntryInput {
    pub category: Category,
    pub description: String,
    pub value: String,
}

/// What the coordinator needs from a rendering surface.
///
/// Rows are keyed by [`EntryKey`] so a later removal can locate them; the
/// key's textual form is the one piece of wire format shared with the
/// ledger.
pub trait Surface {
    /// Current input fields, unvalidated.
    fn read_entry_input(&self) -> EntryInput;

    /// Appends a visual row for a newly created entry.
    fn render_new_entry(&mut self, key: EntryKey, description: &str, amount: Money);

    /// Removes the row previously rendered for `key`.
    fn remove_entry_view(&mut self, key: EntryKey);

    /// Resets the input fields and moves focus back to the description.
    fn clear_entry_inputs(&mut self);

    /// Displays budget, totals and the overall expense ratio.
    fn render_totals(&mut self, totals: &Totals);

    /// Writes one percentage label per expense row, in display order.
    fn render_expense_percentages(&mut self, percentages: &[Option<u32>]);

    /// Shows the current calendar month and year.
    fn render_current_month(&mut self);

    /// Toggles the cosmetic "expense mode" styling of the input controls.
    fn toggle_input_focus_style(&mut self);

    /// Resolves the current input target to a row key, or `None` when no
    /// row is under it.
    fn resolve_delete_target(&self) -> Option<EntryKey>;

    // Input plumbing: field editing and row selection.
    fn input_char(&mut self, ch: char);
    fn input_backspace(&mut self);
    fn focus_next_field(&mut self);
    fn toggle_category(&mut self);
    fn select_prev(&mut self);
    fn select_next(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Description,
    Value,
}

#[derive(Debug)]
pub struct InputState {
    pub category: Category,
    pub description: String,
    pub value: String,
    pub focus: InputField,
    pub expense_style: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            category: Category::Income,
            description: String::new(),
            value: String::new(),
            focus: InputField::Description,
            expense_style: false,
        }
    }
}

/// A rendered entry row.
///
/// `percentage_label` is set for expense rows only and starts at the
/// placeholder; the next percentage pass overwrites it.
#[derive(Debug, Clone)]
pub struct Row {
    pub key: EntryKey,
    pub description: String,
    pub amount: Money,
    pub percentage_label: Option<String>,
}

/// View model read by the frame renderer.
#[derive(Debug, Default)]
pub struct ScreenState {
    pub month_label: String,
    pub totals: Totals,
    pub income_rows: Vec<Row>,
    pub expense_rows: Vec<Row>,
    pub input: InputState,
    pub selected: Option<usize>,
}

impl ScreenState {
    fn row_count(&self) -> usize {
        self.income_rows.len() + self.expense_rows.len()
    }

    /// Row under the selection cursor; income rows come first.
    fn selected_row(&self) -> Option<&Row> {
        let indx = self.selected?;
        if indx < self.income_rows.len() {
            self.income_rows.get(indx)
        } else {
            self.expense_rows.get(indx - self.income_rows.len())
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        self.selected = match (self.selected, count) {
            (_, 0) => None,
            (Some(indx), _) => Some(indx.min(count - 1)),
            (None, _) => None,
        };
    }
}

/// Terminal-backed presentation surface.
pub struct TuiSurface {
    state: ScreenState,
    timezone: Tz,
}

impl TuiSurface {
    #[must_use]
    pub fn new(timezone: Tz) -> Self {
        Self {
            state: ScreenState::default(),
            timezone,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ScreenState {
        &self.state
    }
}

impl Surface for TuiSurface {
    fn read_entry_input(&self) -> EntryInput {
        EntryInput {
            category: self.state.input.category,
            description: self.state.input.description.clone(),
            value: self.state.input.value.clone(),
        }
    }

    fn render_new_entry(&mut self, key: EntryKey, description: &str, amount: Money) {
        let percentage_label = match key.category {
            Category::Income => None,
            Category::Expense => Some(PERCENTAGE_PLACEHOLDER.to_string()),
        };
        let row = Row {
            key,
            description: description.to_string(),
            amount,
            percentage_label,
        };
        match key.category {
            Category::Income => self.state.income_rows.push(row),
            Category::Expense => self.state.expense_rows.push(row),
        }
    }

    fn remove_entry_view(&mut self, key: EntryKey) {
        let rows = match key.category {
            Category::Income => &mut self.state.income_rows,
            Category::Expense => &mut self.state.expense_rows,
        };
        rows.retain(|row| row.key != key);
        self.state.clamp_selection();
    }

    fn clear_entry_inputs(&mut self) {
        self.state.input.description.clear();
        self.state.input.value.clear();
        self.state.input.focus = InputField::Description;
    }

    fn render_totals(&mut self, totals: &Totals) {
        self.state.totals = *totals;
    }

    fn render_expense_percentages(&mut self, percentages: &[Option<u32>]) {
        for (row, share) in self.state.expense_rows.iter_mut().zip(percentages) {
            row.percentage_label = Some(percentage_label(*share));
        }
    }

    fn render_current_month(&mut self) {
        let now = Utc::now().with_timezone(&self.timezone);
        self.state.month_label = now.format("%B %Y").to_string();
    }

    fn toggle_input_focus_style(&mut self) {
        self.state.input.expense_style = !self.state.input.expense_style;
    }

    fn resolve_delete_target(&self) -> Option<EntryKey> {
        self.state.selected_row().map(|row| row.key)
    }

    fn input_char(&mut self, ch: char) {
        match self.state.input.focus {
            InputField::Description => self.state.input.description.push(ch),
            InputField::Value => self.state.input.value.push(ch),
        }
    }

    fn input_backspace(&mut self) {
        match self.state.input.focus {
            InputField::Description => self.state.input.description.pop(),
            InputField::Value => self.state.input.value.pop(),
        };
    }

    fn focus_next_field(&mut self) {
        self.state.input.focus = match self.state.input.focus {
            InputField::Description => InputField::Value,
            InputField::Value => InputField::Description,
        };
    }

    fn toggle_category(&mut self) {
        self.state.input.category = self.state.input.category.other();
    }

    fn select_prev(&mut self) {
        if self.state.row_count() == 0 {
            return;
        }
        self.state.selected = Some(match self.state.selected {
            Some(indx) => indx.saturating_sub(1),
            None => 0,
        });
    }

    fn select_next(&mut self) {
        let count = self.state.row_count();
        if count == 0 {
            return;
        }
        self.state.selected = Some(match self.state.selected {
            Some(indx) => (indx + 1).min(count - 1),
            None => 0,
        });
    }
}

pub const PERCENTAGE_PLACEHOLDER: &str = "---";

/// Signed display format: the magnitude is always the absolute value, the
/// sign comes from the category (`+` income-type, `-` expense-type).
///
/// `signed_amount(Money::new(-123_450), Category::Expense)` is
/// `"- 1,234.50"`.
#[must_use]
pub fn signed_amount(amount: Money, category: Category) -> String {
    let sign = match category {
        Category::Income => '+',
        Category::Expense => '-',
    };
    format!("{sign} {}", amount.grouped())
}

/// `"25%"` for positive shares, the placeholder otherwise.
#[must_use]
pub fn percentage_label(share: Option<u32>) -> String {
    match share {
        Some(value) if value > 0 => format!("{value}%"),
        _ => PERCENTAGE_PLACEHOLDER.to_string(),
    }
}
