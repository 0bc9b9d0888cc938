//! The coordinator: sequences input events into ledger mutations and ledger
//! output into surface redraws.
//!
//! Validation is deliberately soft. Malformed add input and unresolved
//! delete targets abort silently with no state change and no render update;
//! they are not error paths.
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use ledger::{Ledger, Money};

use crate::{
    error::{AppError, Result},
    surface::{Surface, TuiSurface},
    ui::{self, keymap::AppAction},
};

pub struct App<S: Surface> {
    ledger: Ledger,
    surface: S,
    tick_rate: Duration,
    should_quit: bool,
}

impl<S: Surface> App<S> {
    pub fn new(surface: S, tick_rate: Duration) -> Self {
        Self {
            ledger: Ledger::new(),
            surface,
            tick_rate,
            should_quit: false,
        }
    }

    /// Initial render: zeroed totals and the current month.
    fn startup(&mut self) {
        self.surface.render_totals(&self.ledger.totals());
        self.surface.render_current_month();
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Submit => self.add_entry(),
            AppAction::DeleteSelected => self.delete_entry(),
            AppAction::ToggleCategory => self.change_category(),
            AppAction::NextField => self.surface.focus_next_field(),
            AppAction::Backspace => self.surface.input_backspace(),
            AppAction::Up => self.surface.select_prev(),
            AppAction::Down => self.surface.select_next(),
            AppAction::Input(ch) => self.surface.input_char(ch),
            AppAction::None => {}
        }
    }

    /// Add flow: read, validate, mutate, redraw.
    fn add_entry(&mut self) {
        let input = self.surface.read_entry_input();
        let description = input.description.trim();
        let Ok(amount) = input.value.parse::<Money>() else {
            return;
        };
        if description.is_empty() || !amount.is_positive() {
            return;
        }

        let key = self.ledger.add(input.category, description, amount);
        tracing::debug!(%key, %amount, "added entry");

        self.surface.render_new_entry(key, description, amount);
        self.surface.clear_entry_inputs();
        self.refresh_derived();
    }

    /// Delete flow: aborts silently when no row is under the cursor.
    fn delete_entry(&mut self) {
        let Some(key) = self.surface.resolve_delete_target() else {
            return;
        };

        self.ledger.delete(key);
        tracing::debug!(%key, "deleted entry");

        self.surface.remove_entry_view(key);
        self.refresh_derived();
    }

    /// Category toggle: cosmetic restyle only, no ledger interaction.
    fn change_category(&mut self) {
        self.surface.toggle_category();
        self.surface.toggle_input_focus_style();
    }

    fn refresh_derived(&mut self) {
        self.ledger.recompute_totals();
        self.ledger.recompute_percentages();
        self.surface.render_totals(&self.ledger.totals());
        self.surface
            .render_expense_percentages(&self.ledger.expense_percentages());
    }
}

impl App<TuiSurface> {
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        self.startup();

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self.surface.state()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.handle_action(ui::keymap::map_key(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ledger::{Category, EntryKey, Totals};

    use crate::surface::EntryInput;
    use crate::ui::keymap::map_key;

    struct StubSurface {
        category: Category,
        description: String,
        value: String,
        delete_target: Option<EntryKey>,
        rows: Vec<EntryKey>,
        cleared: usize,
        totals_renders: Vec<Totals>,
        percentage_renders: Vec<Vec<Option<u32>>>,
        month_renders: usize,
        restyles: usize,
    }

    impl StubSurface {
        fn new() -> Self {
            Self {
                category: Category::Income,
                description: String::new(),
                value: String::new(),
                delete_target: None,
                rows: Vec::new(),
                cleared: 0,
                totals_renders: Vec::new(),
                percentage_renders: Vec::new(),
                month_renders: 0,
                restyles: 0,
            }
        }

        fn with_input(category: Category, description: &str, value: &str) -> Self {
            let mut stub = Self::new();
            stub.category = category;
            stub.description = description.to_string();
            stub.value = value.to_string();
            stub
        }
    }

    impl Surface for StubSurface {
        fn read_entry_input(&self) -> EntryInput {
            EntryInput {
                category: self.category,
                description: self.description.clone(),
                value: self.value.clone(),
            }
        }

        fn render_new_entry(&mut self, key: EntryKey, _description: &str, _amount: Money) {
            self.rows.push(key);
        }

        fn remove_entry_view(&mut self, key: EntryKey) {
            self.rows.retain(|existing| *existing != key);
        }

        fn clear_entry_inputs(&mut self) {
            self.cleared += 1;
            self.description.clear();
            self.value.clear();
        }

        fn render_totals(&mut self, totals: &Totals) {
            self.totals_renders.push(*totals);
        }

        fn render_expense_percentages(&mut self, percentages: &[Option<u32>]) {
            self.percentage_renders.push(percentages.to_vec());
        }

        fn render_current_month(&mut self) {
            self.month_renders += 1;
        }

        fn toggle_input_focus_style(&mut self) {
            self.restyles += 1;
        }

        fn resolve_delete_target(&self) -> Option<EntryKey> {
            self.delete_target
        }

        fn input_char(&mut self, ch: char) {
            self.description.push(ch);
        }

        fn input_backspace(&mut self) {
            self.description.pop();
        }

        fn focus_next_field(&mut self) {}

        fn toggle_category(&mut self) {
            self.category = self.category.other();
        }

        fn select_prev(&mut self) {}

        fn select_next(&mut self) {}
    }

    fn app(surface: StubSurface) -> App<StubSurface> {
        App::new(surface, Duration::from_millis(200))
    }

    fn set_input(app: &mut App<StubSurface>, category: Category, description: &str, value: &str) {
        app.surface.category = category;
        app.surface.description = description.to_string();
        app.surface.value = value.to_string();
    }

    #[test]
    fn startup_renders_zeroed_totals_and_month() {
        let mut app = app(StubSurface::new());
        app.startup();

        assert_eq!(app.surface.totals_renders, vec![Totals::default()]);
        assert_eq!(app.surface.month_renders, 1);
    }

    #[test]
    fn add_flow_renders_clears_and_recomputes() {
        let mut app = app(StubSurface::with_input(
            Category::Income,
            "Salary",
            "1000",
        ));
        app.handle_action(AppAction::Submit);

        assert_eq!(app.surface.rows, vec![EntryKey::new(Category::Income, 1)]);
        assert_eq!(app.surface.cleared, 1);

        let totals = app.surface.totals_renders.last().unwrap();
        assert_eq!(totals.total_income, Money::new(100_000));
        assert_eq!(totals.budget, Money::new(100_000));
        assert_eq!(totals.expense_ratio, None);
        assert_eq!(app.surface.percentage_renders, vec![Vec::new()]);
    }

    #[test]
    fn add_flow_trims_the_description() {
        let mut app = app(StubSurface::with_input(
            Category::Expense,
            "  Rent  ",
            "250",
        ));
        app.handle_action(AppAction::Submit);

        assert_eq!(app.ledger.expenses()[0].entry.description, "Rent");
    }

    #[test]
    fn invalid_add_input_is_silently_rejected() {
        for (description, value) in [
            ("", "100"),
            ("   ", "100"),
            ("Rent", ""),
            ("Rent", "abc"),
            ("Rent", "0"),
            ("Rent", "-5"),
        ] {
            let mut app = app(StubSurface::with_input(
                Category::Expense,
                description,
                value,
            ));
            app.handle_action(AppAction::Submit);

            assert!(app.surface.rows.is_empty(), "{description:?}/{value:?}");
            assert_eq!(app.surface.cleared, 0);
            assert!(app.surface.totals_renders.is_empty());
            assert!(app.ledger.expenses().is_empty());
        }
    }

    #[test]
    fn delete_flow_removes_the_row_and_recomputes() {
        let mut app = app(StubSurface::with_input(
            Category::Income,
            "Salary",
            "1000",
        ));
        app.handle_action(AppAction::Submit);
        set_input(&mut app, Category::Expense, "Rent", "250");
        app.handle_action(AppAction::Submit);

        app.surface.delete_target = Some(EntryKey::new(Category::Income, 1));
        app.handle_action(AppAction::DeleteSelected);

        assert_eq!(app.surface.rows, vec![EntryKey::new(Category::Expense, 1)]);
        let totals = app.surface.totals_renders.last().unwrap();
        assert_eq!(totals.total_income, Money::ZERO);
        assert_eq!(totals.budget, Money::new(-25_000));
        assert_eq!(totals.expense_ratio, None);
        assert_eq!(app.surface.percentage_renders.last().unwrap(), &vec![None]);
    }

    #[test]
    fn delete_without_a_target_is_silently_ignored() {
        let mut app = app(StubSurface::with_input(
            Category::Income,
            "Salary",
            "1000",
        ));
        app.handle_action(AppAction::Submit);
        let renders = app.surface.totals_renders.len();

        app.handle_action(AppAction::DeleteSelected);

        assert_eq!(app.surface.rows.len(), 1);
        assert_eq!(app.surface.totals_renders.len(), renders);
        assert_eq!(app.ledger.incomes().len(), 1);
    }

    #[test]
    fn category_toggle_touches_no_ledger_state() {
        let mut app = app(StubSurface::new());
        app.handle_action(AppAction::ToggleCategory);

        assert_eq!(app.surface.restyles, 1);
        assert_eq!(app.surface.category, Category::Expense);
        assert!(app.surface.totals_renders.is_empty());
        assert!(app.ledger.incomes().is_empty());
        assert!(app.ledger.expenses().is_empty());
    }

    #[test]
    fn quit_action_stops_the_loop() {
        let mut app = app(StubSurface::new());
        app.handle_action(AppAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn enter_key_maps_to_the_add_flow() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), AppAction::Submit);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), AppAction::Quit);
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Delete)),
            AppAction::DeleteSelected
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            AppAction::Input('a')
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppAction::Quit
        );
    }
}
