//! In-memory budget ledger: income and expense entries with derived totals.
//!
//! The ledger owns entry storage and the derived figures (totals, budget,
//! overall expense ratio, per-expense percentages). It knows nothing about
//! rendering. Derived figures are recomputed by full passes triggered
//! explicitly by the caller after each mutation, never patched incrementally.
pub use entry::{Category, Entry, EntryKey, Expense};
pub use error::LedgerError;
pub use money::Money;

mod entry;
mod error;
mod money;

/// Read-only projection of the derived figures.
///
/// `expense_ratio` is `None` whenever total income is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub budget: Money,
    pub total_income: Money,
    pub total_expense: Money,
    pub expense_ratio: Option<u32>,
}

/// The aggregate root: one instance per session, owned by the coordinator
/// and mutated in place.
///
/// Entries are created only through [`add`] and destroyed only through
/// [`delete`]. Neither triggers recomputation; callers sequence
/// [`recompute_totals`] and [`recompute_percentages`] themselves before
/// reading the derived figures.
///
/// [`add`]: Ledger::add
/// [`delete`]: Ledger::delete
/// [`recompute_totals`]: Ledger::recompute_totals
/// [`recompute_percentages`]: Ledger::recompute_percentages
#[derive(Debug, Default)]
pub struct Ledger {
    incomes: Vec<Entry>,
    expenses: Vec<Expense>,
    totals: Totals,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new entry to its category and returns the assigned key.
    ///
    /// The caller is expected to have validated the input already: a
    /// non-empty description and an amount > 0. Ids grow monotonically per
    /// category (max surviving id + 1, or 1 when the category is empty) and
    /// are never reassigned after a delete.
    pub fn add(&mut self, category: Category, description: &str, amount: Money) -> EntryKey {
        let id = self.next_id(category);
        let entry = Entry {
            id,
            description: description.to_string(),
            amount,
        };

        match category {
            Category::Income => self.incomes.push(entry),
            Category::Expense => self.expenses.push(Expense {
                entry,
                percentage: None,
            }),
        }

        EntryKey::new(category, id)
    }

    /// Removes the entry matching `key`. Missing keys are a silent no-op.
    pub fn delete(&mut self, key: EntryKey) {
        match key.category {
            Category::Income => self.incomes.retain(|entry| entry.id != key.id),
            Category::Expense => self.expenses.retain(|expense| expense.entry.id != key.id),
        }
    }

    /// Recomputes totals, budget and the overall expense ratio by summing
    /// the current collections.
    pub fn recompute_totals(&mut self) {
        let total_income = self
            .incomes
            .iter()
            .fold(Money::ZERO, |acc, entry| acc + entry.amount);
        let total_expense = self
            .expenses
            .iter()
            .fold(Money::ZERO, |acc, expense| acc + expense.entry.amount);

        self.totals = Totals {
            budget: total_income - total_expense,
            total_income,
            total_expense,
            expense_ratio: percentage(total_expense, total_income),
        };
    }

    /// Recomputes every expense's share of the current total income.
    ///
    /// Reads the total income produced by [`recompute_totals`]; call that
    /// first after a mutation, or the shares are computed against stale
    /// totals.
    ///
    /// [`recompute_totals`]: Ledger::recompute_totals
    pub fn recompute_percentages(&mut self) {
        let total_income = self.totals.total_income;
        for expense in &mut self.expenses {
            expense.percentage = percentage(expense.entry.amount, total_income);
        }
    }

    /// Snapshot of the derived figures as of the last recompute pass.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Per-expense percentages in display order.
    #[must_use]
    pub fn expense_percentages(&self) -> Vec<Option<u32>> {
        self.expenses
            .iter()
            .map(|expense| expense.percentage)
            .collect()
    }

    #[must_use]
    pub fn incomes(&self) -> &[Entry] {
        &self.incomes
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    fn next_id(&self, category: Category) -> u32 {
        let max = match category {
            Category::Income => self.incomes.iter().map(|entry| entry.id).max(),
            Category::Expense => self.expenses.iter().map(|expense| expense.entry.id).max(),
        };
        max.map_or(1, |id| id + 1)
    }
}

/// Integer-rounded share of `part` in `whole`, as a percentage.
///
/// `None` when `whole` is not positive. Rounds half up on positive operands,
/// matching the usual display rounding.
fn percentage(part: Money, whole: Money) -> Option<u32> {
    if !whole.is_positive() {
        return None;
    }

    let part = i128::from(part.cents());
    let whole = i128::from(whole.cents());
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).ok()
}
