use ledger::{Category, EntryKey, Ledger, Money};

fn refresh(ledger: &mut Ledger) {
    ledger.recompute_totals();
    ledger.recompute_percentages();
}

#[test]
fn single_income_yields_budget_and_undefined_ratio() {
    let mut ledger = Ledger::new();
    ledger.add(Category::Income, "Salary", Money::new(100_000));
    refresh(&mut ledger);

    let totals = ledger.totals();
    assert_eq!(totals.total_income, Money::new(100_000));
    assert_eq!(totals.total_expense, Money::ZERO);
    assert_eq!(totals.budget, Money::new(100_000));
    assert_eq!(totals.expense_ratio, None);
}

#[test]
fn income_and_expense_yield_ratio_and_share() {
    let mut ledger = Ledger::new();
    ledger.add(Category::Income, "Salary", Money::new(100_000));
    ledger.add(Category::Expense, "Rent", Money::new(25_000));
    refresh(&mut ledger);

    let totals = ledger.totals();
    assert_eq!(totals.total_expense, Money::new(25_000));
    assert_eq!(totals.budget, Money::new(75_000));
    assert_eq!(totals.expense_ratio, Some(25));
    assert_eq!(ledger.expense_percentages(), vec![Some(25)]);
}

#[test]
fn expenses_without_income_have_undefined_shares() {
    let mut ledger = Ledger::new();
    ledger.add(Category::Expense, "Rent", Money::new(10_000));
    ledger.add(Category::Expense, "Food", Money::new(10_000));
    refresh(&mut ledger);

    assert_eq!(ledger.totals().expense_ratio, None);
    assert_eq!(ledger.expense_percentages(), vec![None, None]);
}

#[test]
fn shares_follow_income_changes() {
    let mut ledger = Ledger::new();
    ledger.add(Category::Income, "Salary", Money::new(100_000));
    ledger.add(Category::Expense, "Rent", Money::new(25_000));
    ledger.add(Category::Expense, "Food", Money::new(12_500));
    refresh(&mut ledger);

    assert_eq!(ledger.expense_percentages(), vec![Some(25), Some(13)]);

    ledger.add(Category::Income, "Bonus", Money::new(100_000));
    refresh(&mut ledger);

    assert_eq!(ledger.totals().expense_ratio, Some(19));
    assert_eq!(ledger.expense_percentages(), vec![Some(13), Some(6)]);
}

#[test]
fn delete_then_add_never_reuses_an_id() {
    let mut ledger = Ledger::new();
    let first = ledger.add(Category::Expense, "Rent", Money::new(10_000));
    let second = ledger.add(Category::Expense, "Food", Money::new(5_000));
    assert_eq!((first.id, second.id), (1, 2));

    ledger.delete(first);
    refresh(&mut ledger);

    let third = ledger.add(Category::Expense, "Fuel", Money::new(2_000));
    assert_eq!(third, EntryKey::new(Category::Expense, 3));
    refresh(&mut ledger);

    assert_eq!(ledger.totals().total_expense, Money::new(7_000));
}

#[test]
fn same_numeric_id_may_exist_in_both_categories() {
    let mut ledger = Ledger::new();
    let income = ledger.add(Category::Income, "Salary", Money::new(100_000));
    let expense = ledger.add(Category::Expense, "Rent", Money::new(25_000));
    assert_eq!(income.id, expense.id);

    ledger.delete(expense);
    refresh(&mut ledger);

    assert_eq!(ledger.incomes().len(), 1);
    assert!(ledger.expenses().is_empty());
    assert_eq!(ledger.totals().budget, Money::new(100_000));
}
