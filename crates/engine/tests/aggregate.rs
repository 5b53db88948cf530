use chrono::{NaiveDate, NaiveDateTime};

use engine::{
    CategoryTotal, Ledger, Money, Transaction, TransactionId, TransactionKind, YearMonth,
    build_category_series, build_daily_series, category_breakdown, compute_totals,
    group_by_category, group_by_month, highest_category, top_categories,
};

fn at(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn tx(id: &str, kind: TransactionKind, cents: i64, category: &str, date: &str) -> Transaction {
    Transaction::new(
        TransactionId::from(id),
        kind,
        Money::new(cents),
        category,
        format!("tx {id}"),
        at(date),
    )
}

fn income(id: &str, cents: i64, category: &str, date: &str) -> Transaction {
    tx(id, TransactionKind::Income, cents, category, date)
}

fn expense(id: &str, cents: i64, category: &str, date: &str) -> Transaction {
    tx(id, TransactionKind::Expense, cents, category, date)
}

fn total(category: &str, cents: i64) -> CategoryTotal {
    CategoryTotal {
        category: category.to_string(),
        amount: Money::new(cents),
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        income("1", 300_000, "Salary", "2024-05-01"),
        expense("2", 4_500, "Food & Dining", "2024-05-03"),
        expense("3", 12_000, "Shopping", "2024-05-03"),
        income("4", 50_000, "Freelance", "2024-04-20"),
        expense("5", 80_000, "Bills & Utilities", "2024-04-02"),
        expense("6", 2_500, "Food & Dining", "2024-04-15"),
        expense("7", 12_000, "Entertainment", "2023-12-31"),
        income("8", 10_000, "Investment", "2023-12-01"),
    ]
}

#[test]
fn salary_and_dining_scenario() {
    let txs = vec![
        income("1", 100_000, "Salary", "2024-05-01"),
        expense("2", 25_000, "Food & Dining", "2024-05-02"),
    ];
    let totals = compute_totals(&txs);
    assert_eq!(totals.income, Money::new(100_000));
    assert_eq!(totals.expense, Money::new(25_000));
    assert_eq!(totals.balance(), Money::new(75_000));
}

#[test]
fn two_shopping_expenses_scenario() {
    let txs = vec![
        expense("1", 4_000, "Shopping", "2024-05-01"),
        expense("2", 6_000, "Shopping", "2024-05-02"),
    ];
    assert_eq!(group_by_category(&txs), vec![total("Shopping", 10_000)]);
    assert_eq!(top_categories(&txs, 3), vec![total("Shopping", 10_000)]);
}

#[test]
fn balance_is_invariant_under_reordering() {
    let txs = sample();
    let mut reversed = txs.clone();
    reversed.reverse();
    let mut rotated = txs.clone();
    rotated.rotate_left(3);

    let expected = compute_totals(&txs);
    assert_eq!(compute_totals(&reversed), expected);
    assert_eq!(compute_totals(&rotated), expected);
    assert_eq!(
        expected.balance(),
        Money::new(300_000 + 50_000 + 10_000 - 4_500 - 12_000 - 80_000 - 2_500 - 12_000)
    );
}

#[test]
fn category_totals_sum_to_kind_totals() {
    let ledger = Ledger::from_transactions(sample());
    let totals = ledger.totals();

    let income: Money = group_by_category(&ledger.income)
        .iter()
        .map(|c| c.amount)
        .sum();
    let expenses = group_by_category(&ledger.expenses);
    let expense: Money = expenses.iter().map(|c| c.amount).sum();

    assert_eq!(income, totals.income);
    assert_eq!(expense, totals.expense);
    for c in &expenses {
        assert!(ledger.expenses.iter().any(|tx| tx.category == c.category));
    }
}

#[test]
fn categories_keep_first_seen_order() {
    let ledger = Ledger::from_transactions(sample());
    let names: Vec<_> = group_by_category(&ledger.expenses)
        .into_iter()
        .map(|c| c.category)
        .collect();
    assert_eq!(
        names,
        [
            "Food & Dining",
            "Shopping",
            "Bills & Utilities",
            "Entertainment"
        ]
    );
}

#[test]
fn top_categories_is_sorted_bounded_and_stable() {
    let ledger = Ledger::from_transactions(sample());
    let top = top_categories(&ledger.expenses, 3);
    // Shopping and Entertainment tie at 120.00; Shopping was seen first.
    assert_eq!(
        top,
        vec![
            total("Bills & Utilities", 80_000),
            total("Shopping", 12_000),
            total("Entertainment", 12_000),
        ]
    );

    assert!(top_categories(&ledger.expenses, 1).len() == 1);
    assert!(top_categories(&ledger.expenses, 0).is_empty());
    assert_eq!(top_categories(&ledger.expenses, 10).len(), 4);
}

#[test]
fn top_categories_is_a_prefix_of_the_ranked_groups() {
    let ledger = Ledger::from_transactions(sample());
    let mut ranked = group_by_category(&ledger.expenses);
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    for k in 0..=ranked.len() {
        assert_eq!(top_categories(&ledger.expenses, k), ranked[..k]);
    }
}

#[test]
fn highest_category_prefers_first_on_tie() {
    let txs = vec![
        expense("1", 500, "Shopping", "2024-05-01"),
        expense("2", 500, "Healthcare", "2024-05-01"),
    ];
    assert_eq!(highest_category(&txs), Some(total("Shopping", 500)));

    let zero = vec![expense("1", 0, "Shopping", "2024-05-01")];
    assert_eq!(highest_category(&zero), None);
}

#[test]
fn breakdown_percentages() {
    let txs = vec![
        expense("1", 7_500, "Shopping", "2024-05-01"),
        expense("2", 2_500, "Healthcare", "2024-05-01"),
    ];
    let breakdown = category_breakdown(&txs);
    assert_eq!(breakdown[0].percent, 75.0);
    assert_eq!(breakdown[1].percent, 25.0);

    let zeros = vec![expense("1", 0, "Shopping", "2024-05-01")];
    assert_eq!(category_breakdown(&zeros)[0].percent, 0.0);
}

#[test]
fn group_by_month_is_newest_first() {
    let buckets = group_by_month(&sample());
    let keys: Vec<_> = buckets.iter().map(|b| (b.year, b.month)).collect();
    assert_eq!(keys, [(2024, 5), (2024, 4), (2023, 12)]);
    assert_eq!(buckets[0].label, "May 2024");
    assert_eq!(buckets[2].label, "December 2023");

    let april = &buckets[1];
    assert_eq!(april.income.len(), 1);
    assert_eq!(april.expenses.len(), 2);
    assert_eq!(april.totals().balance(), Money::new(50_000 - 80_000 - 2_500));
}

#[test]
fn group_by_month_partitions_without_loss() {
    let txs = sample();
    let buckets = group_by_month(&txs);

    let mut seen: Vec<&str> = buckets
        .iter()
        .flat_map(|b| b.income.iter().chain(b.expenses.iter()))
        .map(|tx| tx.id.as_str())
        .collect();
    seen.sort_unstable();
    let mut expected: Vec<&str> = txs.iter().map(|tx| tx.id.as_str()).collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);

    for bucket in &buckets {
        assert!(bucket.income.iter().all(|tx| tx.kind == TransactionKind::Income));
        assert!(bucket.expenses.iter().all(|tx| tx.kind == TransactionKind::Expense));
        assert!(
            bucket
                .income
                .iter()
                .chain(bucket.expenses.iter())
                .all(|tx| tx.year_month() == bucket.year_month())
        );
    }
}

#[test]
fn category_series_is_aligned_and_restricted_to_kind() {
    let txs = sample();
    let series = build_category_series(&txs, TransactionKind::Income);
    assert_eq!(series.labels, ["Salary", "Freelance", "Investment"]);
    assert_eq!(
        series.values,
        [Money::new(300_000), Money::new(50_000), Money::new(10_000)]
    );
    assert_eq!(series.palette().len(), 3);

    let expense = build_category_series(&txs, TransactionKind::Expense);
    assert_eq!(expense.len(), 4);
    assert_eq!(
        expense.iter().next(),
        Some(("Food & Dining", Money::new(7_000)))
    );
}

#[test]
fn daily_series_for_one_month() {
    let txs = sample();
    let may = YearMonth::new(2024, 5).unwrap();
    let series = build_daily_series(&txs, Some(may));

    assert_eq!(
        series.dates,
        [
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        ]
    );
    assert_eq!(series.income_values, [Money::new(300_000), Money::ZERO]);
    assert_eq!(series.expense_values, [Money::ZERO, Money::new(16_500)]);
}

#[test]
fn daily_series_without_window_is_chronological() {
    let series = build_daily_series(&sample(), None);
    assert_eq!(series.len(), 7);
    assert!(series.dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(series.income_values.len(), series.dates.len());
    assert_eq!(series.expense_values.len(), series.dates.len());
}

#[test]
fn daily_series_for_empty_month_is_empty() {
    let june = YearMonth::new(2024, 6).unwrap();
    assert!(build_daily_series(&sample(), Some(june)).is_empty());
}

#[test]
fn aggregations_do_not_mutate_input() {
    let txs = sample();
    let before = txs.clone();
    let _ = compute_totals(&txs);
    let _ = top_categories(&txs, 2);
    let _ = group_by_month(&txs);
    let _ = build_daily_series(&txs, None);
    assert_eq!(txs, before);
}

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let huge = Money::from_major(6e16).unwrap();
    let txs = vec![
        expense("1", huge.cents(), "Shopping", "2024-05-01"),
        expense("2", huge.cents(), "Shopping", "2024-05-02"),
        income("3", 1_000, "Salary", "2024-05-02"),
    ];

    let totals = compute_totals(&txs);
    assert_eq!(totals.expense, Money::new(i64::MAX));
    assert!(totals.balance() < Money::ZERO);
    assert_eq!(
        group_by_category(&txs)[0],
        total("Shopping", i64::MAX)
    );
    assert_eq!(
        build_daily_series(&txs, None).expense_values[1],
        Money::new(huge.cents())
    );
}
