//! Derived views over a transaction collection.
//!
//! Every function here is pure: it borrows its input, never mutates it and
//! returns the same output for the same input. Empty input gives empty
//! output.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::{Money, Transaction, TransactionKind, YearMonth};

/// Limit used by [`top_categories`] callers when nothing else is configured.
pub const DEFAULT_TOP_CATEGORIES: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    #[must_use]
    pub fn balance(&self) -> Money {
        self.income - self.expense
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// Percentage of the group total, `0.0` when the total is zero.
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// e.g. `October 2026`
    pub label: String,
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
}

impl MonthBucket {
    fn new(key: YearMonth) -> Self {
        Self {
            year: key.year,
            month: key.month,
            label: key.label(),
            income: Vec::new(),
            expenses: Vec::new(),
        }
    }

    #[must_use]
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(self.income.iter().chain(self.expenses.iter()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sums income and expense amounts separately.
pub fn compute_totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Totals::default(), |mut totals, tx| {
            match tx.kind {
                TransactionKind::Income => totals.income += tx.amount,
                TransactionKind::Expense => totals.expense += tx.amount,
            }
            totals
        })
}

/// Sums amounts per category in first-seen order.
///
/// Only categories present in the input appear in the output.
pub fn group_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for tx in transactions {
        match index.get(tx.category.as_str()) {
            Some(&pos) => totals[pos].amount += tx.amount,
            None => {
                index.insert(tx.category.as_str(), totals.len());
                totals.push(CategoryTotal {
                    category: tx.category.clone(),
                    amount: tx.amount,
                });
            }
        }
    }

    totals
}

/// Categories ranked by amount, largest first, at most `limit` entries.
///
/// The sort is stable, so equal amounts keep their first-seen order.
pub fn top_categories<'a, I>(transactions: I, limit: usize) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut ranked = group_by_category(transactions);
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(limit);
    ranked
}

/// The single largest category, `None` when nothing has a positive total.
///
/// On a tie the category seen first wins.
pub fn highest_category<'a, I>(transactions: I) -> Option<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    group_by_category(transactions)
        .into_iter()
        .filter(|c| c.amount.is_positive())
        .reduce(|best, current| {
            if current.amount > best.amount {
                current
            } else {
                best
            }
        })
}

/// `part` as a percentage of `total`; a zero total gives `0.0`.
#[must_use]
pub fn category_share(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    part.cents() as f64 / total.cents() as f64 * 100.0
}

/// [`group_by_category`] with each entry's share of the group total.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let totals = group_by_category(transactions);
    let total: Money = totals.iter().map(|c| c.amount).sum();

    totals
        .into_iter()
        .map(|c| CategoryShare {
            percent: category_share(c.amount, total),
            category: c.category,
            amount: c.amount,
        })
        .collect()
}

/// Buckets transactions by calendar month, newest month first.
///
/// Income and expenses stay in separate sub-collections, each in input
/// order. Every input transaction lands in exactly one bucket.
pub fn group_by_month<'a, I>(transactions: I) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<YearMonth, MonthBucket> = BTreeMap::new();

    for tx in transactions {
        let key = tx.year_month();
        let bucket = months.entry(key).or_insert_with(|| MonthBucket::new(key));
        match tx.kind {
            TransactionKind::Income => bucket.income.push(tx.clone()),
            TransactionKind::Expense => bucket.expenses.push(tx.clone()),
        }
    }

    months.into_values().rev().collect()
}
