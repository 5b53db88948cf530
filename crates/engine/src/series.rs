//! Chart-ready series.
//!
//! Charting consumes these as parallel vectors; the engine only guarantees
//! positional alignment, it never draws anything.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Money, Transaction, TransactionKind, YearMonth, group_by_category};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

impl CategorySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// One colour per label, stable for a given position.
    #[must_use]
    pub fn palette(&self) -> Vec<String> {
        (0..self.labels.len()).map(palette_color).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Golden-angle hue spacing so neighbouring slices never share a colour.
#[must_use]
pub fn palette_color(index: usize) -> String {
    let hue = (index as f64 * 137.5) % 360.0;
    format!("hsl({hue}, 70%, 65%)")
}

/// Category labels (first-seen order) and their totals for one kind.
pub fn build_category_series<'a, I>(transactions: I, kind: TransactionKind) -> CategorySeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (labels, values): (Vec<String>, Vec<Money>) =
        group_by_category(transactions.into_iter().filter(|tx| tx.kind == kind))
            .into_iter()
            .map(|c| (c.category, c.amount))
            .unzip();
    CategorySeries { labels, values }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub income_values: Vec<Money>,
    pub expense_values: Vec<Money>,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Per-day income and expense sums, dates ascending.
///
/// With `Some(month)` only days of that month are kept; pass
/// [`YearMonth::current()`] for the usual dashboard window. Only days with at
/// least one transaction appear, and a kind with nothing on that day is `0`.
pub fn build_daily_series<'a, I>(transactions: I, month: Option<YearMonth>) -> DailySeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut days: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

    for tx in transactions {
        let day = tx.day();
        if month.is_some_and(|m| !m.contains(day)) {
            continue;
        }
        let entry = days.entry(day).or_default();
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            TransactionKind::Expense => entry.1 += tx.amount,
        }
    }

    let mut series = DailySeries::default();
    for (date, (income, expense)) in days {
        series.dates.push(date);
        series.income_values.push(income);
        series.expense_values.push(expense);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_golden_angle() {
        assert_eq!(palette_color(0), "hsl(0, 70%, 65%)");
        assert_eq!(palette_color(1), "hsl(137.5, 70%, 65%)");
        assert_eq!(palette_color(2), "hsl(275, 70%, 65%)");
        assert_eq!(palette_color(3), "hsl(52.5, 70%, 65%)");
    }
}
