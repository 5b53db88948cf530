//! Plain-text and JSON renderings of engine views for the `tally` binary.

use std::collections::BTreeMap;

use engine::{
    Category, CategorySeries, CategoryTotal, DailySeries, Ledger, Money, MonthBucket,
    TransactionKind, build_category_series, category_share, highest_category, top_categories,
};
use serde::Serialize;

use crate::store::Snapshot;

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
    pub transactions: usize,
    pub top_categories: Vec<CategoryTotal>,
    pub highest_category: Option<CategoryTotal>,
}

impl Summary {
    pub fn new(snapshot: &Snapshot, top: usize) -> Self {
        let expenses = snapshot.ledger.of_kind(TransactionKind::Expense);
        Self {
            income: snapshot.totals.income,
            expense: snapshot.totals.expense,
            balance: snapshot.totals.balance(),
            transactions: snapshot.ledger.len(),
            top_categories: top_categories(expenses, top),
            highest_category: highest_category(expenses),
        }
    }

    pub fn render(&self, symbol: &str) -> String {
        let mut lines = vec![
            format!("{:<10}{}", "Income", money(self.income, symbol)),
            format!("{:<10}{}", "Expenses", money(self.expense, symbol)),
            format!("{:<10}{}", "Balance", money(self.balance, symbol)),
            format!("{} transactions", self.transactions),
        ];

        if !self.top_categories.is_empty() {
            lines.push(String::new());
            lines.push("Top expense categories".to_string());
            let max = self.top_categories[0].amount;
            for c in &self.top_categories {
                lines.push(format!(
                    "  {:<width$} {:>12}  {}",
                    truncate(&c.category, LABEL_WIDTH),
                    money(c.amount, symbol),
                    bar(c.amount, max, BAR_WIDTH),
                    width = LABEL_WIDTH,
                ));
            }
        }
        if let Some(highest) = &self.highest_category {
            lines.push(format!(
                "Highest expense: {} ({})",
                highest.category,
                money(highest.amount, symbol)
            ));
        }

        lines.join("\n")
    }
}

/// Category totals for one kind with their colours and shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub kind: TransactionKind,
    #[serde(flatten)]
    pub series: CategorySeries,
    pub colors: Vec<String>,
    pub percents: Vec<f64>,
}

impl CategoryView {
    pub fn new(ledger: &Ledger, kind: TransactionKind) -> Self {
        let series = build_category_series(ledger, kind);
        let total: Money = series.values.iter().sum();
        Self {
            kind,
            colors: series.palette(),
            percents: series
                .values
                .iter()
                .map(|value| category_share(*value, total))
                .collect(),
            series,
        }
    }

    pub fn render(&self, symbol: &str) -> String {
        if self.series.is_empty() {
            return format!("No {} transactions", self.kind);
        }
        let max = self.series.values.iter().copied().max().unwrap_or(Money::ZERO);
        self.series
            .iter()
            .zip(&self.percents)
            .map(|((label, amount), percent)| {
                format!(
                    "{:<width$} {:>12} {:>6.1}%  {}",
                    truncate(label, LABEL_WIDTH),
                    money(amount, symbol),
                    percent,
                    bar(amount, max, BAR_WIDTH),
                    width = LABEL_WIDTH,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn render_months(buckets: &[MonthBucket], symbol: &str) -> String {
    if buckets.is_empty() {
        return "No transactions".to_string();
    }
    buckets
        .iter()
        .map(|bucket| {
            let totals = bucket.totals();
            let mut line = format!(
                "{:<16} income {:>12}  expenses {:>12}  balance {:>12}  ({} entries)",
                bucket.label,
                money(totals.income, symbol),
                money(totals.expense, symbol),
                money(totals.balance(), symbol),
                bucket.len(),
            );
            if let Some(top) = highest_category(&bucket.income) {
                line.push_str(&format!("\n  top income:  {}", top.category));
            }
            if let Some(top) = highest_category(&bucket.expenses) {
                line.push_str(&format!("\n  top expense: {}", top.category));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_daily(series: &DailySeries, symbol: &str) -> String {
    if series.is_empty() {
        return "No transactions in range".to_string();
    }
    series
        .dates
        .iter()
        .zip(&series.income_values)
        .zip(&series.expense_values)
        .map(|((date, income), expense)| {
            format!(
                "{date}  +{:>12}  -{:>12}",
                money(*income, symbol),
                money(*expense, symbol)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accepted category labels keyed by kind.
pub fn category_list() -> BTreeMap<&'static str, Vec<&'static str>> {
    [TransactionKind::Income, TransactionKind::Expense]
        .into_iter()
        .map(|kind| (kind.as_str(), Category::for_kind(kind).map(Category::label).collect()))
        .collect()
}

pub fn render_category_list() -> String {
    category_list()
        .into_iter()
        .map(|(kind, labels)| format!("{kind}: {}", labels.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `$12.34`, with the sign in front of the symbol.
pub fn money(amount: Money, symbol: &str) -> String {
    if amount.cents() < 0 {
        format!("-{symbol}{}", amount.abs())
    } else {
        format!("{symbol}{amount}")
    }
}

/// Horizontal bar like `████████░░░░░░░░░░░░`.
fn bar(value: Money, max: Money, width: usize) -> String {
    if !max.is_positive() {
        return "░".repeat(width);
    }

    let ratio = (value.cents() as f64 / max.cents() as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);

    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
