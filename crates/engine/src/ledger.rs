use serde::Serialize;

use crate::{Totals, Transaction, TransactionId, TransactionKind, compute_totals};

/// Canonical income/expense split of a transaction listing.
///
/// Every server response is normalized into this shape before anything else
/// looks at it. Iteration yields income first, then expenses, each in server
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
}

impl Ledger {
    /// Splits a flat collection by kind, keeping relative order.
    pub fn from_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let (income, expenses) = transactions
            .into_iter()
            .partition(|tx| tx.kind == TransactionKind::Income);
        Self { income, expenses }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.income.iter().chain(self.expenses.iter())
    }

    pub fn of_kind(&self, kind: TransactionKind) -> &[Transaction] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expenses,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }

    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.iter().find(|tx| &tx.id == id)
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.find(id).is_some()
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(self)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::iter::Chain<std::slice::Iter<'a, Transaction>, std::slice::Iter<'a, Transaction>>;

    fn into_iter(self) -> Self::IntoIter {
        self.income.iter().chain(self.expenses.iter())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Money;

    fn tx(id: &str, kind: TransactionKind, cents: i64) -> Transaction {
        Transaction::new(
            TransactionId::from(id),
            kind,
            Money::new(cents),
            "Other",
            "",
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        )
    }

    #[test]
    fn iterates_income_then_expenses() {
        let ledger = Ledger::from_transactions(vec![
            tx("a", TransactionKind::Expense, 100),
            tx("b", TransactionKind::Income, 200),
            tx("c", TransactionKind::Expense, 300),
        ]);
        let ids: Vec<_> = ledger.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(ledger.of_kind(TransactionKind::Expense).len(), 2);
        assert!(ledger.contains(&TransactionId::from("c")));
        assert_eq!(ledger.totals().balance(), Money::new(-200));
    }

    #[test]
    fn serializes_amounts_as_cents() {
        let ledger = Ledger::from_transactions(vec![tx("a", TransactionKind::Income, 1250)]);
        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["income"][0]["amount"], 1250);
        assert_eq!(value["income"][0]["kind"], "income");
        assert_eq!(value["income"][0]["occurred_at"], "2024-01-02T03:04:05");
        assert_eq!(value["expenses"], serde_json::json!([]));
    }
}
