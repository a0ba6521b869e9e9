//! View state for the ledger: the full transaction set, the selected month,
//! and the figures derived from them.
//!
//! A view is built from a fresh read of the transactions on every request,
//! and every derived figure is recomputed from it on demand.

use std::collections::BTreeMap;

use crate::{
    budget::{Budget, BudgetUsage},
    category::MainCategory,
    month::MonthKey,
    tag::Person,
    transaction::Transaction,
};

/// Total spend per person for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonTotals {
    pub zhu: f64,
    pub luo: f64,
}

impl PersonTotals {
    pub fn get(&self, person: Person) -> f64 {
        match person {
            Person::Zhu => self.zhu,
            Person::Luo => self.luo,
        }
    }
}

/// The ledger as seen from one selected month.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    transactions: Vec<Transaction>,
    selected: MonthKey,
}

impl LedgerView {
    pub fn new(transactions: Vec<Transaction>, selected: MonthKey) -> Self {
        Self {
            transactions,
            selected,
        }
    }

    pub fn selected_month(&self) -> MonthKey {
        self.selected
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id.as_str() == id)
    }

    /// The transactions dated in the selected month, in stored order.
    pub fn month_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| self.selected.contains(transaction.fields.date))
    }

    /// The transactions dated in the selected month, newest first by date
    /// then time.
    pub fn month_transactions_newest_first(&self) -> Vec<&Transaction> {
        let mut transactions: Vec<_> = self.month_transactions().collect();
        transactions.sort_by(|a, b| {
            (b.fields.date, b.fields.time).cmp(&(a.fields.date, a.fields.time))
        });
        transactions
    }

    /// Income minus expenses in the selected month.
    pub fn monthly_net(&self) -> f64 {
        self.month_transactions()
            .map(Transaction::signed_amount)
            .sum()
    }

    /// Expenses in the selected month tagged with each person's marker.
    ///
    /// An expense tagged with both markers counts in full for both people.
    pub fn spent_by_person(&self) -> PersonTotals {
        let spent_by = |person: Person| -> f64 {
            self.month_transactions()
                .filter(|transaction| transaction.is_spent_by(person))
                .map(|transaction| transaction.fields.amount)
                .sum()
        };

        PersonTotals {
            zhu: spent_by(Person::Zhu),
            luo: spent_by(Person::Luo),
        }
    }

    /// Budget usage for each person in banner order.
    pub fn budget_usage(&self, budget: &Budget) -> [BudgetUsage; 2] {
        let spent = self.spent_by_person();

        Person::ALL.map(|person| BudgetUsage::new(person, spent.get(person), budget.limit(person)))
    }

    /// Expense totals by main category for the selected month, omitting
    /// categories with no expenses.
    pub fn expenses_by_category(&self) -> BTreeMap<MainCategory, f64> {
        let mut totals = BTreeMap::new();

        for transaction in self.month_transactions() {
            let category = transaction.fields.main_category();
            if category.is_income() {
                continue;
            }

            *totals.entry(category).or_insert(0.0) += transaction.fields.amount;
        }

        totals
    }
}
