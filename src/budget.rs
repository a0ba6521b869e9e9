//! Monthly spending limits for each person, kept in the device-local store.
//!
//! Budgets are never sent to the remote endpoint. Every change is written
//! back to the local store immediately.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    month::MonthKey,
    snapshot_store::{MONTHLY_BUDGETS_KEY, SnapshotStore},
    tag::Person,
};

/// The spending limit of each person for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBudget")]
pub struct Budget {
    pub zhu: f64,
    pub luo: f64,
}

/// A stored budget before its limits have been checked.
#[derive(Deserialize)]
struct RawBudget {
    zhu: f64,
    luo: f64,
}

impl TryFrom<RawBudget> for Budget {
    type Error = Error;

    fn try_from(raw: RawBudget) -> Result<Self, Self::Error> {
        Budget::new(raw.zhu, raw.luo)
    }
}

impl Budget {
    /// Create a budget.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if a limit is negative or not finite.
    pub fn new(zhu: f64, luo: f64) -> Result<Self, Error> {
        for limit in [zhu, luo] {
            if !limit.is_finite() || limit < 0.0 {
                return Err(Error::InvalidAmount(limit.to_string()));
            }
        }

        Ok(Self { zhu, luo })
    }

    pub fn limit(&self, person: Person) -> f64 {
        match person {
            Person::Zhu => self.zhu,
            Person::Luo => self.luo,
        }
    }
}

/// Budgets by month. Months without an entry have zero limits.
pub type MonthlyBudgets = BTreeMap<MonthKey, Budget>;

/// How much of a person's budget has been used in a month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    pub person: Person,
    pub spent: f64,
    pub limit: f64,
    /// `limit - spent`, negative when over budget.
    pub remaining: f64,
    /// Share of the limit spent, rounded and clamped to `0..=100`. Zero when
    /// the limit is zero.
    pub percentage: u8,
}

impl BudgetUsage {
    pub fn new(person: Person, spent: f64, limit: f64) -> Self {
        let percentage = if limit > 0.0 {
            (spent / limit * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        Self {
            person,
            spent,
            limit,
            remaining: limit - spent,
            percentage,
        }
    }
}

/// The stored budgets, read from the local store on every call and written
/// back on every change.
#[derive(Clone)]
pub struct BudgetBook {
    store: Arc<dyn SnapshotStore>,
}

impl BudgetBook {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Every stored budget.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or holds invalid JSON.
    pub fn all(&self) -> Result<MonthlyBudgets, Error> {
        parse_snapshot(self.store.load(MONTHLY_BUDGETS_KEY)?)
    }

    /// The budget for `month`, or zero limits if none has been set.
    pub fn get(&self, month: MonthKey) -> Result<Budget, Error> {
        Ok(self.all()?.get(&month).copied().unwrap_or_default())
    }

    /// Set the budget for `month`, replacing any previous budget for that month.
    pub fn set(&self, month: MonthKey, budget: Budget) -> Result<(), Error> {
        self.store.update(MONTHLY_BUDGETS_KEY, &mut |snapshot| {
            let mut budgets = parse_snapshot(snapshot)?;
            budgets.insert(month, budget);

            serde_json::to_string(&budgets)
                .map_err(|error| Error::JSONSerializationError(error.to_string()))
        })?;
        tracing::info!("Saved budget for {month}: {budget:?}");

        Ok(())
    }
}

fn parse_snapshot(snapshot: Option<String>) -> Result<MonthlyBudgets, Error> {
    match snapshot {
        Some(snapshot) => serde_json::from_str(&snapshot)
            .map_err(|error| Error::JSONSerializationError(error.to_string())),
        None => Ok(MonthlyBudgets::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        budget::{Budget, BudgetBook, BudgetUsage},
        db::initialize,
        month::MonthKey,
        snapshot_store::{MONTHLY_BUDGETS_KEY, SnapshotStore, SqliteSnapshotStore},
        tag::Person,
    };

    fn get_test_store() -> Arc<SqliteSnapshotStore> {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        Arc::new(SqliteSnapshotStore::new(Arc::new(Mutex::new(conn))))
    }

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert_eq!(
            Budget::new(-1.0, 0.0),
            Err(Error::InvalidAmount("-1".to_owned()))
        );
        assert!(Budget::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn unset_month_has_zero_limits() {
        let book = BudgetBook::new(get_test_store());

        assert_eq!(book.get(march()), Ok(Budget::default()));
    }

    #[test]
    fn set_persists_immediately() {
        let store = get_test_store();
        let book = BudgetBook::new(store.clone());

        book.set(march(), Budget::new(1000.0, 800.0).unwrap()).unwrap();

        let snapshot = store.load(MONTHLY_BUDGETS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "2024-03": { "zhu": 1000.0, "luo": 800.0 } })
        );
        assert_eq!(
            BudgetBook::new(store).get(march()),
            Ok(Budget::new(1000.0, 800.0).unwrap())
        );
    }

    #[test]
    fn set_overwrites_only_that_month() {
        let book = BudgetBook::new(get_test_store());
        let april = march().next();
        book.set(march(), Budget::new(1.0, 2.0).unwrap()).unwrap();
        book.set(april, Budget::new(3.0, 4.0).unwrap()).unwrap();

        book.set(march(), Budget::new(5.0, 6.0).unwrap()).unwrap();

        let all = book.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[&march()], Budget::new(5.0, 6.0).unwrap());
        assert_eq!(all[&april], Budget::new(3.0, 4.0).unwrap());
    }

    #[test]
    fn stored_negative_limit_is_rejected() {
        let store = get_test_store();
        store
            .save(MONTHLY_BUDGETS_KEY, r#"{"2024-03":{"zhu":-5.0,"luo":100.0}}"#)
            .unwrap();
        let book = BudgetBook::new(store);

        let result = book.all();

        assert!(
            matches!(result, Err(Error::JSONSerializationError(_))),
            "want JSON error, got {result:?}"
        );
    }

    #[test]
    fn concurrent_sets_keep_every_month() {
        let book = BudgetBook::new(get_test_store());

        let handles: Vec<_> = (1..=12)
            .map(|month| {
                let book = book.clone();
                std::thread::spawn(move || {
                    let month = MonthKey::new(2024, month).unwrap();
                    book.set(month, Budget::new(100.0, 200.0).unwrap()).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(book.all().unwrap().len(), 12);
    }

    #[test]
    fn usage_half_spent() {
        let usage = BudgetUsage::new(Person::Zhu, 500.0, 1000.0);

        assert_eq!(usage.remaining, 500.0);
        assert_eq!(usage.percentage, 50);
    }

    #[test]
    fn usage_zero_limit_is_zero_percent() {
        let usage = BudgetUsage::new(Person::Luo, 300.0, 0.0);

        assert_eq!(usage.percentage, 0);
        assert_eq!(usage.remaining, -300.0);
    }

    #[test]
    fn usage_is_clamped_to_one_hundred() {
        let usage = BudgetUsage::new(Person::Zhu, 1500.0, 1000.0);

        assert_eq!(usage.percentage, 100);
        assert_eq!(usage.remaining, -500.0);
    }

    #[test]
    fn usage_percentage_stays_in_range() {
        let limits = [0.0, 0.5, 1.0, 3.0, 999.0, 1e9];
        let spends = [0.0, 0.2, 1.0, 2.5, 1000.0, 1e12];

        for limit in limits {
            for spent in spends {
                let usage = BudgetUsage::new(Person::Zhu, spent, limit);
                assert!(
                    usage.percentage <= 100,
                    "spent {spent} of {limit} gave {}%",
                    usage.percentage
                );
            }
        }
    }
}
