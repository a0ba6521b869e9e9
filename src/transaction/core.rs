//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

use crate::{
    category::{Category, MainCategory},
    tag::{Person, Tags},
};

time::serde::format_description!(date_format, Date, "[year]-[month]-[day]");
time::serde::format_description!(time_format, Time, "[hour]:[minute]");

// ============================================================================
// MODELS
// ============================================================================

/// An opaque identifier assigned to a transaction when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a fresh, random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The JSON form of this struct is the row format of the spreadsheet endpoint
/// and of the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Assigned at creation, never changes.
    pub id: TransactionId,
    /// When the transaction was recorded. Assigned at creation, never changes.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(flatten)]
    pub fields: TransactionFields,
}

impl Transaction {
    /// Give `fields` a fresh ID and the current time as the timestamp.
    pub fn create(fields: TransactionFields) -> Self {
        Self {
            id: TransactionId::generate(),
            timestamp: OffsetDateTime::now_utc(),
            fields,
        }
    }

    /// The amount with income positive and expenses negative.
    pub fn signed_amount(&self) -> f64 {
        if self.fields.category.is_income() {
            self.fields.amount
        } else {
            -self.fields.amount
        }
    }

    /// Whether this expense counts towards `person`'s budget.
    pub fn is_spent_by(&self, person: Person) -> bool {
        !self.fields.category.is_income() && self.fields.tags.contains(person.marker_tag())
    }

    /// The text to show for this transaction, falling back to the sub category.
    pub fn display_description(&self) -> &str {
        if self.fields.description.trim().is_empty() {
            self.fields.category.sub()
        } else {
            &self.fields.description
        }
    }

    /// Copy every field present in `patch` onto this transaction.
    ///
    /// The ID and timestamp are never changed.
    pub fn apply(&mut self, patch: TransactionPatch) {
        let fields = &mut self.fields;

        if let Some(date) = patch.date {
            fields.date = date;
        }
        if let Some(time) = patch.time {
            fields.time = time;
        }
        if let Some(category) = patch.category {
            fields.category = category;
        }
        if let Some(amount) = patch.amount {
            fields.amount = amount;
        }
        if let Some(description) = patch.description {
            fields.description = description;
        }
        if let Some(tags) = patch.tags {
            fields.tags = tags;
        }
    }
}

/// Every user-supplied field of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    /// The calendar date of the event.
    #[serde(with = "date_format")]
    pub date: Date,
    /// The clock time of the event.
    #[serde(with = "time_format")]
    pub time: Time,
    #[serde(flatten)]
    pub category: Category,
    /// The size of the transaction. Never negative, the sign comes from the category.
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Tags,
}

impl TransactionFields {
    pub fn main_category(&self) -> MainCategory {
        self.category.main()
    }
}

/// A partial update of a transaction. Fields left as `None` are unchanged and
/// omitted from the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(with = "date_format::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(with = "time_format::option", skip_serializing_if = "Option::is_none")]
    pub time: Option<Time>,
    #[serde(flatten)]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl From<TransactionFields> for TransactionPatch {
    /// A patch that replaces every user-supplied field.
    fn from(fields: TransactionFields) -> Self {
        Self {
            date: Some(fields.date),
            time: Some(fields.time),
            category: Some(fields.category),
            amount: Some(fields.amount),
            description: Some(fields.description),
            tags: Some(fields.tags),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
