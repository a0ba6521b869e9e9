//! Calendar months, used both to index budgets and to select which
//! transactions the ledger page displays.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{Error, timezone::local_today};

/// A calendar year and month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    /// One-based month number, always in `1..=12`.
    month: u8,
}

impl MonthKey {
    /// Create a month key.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonthKey] if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(Error::InvalidMonthKey(format!("{year:04}-{month:02}")))
        }
    }

    /// The month that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// The month `offset` months after this one (before it if negative).
    pub fn offset(self, offset: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + offset;

        Self {
            year: index.div_euclid(12),
            month: (index.rem_euclid(12) + 1) as u8,
        }
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Whether `date` falls in the same calendar year and month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() as u8 == self.month
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let format = format_description!("[year]-[month]-[day]");

        Date::parse(&format!("{s}-01"), &format)
            .map(MonthKey::of)
            .map_err(|_| Error::InvalidMonthKey(s.to_owned()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(month: MonthKey) -> Self {
        month.to_string()
    }
}

/// The `?month=YYYY-MM` query parameter shared by the month scoped pages.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested month, or the current month in `local_timezone` if no
    /// month was given.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonthKey] for a malformed month and
    /// [Error::InvalidTimezoneError] if the timezone is unknown.
    pub fn resolve(&self, local_timezone: &str) -> Result<MonthKey, Error> {
        match self.month.as_deref().map(str::trim) {
            Some(month) if !month.is_empty() => month.parse(),
            _ => local_today(local_timezone).map(MonthKey::of),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        month::{MonthKey, MonthQuery},
    };

    #[test]
    fn parses_and_formats() {
        let month: MonthKey = "2024-03".parse().unwrap();

        assert_eq!(month, MonthKey::new(2024, 3).unwrap());
        assert_eq!(month.to_string(), "2024-03");
    }

    #[test]
    fn rejects_invalid_month() {
        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(Error::InvalidMonthKey("2024-13".to_owned()))
        );
        assert!("March".parse::<MonthKey>().is_err());
        assert!(MonthKey::new(2024, 0).is_err());
    }

    #[test]
    fn offset_wraps_across_years() {
        let january = MonthKey::new(2024, 1).unwrap();

        assert_eq!(january.previous(), MonthKey::new(2023, 12).unwrap());
        assert_eq!(january.offset(12), MonthKey::new(2025, 1).unwrap());
        assert_eq!(january.offset(-25), MonthKey::new(2021, 12).unwrap());
        assert_eq!(MonthKey::new(2024, 12).unwrap().next(), MonthKey::new(2025, 1).unwrap());
    }

    #[test]
    fn contains_matches_year_and_month() {
        let march = MonthKey::new(2024, 3).unwrap();

        assert!(march.contains(date!(2024 - 03 - 01)));
        assert!(march.contains(date!(2024 - 03 - 31)));
        assert!(!march.contains(date!(2024 - 04 - 01)));
        assert!(!march.contains(date!(2023 - 03 - 05)));
    }

    #[test]
    fn serializes_as_string() {
        let month = MonthKey::new(2024, 3).unwrap();

        assert_eq!(serde_json::to_string(&month).unwrap(), r#""2024-03""#);
    }

    #[test]
    fn query_uses_given_month() {
        let query = MonthQuery {
            month: Some("2024-03".to_owned()),
        };

        assert_eq!(query.resolve("Etc/UTC"), MonthKey::new(2024, 3));
    }

    #[test]
    fn empty_query_uses_current_month() {
        let query = MonthQuery {
            month: Some(String::new()),
        };

        let today = time::OffsetDateTime::now_utc().date();
        assert_eq!(query.resolve("Etc/UTC"), Ok(MonthKey::of(today)));
        assert_eq!(MonthQuery::default().resolve("Etc/UTC"), Ok(MonthKey::of(today)));
    }

    #[test]
    fn query_rejects_malformed_month() {
        let query = MonthQuery {
            month: Some("2024/03".to_owned()),
        };

        assert_eq!(
            query.resolve("Etc/UTC"),
            Err(Error::InvalidMonthKey("2024/03".to_owned()))
        );
    }
}
