//! Calendar months for labelling projection offsets

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest year accepted from callers; `YYYY-MM` has four year digits
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, rendered as `YYYY-MM`
///
/// Backed by the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// None for a month outside 1-12 or a year outside 0-9999
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The month `offset` months after this one
    ///
    /// Saturates at the last month chrono can represent.
    pub fn plus_months(&self, offset: u32) -> Self {
        self.0
            .checked_add_months(Months::new(offset))
            .map(Self)
            .unwrap_or_else(|| Self::from_date(NaiveDate::MAX))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.format("%Y-%m").to_string())
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| format!("Expected YYYY-MM, got '{}'", s))?;
        YearMonth::new(date.year(), date.month()).ok_or_else(|| format!("Year out of range in '{}'", s))
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Source of "now" for converting month offsets into calendar labels
pub trait Clock: Send + Sync {
    fn current_month(&self) -> YearMonth;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> YearMonth {
        YearMonth::from_date(Local::now().date_naive())
    }
}

/// Clock pinned to a given month (tests, reproducible CLI runs)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    fn current_month(&self) -> YearMonth {
        self.0
    }
}
