use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a submitted date may fall in.
pub const BUSINESS_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// Rejects dates outside [`BUSINESS_YEARS`].
pub fn check_business_date(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    if BUSINESS_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(DomainError::InvalidInput(format!(
            "date {} is outside years {}..={}",
            date,
            BUSINESS_YEARS.start(),
            BUSINESS_YEARS.end()
        )))
    }
}

/// Monday on or before `date`. Saturates at the earliest representable date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
        .unwrap_or(NaiveDate::MIN)
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Calendar date of `now` in the business timezone.
pub fn business_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Identifies a Monday-start week. Serialized as the Monday's ISO date and
/// used as the equality key for shift requests and confirmations, so any
/// date inside the week maps to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    pub fn containing(date: NaiveDate) -> Self {
        WeekKey(week_start(date))
    }

    /// The week after the one containing `today`; workers submit for it.
    pub fn next(today: NaiveDate) -> Self {
        Self::containing(add_days(today, 7))
    }

    pub fn previous(today: NaiveDate) -> Self {
        Self::containing(today.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN))
    }

    /// Key for a client-supplied date, which must lie in [`BUSINESS_YEARS`].
    pub fn parse_date(date: NaiveDate) -> Result<Self, DomainError> {
        check_business_date(date).map(Self::containing)
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        add_days(self.0, 6)
    }

    /// Monday and Sunday, inclusive.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start(), self.end())
    }

    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| add_days(self.0, i as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date <= self.end()
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for WeekKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| DomainError::InvalidInput(format!("invalid week date '{}': {}", s, e)))?;
        WeekKey::parse_date(date)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date = NaiveDate::deserialize(deserializer)?;
        WeekKey::parse_date(date).map_err(serde::de::Error::custom)
    }
}
