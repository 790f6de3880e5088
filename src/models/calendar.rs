use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

const BUILTIN_HOLIDAYS: &str = include_str!("../../data/holidays.json");

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("failed to read holiday file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid holiday table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry of a holiday table file. The name is informational only.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: Option<String>,
}

/// A holiday file may list bare dates, full entries, or a mix of both.
#[derive(Deserialize)]
#[serde(untagged)]
enum HolidayItem {
    Date(NaiveDate),
    Entry(HolidayEntry),
}

impl HolidayItem {
    fn date(&self) -> NaiveDate {
        match self {
            HolidayItem::Date(date) => *date,
            HolidayItem::Entry(entry) => entry.date,
        }
    }
}

/// Dates on which the business is closed all day, whatever the weekday.
///
/// Built once at start-up and shared read-only. An empty calendar is valid
/// and simply means no holidays are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parses a JSON array whose items are either `"YYYY-MM-DD"` strings or
    /// `{ "date": "YYYY-MM-DD", "name": "..." }` entries.
    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        let items: Vec<HolidayItem> = serde_json::from_str(json)?;
        Ok(Self::from_dates(items.iter().map(HolidayItem::date)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CalendarError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The table shipped with the crate (Turkish public holidays, 2024-2030).
    pub fn builtin() -> Result<Self, CalendarError> {
        Self::from_json(BUILTIN_HOLIDAYS)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}
