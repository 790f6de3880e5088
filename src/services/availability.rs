use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::models::HolidayCalendar;

pub const OPENING_HOUR: u32 = 8;
pub const CLOSING_HOUR: u32 = 18;

pub const OFFLINE_MESSAGE: &str =
    "Installation lookup is only available during working hours (weekdays, 08:00 - 18:00).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureReason {
    Holiday,
    Weekend,
    OutsideWorkingHours,
}

/// Decides whether the query feature is open at a given local time.
///
/// Times are the process's local wall clock; no time zone conversion is
/// done, so the host must run in the business's time zone.
#[derive(Debug, Clone)]
pub struct AvailabilityEvaluator {
    calendar: Arc<HolidayCalendar>,
}

impl AvailabilityEvaluator {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self {
            calendar: Arc::new(calendar),
        }
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// First rule that closes the service at `now`, checked in the order
    /// holiday, weekend, hour window `[08:00, 18:00)`.
    pub fn closure_reason(&self, now: NaiveDateTime) -> Option<ClosureReason> {
        if self.calendar.contains(now.date()) {
            return Some(ClosureReason::Holiday);
        }

        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return Some(ClosureReason::Weekend);
        }

        let hour = now.hour();
        if hour < OPENING_HOUR || hour >= CLOSING_HOUR {
            return Some(ClosureReason::OutsideWorkingHours);
        }

        None
    }

    pub fn is_open(&self, now: NaiveDateTime) -> bool {
        self.closure_reason(now).is_none()
    }

    pub fn is_open_now(&self) -> bool {
        self.is_open(Local::now().naive_local())
    }
}
