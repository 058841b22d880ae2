//! Decomposition of fractional-hour values into clock components.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Hours/minutes/seconds extracted from a fractional-hour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeComponents {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeComponents {
    /// Decompose a fractional-hour value, wrapped into one day.
    /// Non-finite input (a missing solar event) yields None.
    pub fn from_hours(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let wrapped = value.rem_euclid(24.0);
        let hours = wrapped.floor();
        let minutes = ((wrapped - hours) * 60.0).floor();
        let seconds = ((wrapped - (hours + minutes / 60.0)) * 3600.0).floor();
        Some(Self {
            hours: hours as u32,
            minutes: minutes as u32,
            seconds: (seconds as u32).min(59),
        })
    }

    /// Attach these components to a calendar date.
    pub fn on_date(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(self.hours, self.minutes, self.seconds).unwrap()
    }
}

impl fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
