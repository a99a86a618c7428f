//! Calendar-day arithmetic relative to "today".
//!
//! Trip dates are plain calendar dates with no time of day. Comparisons are
//! made against the current UTC date, so a trip departing today is zero days
//! away for the whole of the UTC day regardless of the wall-clock time.

use chrono::{NaiveDate, Utc};

use super::error::DomainError;

/// Number of days ahead the forecast provider can see.
///
/// Dates in `[0, FORECAST_HORIZON_DAYS)` days from today are forecastable.
pub const FORECAST_HORIZON_DAYS: i64 = 16;

/// A fixed "today" against which trip dates are measured.
///
/// Operations that depend on the current date take a `DateWindow` rather
/// than reading the clock, so one request sees a single consistent today.
///
/// # Examples
///
/// ```
/// use trip_server::domain::DateWindow;
/// use chrono::NaiveDate;
///
/// let window = DateWindow::at(NaiveDate::from_ymd_opt(2021, 12, 24).unwrap());
/// let date = NaiveDate::from_ymd_opt(2022, 1, 7).unwrap();
/// assert_eq!(window.days_from_today(date), 14);
/// assert!(window.is_forecastable(date));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    today: NaiveDate,
}

impl DateWindow {
    /// Window anchored at the current UTC date.
    pub fn today() -> Self {
        Self::at(Utc::now().date_naive())
    }

    /// Window anchored at an explicit date.
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The date this window treats as today.
    pub fn current_date(&self) -> NaiveDate {
        self.today
    }

    /// Whole calendar days from today to `date`.
    ///
    /// Negative means past, zero means today, positive means future.
    pub fn days_from_today(&self, date: NaiveDate) -> i64 {
        (date - self.today).num_days()
    }

    /// Whether the forecast provider can supply weather for `date`.
    ///
    /// Half-open: today is included, `FORECAST_HORIZON_DAYS` out is not.
    pub fn is_forecastable(&self, date: NaiveDate) -> bool {
        (0..FORECAST_HORIZON_DAYS).contains(&self.days_from_today(date))
    }

    /// Whether `date` has already elapsed.
    pub fn is_expired(&self, date: NaiveDate) -> bool {
        self.days_from_today(date) < 0
    }
}

/// Length of a trip in whole days.
pub fn days_between(departure: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - departure).num_days()
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date_string(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| DomainError::InvalidDate {
        value: s.to_string(),
    })
}
