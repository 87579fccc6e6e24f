//! Run-wide settings shared by every row.

use chrono_tz::Tz;

use crate::error::{DatasetError, DatasetResult};

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_ALERT_MINUTES: u32 = 30;
pub const DEFAULT_TRAVEL_MINUTES: u32 = 0;

/// Validated conversion settings. Read-only once a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub timezone: Tz,
    /// Minutes before the start that the alarm fires.
    pub alert_minutes: u32,
    /// Value of the travel-duration property, in minutes.
    pub travel_minutes: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            timezone: Tz::UTC,
            alert_minutes: DEFAULT_ALERT_MINUTES,
            travel_minutes: DEFAULT_TRAVEL_MINUTES,
        }
    }
}

impl ConvertOptions {
    /// Validate raw settings. Fails before any row is touched.
    pub fn new(timezone: &str, alert_minutes: i64, travel_minutes: i64) -> DatasetResult<Self> {
        Ok(ConvertOptions {
            timezone: parse_timezone(timezone)?,
            alert_minutes: non_negative("alert_minutes", alert_minutes)?,
            travel_minutes: non_negative("travel_minutes", travel_minutes)?,
        })
    }
}

/// Resolve an IANA zone name.
pub fn parse_timezone(name: &str) -> DatasetResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DatasetError::UnknownTimezone(name.to_string()))
}

fn non_negative(field: &'static str, value: i64) -> DatasetResult<u32> {
    u32::try_from(value).map_err(|_| DatasetError::NegativeMinutes { field, value })
}
