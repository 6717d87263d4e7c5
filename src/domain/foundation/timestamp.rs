//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Format used for per-message time labels.
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Format used for the transcript export header.
pub const EXPORT_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used in downloaded transcript file names.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Immutable point in time, stored as UTC and rendered in a caller-chosen zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Formats in the given time zone.
    pub fn format_in<Tz>(&self, tz: &Tz, fmt: &str) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.0.with_timezone(tz).format(fmt).to_string()
    }

    /// `HH:MM` in the local time zone, as shown next to messages.
    pub fn time_label(&self) -> String {
        self.format_in(&Local, TIME_LABEL_FORMAT)
    }

    /// `YYYYMMDD-HHMMSS` in the local time zone, for file names.
    pub fn file_stamp(&self) -> String {
        self.format_in(&Local, FILE_STAMP_FORMAT)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
