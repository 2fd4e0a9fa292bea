// Date/Time Renderer Port
// Keeps locale and time zone out of the formatting math

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use std::fmt::{Display, Write};
use thiserror::Error;

/// en-US style date, e.g. `11/14/2023`
pub const DEFAULT_DATE_PATTERN: &str = "%-m/%-d/%Y";
/// en-US style time, e.g. `10:13:20 PM`
pub const DEFAULT_TIME_PATTERN: &str = "%-I:%M:%S %p";

/// Renders an epoch-millisecond instant as `"<date> at <time>"`
pub trait DateTimeRenderer: Send + Sync {
    /// `None` when the instant is outside the calendar range
    fn render(&self, millis: i64) -> Option<String>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RendererError {
    #[error("Invalid {which} pattern: {pattern:?}")]
    InvalidPattern { which: &'static str, pattern: String },

    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),
}

/// Time zone the instants are shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Zone of the host running the renderer
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    pub fn offset_minutes(minutes: i32) -> Result<Self, RendererError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Zone::Fixed)
            .ok_or(RendererError::InvalidOffset(minutes))
    }
}

/// strftime-pattern renderer
#[derive(Debug, Clone)]
pub struct PatternRenderer {
    date_pattern: String,
    time_pattern: String,
    zone: Zone,
}

impl PatternRenderer {
    pub fn new(zone: Zone) -> Self {
        Self {
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            time_pattern: DEFAULT_TIME_PATTERN.to_string(),
            zone,
        }
    }

    pub fn local() -> Self {
        Self::new(Zone::Local)
    }

    pub fn utc() -> Self {
        Self::new(Zone::Utc)
    }

    /// Replace the date and time patterns, rejecting ones chrono cannot format
    pub fn with_patterns(
        mut self,
        date_pattern: impl Into<String>,
        time_pattern: impl Into<String>,
    ) -> Result<Self, RendererError> {
        let date_pattern = date_pattern.into();
        let time_pattern = time_pattern.into();
        check_pattern("date", &date_pattern)?;
        check_pattern("time", &time_pattern)?;
        self.date_pattern = date_pattern;
        self.time_pattern = time_pattern;
        Ok(self)
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    fn write<Tz>(&self, instant: DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut out = String::new();
        write!(
            out,
            "{} at {}",
            instant.format(&self.date_pattern),
            instant.format(&self.time_pattern)
        )
        .ok()?;
        Some(out)
    }
}

impl Default for PatternRenderer {
    fn default() -> Self {
        Self::local()
    }
}

impl DateTimeRenderer for PatternRenderer {
    fn render(&self, millis: i64) -> Option<String> {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
        match self.zone {
            Zone::Local => self.write(instant.with_timezone(&Local)),
            Zone::Utc => self.write(instant),
            Zone::Fixed(offset) => self.write(instant.with_timezone(&offset)),
        }
    }
}

fn check_pattern(which: &'static str, pattern: &str) -> Result<(), RendererError> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(RendererError::InvalidPattern {
            which,
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}
