// Domain Error Types

use thiserror::Error;

/// Why a single raw record could not be turned into a view record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("missing job name")]
    MissingJob,

    #[error("missing field {field}")]
    MissingField { field: &'static str },

    #[error("field {field} is not a number (found {found})")]
    NotNumeric {
        field: &'static str,
        found: &'static str,
    },

    #[error("field {field} is negative")]
    Negative { field: &'static str },

    #[error("field {field} is out of range")]
    OutOfRange { field: &'static str },

    #[error("end time overflows")]
    Overflow,

    #[error("stop time precedes start time")]
    StopBeforeStart,

    #[error("instant {millis}ms cannot be rendered as a calendar date")]
    Unrenderable { millis: i64 },
}

/// Formatter error, carrying the position of the offending record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("invalid job record #{index} ({job}): {reason}")]
    InvalidRecord {
        index: usize,
        job: String,
        reason: InvalidReason,
    },
}

impl FormatError {
    pub fn invalid(index: usize, job: impl Into<String>, reason: InvalidReason) -> Self {
        FormatError::InvalidRecord {
            index,
            job: job.into(),
            reason,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FormatError::InvalidRecord { index, .. } => *index,
        }
    }

    pub fn reason(&self) -> &InvalidReason {
        match self {
            FormatError::InvalidRecord { reason, .. } => reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
