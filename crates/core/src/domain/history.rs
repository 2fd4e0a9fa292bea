// Job History Domain Model

use super::error::InvalidReason;
use super::job::{minutes_between, JobName};
use super::nanos::{json_type_name, millis_from_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `Stop` value the service uses for a job that has not finished
pub const STILL_RUNNING: i64 = -1;

/// One entry of the `history/<prefix>` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHistoryRecord {
    #[serde(rename = "Job", default)]
    pub job: JobName,

    #[serde(rename = "Start", default)]
    pub start: Value,

    /// Epoch nanoseconds, or `-1` while running
    #[serde(rename = "Stop", default)]
    pub stop: Value,

    #[serde(rename = "Params", default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl RawHistoryRecord {
    pub fn new(job: impl Into<JobName>, start_nanos: i64, stop_nanos: i64) -> Self {
        Self {
            job: job.into(),
            start: Value::from(start_nanos),
            stop: Value::from(stop_nanos),
            params: None,
        }
    }

    pub fn timing(&self) -> Result<HistoryTiming, InvalidReason> {
        if self.job.is_empty() {
            return Err(InvalidReason::MissingJob);
        }
        let start_millis = millis_from_field(&self.start, "Start")?;

        let running = match &self.stop {
            Value::Number(n) => {
                n.as_i64() == Some(STILL_RUNNING) || n.as_f64() == Some(STILL_RUNNING as f64)
            }
            Value::Null => return Err(InvalidReason::MissingField { field: "Stop" }),
            other => {
                return Err(InvalidReason::NotNumeric {
                    field: "Stop",
                    found: json_type_name(other),
                })
            }
        };
        if running {
            return Ok(HistoryTiming {
                start_millis,
                stop_millis: None,
            });
        }

        let stop_millis = millis_from_field(&self.stop, "Stop")?;
        if stop_millis < start_millis {
            return Err(InvalidReason::StopBeforeStart);
        }
        Ok(HistoryTiming {
            start_millis,
            stop_millis: Some(stop_millis),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryTiming {
    pub start_millis: i64,
    pub stop_millis: Option<i64>,
}

impl HistoryTiming {
    pub fn is_running(&self) -> bool {
        self.stop_millis.is_none()
    }

    /// Run time in minutes; running jobs are measured up to `now_millis`
    pub fn duration_minutes(&self, now_millis: i64) -> f64 {
        let end = self.stop_millis.unwrap_or(now_millis);
        minutes_between(self.start_millis, end)
    }
}

/// Display-ready view of one historical run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryViewRecord {
    pub job: JobName,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub duration_minutes: f64,
    pub running: bool,
    pub start_millis: i64,
    #[serde(default)]
    pub end_millis: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}
