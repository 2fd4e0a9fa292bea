// Running Job Domain Model

use super::error::InvalidReason;
use super::nanos::millis_from_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Job name as reported by the status service
pub type JobName = String;

/// One entry of the `status` payload, as received.
///
/// `Start` and `Average` stay raw JSON so that a malformed entry is
/// reported by the formatter against its position instead of failing the
/// whole payload decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawJobRecord {
    #[serde(rename = "Job", default)]
    pub job: JobName,

    /// Epoch nanoseconds
    #[serde(rename = "Start", default)]
    pub start: Value,

    /// Expected duration in nanoseconds (integer or float)
    #[serde(rename = "Average", default)]
    pub average: Value,

    #[serde(rename = "Params", default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl RawJobRecord {
    pub fn new(job: impl Into<JobName>, start_nanos: i64, average_nanos: i64) -> Self {
        Self {
            job: job.into(),
            start: Value::from(start_nanos),
            average: Value::from(average_nanos),
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Validate the numeric fields and derive the millisecond timing
    pub fn timing(&self) -> Result<JobTiming, InvalidReason> {
        if self.job.is_empty() {
            return Err(InvalidReason::MissingJob);
        }
        let start_millis = millis_from_field(&self.start, "Start")?;
        let average_millis = millis_from_field(&self.average, "Average")?;
        JobTiming::new(start_millis, average_millis)
    }
}

/// Millisecond timing derived from a raw record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTiming {
    pub start_millis: i64,
    pub end_millis: i64,
}

impl JobTiming {
    /// The end is the *rounded* start plus the *rounded* average
    pub fn new(start_millis: i64, average_millis: i64) -> Result<Self, InvalidReason> {
        let end_millis = start_millis
            .checked_add(average_millis)
            .ok_or(InvalidReason::Overflow)?;
        Ok(Self {
            start_millis,
            end_millis,
        })
    }

    pub fn average_millis(&self) -> i64 {
        self.end_millis - self.start_millis
    }

    /// Signed minutes from `now_millis` until the estimated end
    pub fn etc_minutes(&self, now_millis: i64) -> f64 {
        minutes_between(now_millis, self.end_millis)
    }
}

/// Signed minutes from `from_millis` to `to_millis`, unrounded
pub fn minutes_between(from_millis: i64, to_millis: i64) -> f64 {
    (i128::from(to_millis) - i128::from(from_millis)) as f64 / 60_000.0
}

/// Decoded `status` response body.
///
/// The service either answers with a list of records or with an object
/// keyed by job name. Keyed entries come out in key order.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusPayload {
    List(Vec<RawJobRecord>),
    Keyed(BTreeMap<JobName, RawJobRecord>),
}

impl StatusPayload {
    pub fn into_records(self) -> Vec<RawJobRecord> {
        match self {
            StatusPayload::List(records) => records,
            StatusPayload::Keyed(entries) => entries
                .into_iter()
                .map(|(name, mut record)| {
                    if record.job.is_empty() {
                        record.job = name;
                    }
                    record
                })
                .collect(),
        }
    }
}

/// Display-ready view of one running job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobViewRecord {
    pub job: JobName,
    pub start_time: String,
    pub end_time: String,
    /// Negative once the estimated end has passed
    pub etc_minutes: f64,
    pub start_millis: i64,
    pub end_millis: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

impl JobViewRecord {
    pub fn is_overdue(&self) -> bool {
        self.etc_minutes < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timing_adds_rounded_average() {
        // 1.5ms start and 1.5ms average: end is 2 + 2, not round(3.0) = 3
        let record = RawJobRecord::new("build", 1_500_000, 1_500_000);
        let timing = record.timing().unwrap();
        assert_eq!(timing.start_millis, 2);
        assert_eq!(timing.end_millis, 4);
        assert_eq!(timing.average_millis(), 2);
    }

    #[test]
    fn test_timing_zero() {
        let timing = RawJobRecord::new("noop", 0, 0).timing().unwrap();
        assert_eq!(timing.start_millis, 0);
        assert_eq!(timing.end_millis, 0);
        assert_eq!(timing.etc_minutes(120_000), -2.0);
    }

    #[test]
    fn test_timing_rejects_missing_job() {
        let record = RawJobRecord::new("", 1, 1);
        assert_eq!(record.timing(), Err(InvalidReason::MissingJob));
    }

    #[test]
    fn test_timing_overflow() {
        assert_eq!(JobTiming::new(i64::MAX, 1), Err(InvalidReason::Overflow));
    }

    #[test]
    fn test_deserialize_missing_fields_become_null() {
        let record: RawJobRecord = serde_json::from_value(json!({"Job": "deploy"})).unwrap();
        assert_eq!(record.start, Value::Null);
        assert_eq!(record.average, Value::Null);
        assert_eq!(
            record.timing(),
            Err(InvalidReason::MissingField { field: "Start" })
        );
    }

    #[test]
    fn test_payload_list_keeps_order() {
        let payload: StatusPayload = serde_json::from_value(json!([
            {"Job": "zeta", "Start": 1, "Average": 2},
            {"Job": "alpha", "Start": 3, "Average": 4},
        ]))
        .unwrap();
        let names: Vec<_> = payload.into_records().into_iter().map(|r| r.job).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_payload_keyed_fills_job_from_key() {
        let payload: StatusPayload = serde_json::from_value(json!({
            "nightly/backup": {"Start": 1, "Average": 2.5, "Params": "{}"},
            "build": {"Start": 3, "Average": 4},
        }))
        .unwrap();
        let records = payload.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job, "build");
        assert_eq!(records[1].job, "nightly/backup");
        assert_eq!(records[1].params.as_deref(), Some("{}"));
    }

    #[test]
    fn test_payload_rejects_scalar() {
        assert!(serde_json::from_value::<StatusPayload>(json!(42)).is_err());
        assert!(serde_json::from_value::<StatusPayload>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = JobViewRecord {
            job: "build".to_string(),
            start_time: "s".to_string(),
            end_time: "e".to_string(),
            etc_minutes: 1.5,
            start_millis: 1,
            end_millis: 2,
            params: None,
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["startTime"], "s");
        assert_eq!(value["endTime"], "e");
        assert_eq!(value["etcMinutes"], 1.5);
        assert!(value.get("params").is_none());
    }
}
