//! JobViewFormatter - Turns raw status records into display records
//!
//! Pure and stateless: every call works on local values and returns a
//! fresh `Vec`. The reference instant is passed in, never read from a
//! clock, so the output is deterministic for a given renderer.

use crate::domain::error::{FormatError, InvalidReason, Result};
use crate::domain::{JobViewRecord, RawJobRecord};
use crate::port::DateTimeRenderer;
use std::sync::Arc;
use tracing::{debug, warn};

/// Below this many minutes either side of the end, a job is "due now"
const DUE_NOW_WINDOW_MINUTES: f64 = 0.05;

/// What to do with a record that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Abort the batch on the first invalid record
    #[default]
    Strict,
    /// Log and drop invalid records, keep the rest in order
    SkipInvalid,
}

/// Result of a batch run under a [`FormatPolicy`]
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOutcome<V> {
    pub views: Vec<V>,
    /// Always empty under [`FormatPolicy::Strict`]
    pub skipped: Vec<FormatError>,
}

/// Formats `RawJobRecord`s into `JobViewRecord`s
#[derive(Clone)]
pub struct JobViewFormatter {
    renderer: Arc<dyn DateTimeRenderer>,
}

impl JobViewFormatter {
    pub fn new(renderer: Arc<dyn DateTimeRenderer>) -> Self {
        Self { renderer }
    }

    /// Format every record, aborting on the first invalid one.
    ///
    /// Output has the same length and order as `records`.
    pub fn format(&self, records: &[RawJobRecord], now_millis: i64) -> Result<Vec<JobViewRecord>> {
        collect_all(records, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    /// Format every valid record, skipping (and logging) invalid ones
    pub fn format_lenient(
        &self,
        records: &[RawJobRecord],
        now_millis: i64,
    ) -> FormatOutcome<JobViewRecord> {
        skip_invalid(records, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    pub fn format_with_policy(
        &self,
        records: &[RawJobRecord],
        now_millis: i64,
        policy: FormatPolicy,
    ) -> Result<FormatOutcome<JobViewRecord>> {
        format_batch(records, policy, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    /// Format a single record; `index` is only used for error reporting
    pub fn format_record(
        &self,
        index: usize,
        record: &RawJobRecord,
        now_millis: i64,
    ) -> Result<JobViewRecord> {
        let invalid = |reason| FormatError::invalid(index, record.job.clone(), reason);

        let timing = record.timing().map_err(invalid)?;
        let start_time = render(self.renderer.as_ref(), timing.start_millis).map_err(invalid)?;
        let end_time = render(self.renderer.as_ref(), timing.end_millis).map_err(invalid)?;

        Ok(JobViewRecord {
            job: record.job.clone(),
            start_time,
            end_time,
            etc_minutes: timing.etc_minutes(now_millis),
            start_millis: timing.start_millis,
            end_millis: timing.end_millis,
            params: record.params.clone(),
        })
    }
}

/// Run `format_one` over `records` in order, stopping at the first error
pub(crate) fn collect_all<R, V>(
    records: &[R],
    format_one: impl Fn(usize, &R) -> Result<V>,
) -> Result<Vec<V>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| format_one(index, record))
        .collect()
}

/// Run `format_one` over `records` in order, logging and dropping failures
pub(crate) fn skip_invalid<R, V>(
    records: &[R],
    format_one: impl Fn(usize, &R) -> Result<V>,
) -> FormatOutcome<V> {
    let mut views = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match format_one(index, record) {
            Ok(view) => views.push(view),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid record");
                skipped.push(e);
            }
        }
    }
    debug!(
        formatted = views.len(),
        skipped = skipped.len(),
        "Formatted record batch"
    );
    FormatOutcome { views, skipped }
}

pub(crate) fn format_batch<R, V>(
    records: &[R],
    policy: FormatPolicy,
    format_one: impl Fn(usize, &R) -> Result<V>,
) -> Result<FormatOutcome<V>> {
    match policy {
        FormatPolicy::Strict => Ok(FormatOutcome {
            views: collect_all(records, format_one)?,
            skipped: Vec::new(),
        }),
        FormatPolicy::SkipInvalid => Ok(skip_invalid(records, format_one)),
    }
}

pub(crate) fn render(
    renderer: &dyn DateTimeRenderer,
    millis: i64,
) -> std::result::Result<String, InvalidReason> {
    renderer
        .render(millis)
        .ok_or(InvalidReason::Unrenderable { millis })
}

/// Short human label for an ETC figure
pub fn describe_etc(etc_minutes: f64) -> String {
    if etc_minutes.abs() < DUE_NOW_WINDOW_MINUTES {
        "due now".to_string()
    } else if etc_minutes > 0.0 {
        format!("in {:.1} min", etc_minutes)
    } else {
        format!("{:.1} min overdue", -etc_minutes)
    }
}
