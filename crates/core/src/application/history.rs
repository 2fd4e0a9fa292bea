// HistoryFormatter - Display records for past and ongoing runs of a job

use super::formatter::{
    collect_all, format_batch, render, skip_invalid, FormatOutcome, FormatPolicy,
};
use crate::domain::error::{FormatError, Result};
use crate::domain::{HistoryViewRecord, RawHistoryRecord};
use crate::port::DateTimeRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryFormatter {
    renderer: Arc<dyn DateTimeRenderer>,
}

impl HistoryFormatter {
    pub fn new(renderer: Arc<dyn DateTimeRenderer>) -> Self {
        Self { renderer }
    }

    pub fn format(
        &self,
        records: &[RawHistoryRecord],
        now_millis: i64,
    ) -> Result<Vec<HistoryViewRecord>> {
        collect_all(records, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    pub fn format_lenient(
        &self,
        records: &[RawHistoryRecord],
        now_millis: i64,
    ) -> FormatOutcome<HistoryViewRecord> {
        skip_invalid(records, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    pub fn format_with_policy(
        &self,
        records: &[RawHistoryRecord],
        now_millis: i64,
        policy: FormatPolicy,
    ) -> Result<FormatOutcome<HistoryViewRecord>> {
        format_batch(records, policy, |index, record| {
            self.format_record(index, record, now_millis)
        })
    }

    pub fn format_record(
        &self,
        index: usize,
        record: &RawHistoryRecord,
        now_millis: i64,
    ) -> Result<HistoryViewRecord> {
        let invalid = |reason| FormatError::invalid(index, record.job.clone(), reason);

        let timing = record.timing().map_err(invalid)?;
        let start_time = render(self.renderer.as_ref(), timing.start_millis).map_err(invalid)?;
        let end_time = match timing.stop_millis {
            Some(stop) => Some(render(self.renderer.as_ref(), stop).map_err(invalid)?),
            None => None,
        };

        Ok(HistoryViewRecord {
            job: record.job.clone(),
            start_time,
            end_time,
            duration_minutes: timing.duration_minutes(now_millis),
            running: timing.is_running(),
            start_millis: timing.start_millis,
            end_millis: timing.stop_millis,
            params: record.params.clone(),
        })
    }
}
