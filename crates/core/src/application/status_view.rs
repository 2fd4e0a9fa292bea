// Status View Service - fetch once, format once

use super::formatter::{FormatOutcome, FormatPolicy, JobViewFormatter};
use super::history::HistoryFormatter;
use crate::domain::{HistoryViewRecord, JobViewRecord};
use crate::error::Result;
use crate::port::{DateTimeRenderer, StatusSource, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info};

/// Wires a status source, a clock and the formatters together
pub struct StatusViewService {
    source: Arc<dyn StatusSource>,
    time_provider: Arc<dyn TimeProvider>,
    jobs: JobViewFormatter,
    history: HistoryFormatter,
}

impl StatusViewService {
    pub fn new(
        source: Arc<dyn StatusSource>,
        time_provider: Arc<dyn TimeProvider>,
        renderer: Arc<dyn DateTimeRenderer>,
    ) -> Self {
        Self {
            source,
            time_provider,
            jobs: JobViewFormatter::new(renderer.clone()),
            history: HistoryFormatter::new(renderer),
        }
    }

    /// Fetch the running jobs and format them.
    ///
    /// The clock is read after the fetch completes, so ETC reflects the
    /// moment the payload is turned into views.
    pub async fn running_jobs(&self, policy: FormatPolicy) -> Result<FormatOutcome<JobViewRecord>> {
        let records = self.source.fetch().await?;
        debug!(records = records.len(), "Fetched running jobs");

        let now = self.time_provider.now_millis();
        let outcome = self.jobs.format_with_policy(&records, now, policy)?;
        if !outcome.skipped.is_empty() {
            info!(
                skipped = outcome.skipped.len(),
                shown = outcome.views.len(),
                "Some running job records were invalid"
            );
        }
        Ok(outcome)
    }

    /// Fetch and format the recorded runs of jobs starting with `prefix`
    pub async fn history(
        &self,
        prefix: &str,
        policy: FormatPolicy,
    ) -> Result<FormatOutcome<HistoryViewRecord>> {
        let records = self.source.fetch_history(prefix).await?;
        debug!(prefix, records = records.len(), "Fetched job history");

        let now = self.time_provider.now_millis();
        let outcome = self.history.format_with_policy(&records, now, policy)?;
        Ok(outcome)
    }
}
