// crates/usecase/src/batch.rs
use log::Level;

use crate::{dto::BatchSummary, engine::StatisticsEngine};
use notestat_domain::CounterConfig;
use notestat_shared_kernel::{DocumentId, Result};

/// Progress is only worth reporting for collections larger than this.
const PROGRESS_THRESHOLD: usize = 10;

/// True when `done` is the first document past a 10% boundary of `total`.
fn crosses_decile(done: usize, total: usize) -> bool {
    total > PROGRESS_THRESHOLD && done > 0 && done * 10 / total > (done - 1) * 10 / total
}

impl StatisticsEngine<'_> {
    /// Run every document of the content store through the engine.
    ///
    /// # Errors
    ///
    /// Fails only when the document listing itself cannot be produced.
    pub fn calculate_all(&self, configs: &[CounterConfig]) -> Result<BatchSummary> {
        let documents = self.ports.content.list_documents()?;
        Ok(self.compute_batch(&documents, configs))
    }

    /// Sequential batch over `documents`.
    ///
    /// Per-document failures are logged and collected; nothing escapes. A document
    /// counts as processed once its statistics were computed, even if some of its
    /// counters then failed.
    pub fn compute_batch(&self, documents: &[DocumentId], configs: &[CounterConfig]) -> BatchSummary {
        let total = documents.len();
        let mut summary = BatchSummary { total, ..BatchSummary::default() };

        self.notify_info(&format!("calculating statistics for {total} documents"));

        for (index, document) in documents.iter().enumerate() {
            match self.compute_with_cache_assist(document) {
                Ok(stats) => {
                    let report = self.apply(document, stats, configs, true);
                    summary.counter_failures += report.failures.len();
                    summary.processed += 1;
                }
                Err(err) => {
                    self.log(Level::Warn, || format!("{document}: skipped: {err}"));
                    summary.failed_documents.push((document.clone(), err.to_string()));
                }
            }

            let done = index + 1;
            if crosses_decile(done, total)
                && let Err(err) = self.ports.notifier.progress(done, total)
            {
                self.log(Level::Warn, || format!("notifier failed: {err}"));
            }
        }

        self.log(Level::Info, || summary.summary_message());
        self.notify_info(&summary.summary_message());
        summary
    }
}
