use serde::Serialize;

use notestat_domain::{CountResult, CounterType, FileStats};
use notestat_shared_kernel::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    InvalidParameter,
    PropertyWriteFailed,
}

/// One counter that could not be written; its siblings are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterFailure {
    pub property: String,
    pub counter_type: CounterType,
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of one document's calculation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationReport {
    pub document: DocumentId,
    pub stats: FileStats,
    pub values: CountResult,
    pub failures: Vec<CounterFailure>,
    /// `false` for dry runs, where values were computed but not persisted.
    pub written: bool,
}

impl CalculationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 単一ドキュメント実行時のまとめメッセージ
    pub fn summary_message(&self) -> String {
        if self.values.is_empty() && self.failures.is_empty() {
            return format!("{}: no enabled counters", self.document);
        }

        let verb = if self.written { "updated" } else { "computed" };
        let mut message = format!("{}: {verb} {}", self.document, self.values);
        if !self.failures.is_empty() {
            let failed = self
                .failures
                .iter()
                .map(|f| format!("{} ({})", f.property, f.message))
                .collect::<Vec<_>>()
                .join(", ");
            if self.values.is_empty() {
                message = format!("{}: failed {failed}", self.document);
            } else {
                message.push_str(&format!("; failed {failed}"));
            }
        }
        message
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub total: usize,
    /// Documents whose content could not be read or analysed.
    pub failed_documents: Vec<(DocumentId, String)>,
    /// Counter-level failures across all processed documents.
    pub counter_failures: usize,
}

impl BatchSummary {
    pub fn summary_message(&self) -> String {
        format!("processed {}/{} documents", self.processed, self.total)
    }
}
