use std::collections::BTreeMap;

use log::Level;

use crate::dto::{CalculationReport, CounterFailure, FailureKind};
use notestat_domain::{
    CountResult, CounterConfig, FileStats, HeadingLevel,
    analysis::{
        count_characters_with_spaces, count_characters_without_spaces, count_headings_by_level,
        count_lines, count_words, extract_body, resolve_body, tally_levels,
    },
    counter::project,
};
use notestat_ports::{ContentStore, Logger, MetadataIndex, Notifier, PropertyStore, Renderer};
use notestat_shared_kernel::{DocumentId, NoteStatError, Result};

/// Behaviour switches read once at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSettings {
    /// Count words and characters on rendered plain text instead of raw markdown.
    /// Lines and headings always use the raw body.
    pub rendered_text: bool,
}

/// Collaborators the engine talks to.
#[derive(Clone, Copy)]
pub struct EnginePorts<'a> {
    pub content: &'a dyn ContentStore,
    pub index: &'a dyn MetadataIndex,
    pub renderer: &'a dyn Renderer,
    pub properties: &'a dyn PropertyStore,
    pub notifier: &'a dyn Notifier,
    pub logger: &'a dyn Logger,
}

/// Stateless statistics engine.
///
/// Every call is a transformation from (content, counter snapshot) to
/// (statistics, property writes); nothing is remembered between calls.
pub struct StatisticsEngine<'a> {
    pub(crate) ports: EnginePorts<'a>,
    settings: EngineSettings,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(ports: EnginePorts<'a>, settings: EngineSettings) -> Self {
        Self { ports, settings }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Full scan of an already extracted body.
    ///
    /// # Errors
    ///
    /// Fails only when rendered mode is on and the renderer fails.
    pub fn analyze_body(&self, document: &DocumentId, body: &str) -> Result<FileStats> {
        self.build_stats(document, body, count_headings_by_level(body))
    }

    /// Analyse `body`, then project and write every enabled counter.
    ///
    /// # Errors
    ///
    /// Fails when the body cannot be analysed; counter failures are reported
    /// inside the returned report instead.
    pub fn compute_for_one(
        &self,
        document: &DocumentId,
        body: &str,
        configs: &[CounterConfig],
    ) -> Result<CalculationReport> {
        let stats = self.analyze_body(document, body)?;
        Ok(self.apply(document, stats, configs, true))
    }

    /// Statistics using the metadata index for the front-matter span and headings.
    ///
    /// The document is read once and the index is consulted for that same text.
    /// Falls back to scanning when the index has nothing for it. Output is
    /// identical to [`Self::compute_full_scan`].
    ///
    /// # Errors
    ///
    /// Returns `ContentUnavailable` when the document cannot be read.
    pub fn compute_with_cache_assist(&self, document: &DocumentId) -> Result<FileStats> {
        let content = self.ports.content.read_content(document)?;

        let Some(metadata) = self.ports.index.lookup(document, &content) else {
            self.log(Level::Debug, || format!("{document}: not indexed, scanning content"));
            let body = resolve_body(&content, None);
            return self.analyze_body(document, &body);
        };

        let body = extract_body(&content, metadata.front_matter);
        let headings = if metadata.headings.is_empty() {
            count_headings_by_level(&body)
        } else {
            self.log(Level::Trace, || format!("{document}: {} cached headings", metadata.headings.len()));
            tally_levels(metadata.headings.iter().map(|p| p.level))
        };

        self.build_stats(document, &body, headings)
    }

    /// Statistics from content alone, ignoring the metadata index.
    ///
    /// # Errors
    ///
    /// Returns `ContentUnavailable` when the document cannot be read.
    pub fn compute_full_scan(&self, document: &DocumentId) -> Result<FileStats> {
        let content = self.ports.content.read_content(document)?;
        let body = resolve_body(&content, None);
        self.analyze_body(document, &body)
    }

    /// Read-only inspection: statistics without any property write.
    ///
    /// # Errors
    ///
    /// Returns `ContentUnavailable` when the document cannot be read.
    pub fn preview(&self, document: &DocumentId) -> Result<FileStats> {
        self.compute_with_cache_assist(document)
    }

    /// Single-document run: compute, write, and notify a consolidated message.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented statistics from being computed at all.
    pub fn calculate(&self, document: &DocumentId, configs: &[CounterConfig]) -> Result<CalculationReport> {
        self.calculate_with(document, configs, true)
    }

    /// Like [`Self::calculate`] but nothing is written.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented statistics from being computed at all.
    pub fn dry_run(&self, document: &DocumentId, configs: &[CounterConfig]) -> Result<CalculationReport> {
        self.calculate_with(document, configs, false)
    }

    fn calculate_with(
        &self,
        document: &DocumentId,
        configs: &[CounterConfig],
        write: bool,
    ) -> Result<CalculationReport> {
        let stats = match self.compute_with_cache_assist(document) {
            Ok(stats) => stats,
            Err(err) => {
                self.notify_error(&format!("{document}: failed to calculate statistics: {err}"));
                return Err(err);
            }
        };

        let report = self.apply(document, stats, configs, write);
        if report.is_success() {
            self.notify_info(&report.summary_message());
        } else {
            self.notify_error(&report.summary_message());
        }
        Ok(report)
    }

    /// Project `stats` for each enabled counter and, when `write` is set, persist it.
    ///
    /// A failing counter is recorded and skipped; the others still run.
    pub(crate) fn apply(
        &self,
        document: &DocumentId,
        stats: FileStats,
        configs: &[CounterConfig],
        write: bool,
    ) -> CalculationReport {
        let mut values = CountResult::new();
        let mut failures = Vec::new();

        for config in configs.iter().filter(|c| c.is_enabled()) {
            let value = match project(config, &stats) {
                Ok(value) => value,
                Err(err) => {
                    failures.push(self.failure(document, config, FailureKind::InvalidParameter, &err.into()));
                    continue;
                }
            };

            if write && let Err(err) = self.ports.properties.set_property(document, config.property(), value) {
                failures.push(self.failure(document, config, FailureKind::PropertyWriteFailed, &err));
                continue;
            }

            self.log(Level::Debug, || format!("{document}: {}={value}", config.property()));
            values.insert(config.property(), value);
        }

        CalculationReport { document: document.clone(), stats, values, failures, written: write }
    }

    fn failure(
        &self,
        document: &DocumentId,
        config: &CounterConfig,
        kind: FailureKind,
        err: &NoteStatError,
    ) -> CounterFailure {
        self.log(Level::Warn, || format!("{document}: counter '{}' failed: {err}", config.property()));
        CounterFailure {
            property: config.property().to_string(),
            counter_type: config.counter_type(),
            kind,
            message: err.to_string(),
        }
    }

    fn build_stats(
        &self,
        document: &DocumentId,
        body: &str,
        headings: BTreeMap<HeadingLevel, usize>,
    ) -> Result<FileStats> {
        let rendered;
        let text = if self.settings.rendered_text {
            rendered = self.ports.renderer.render_plain_text(body, document)?;
            rendered.as_str()
        } else {
            body
        };

        Ok(FileStats::builder()
            .words(count_words(text))
            .chars_with_spaces(count_characters_with_spaces(text))
            .chars_without_spaces(count_characters_without_spaces(text))
            .lines(count_lines(body))
            .headings_by_level(headings)
            .build())
    }

    pub(crate) fn log<F>(&self, level: Level, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.ports.logger.enabled(level) {
            self.ports.logger.log(level, &message());
        }
    }

    pub(crate) fn notify_info(&self, message: &str) {
        if let Err(err) = self.ports.notifier.info(message) {
            self.log(Level::Warn, || format!("notifier failed: {err}"));
        }
    }

    pub(crate) fn notify_error(&self, message: &str) {
        if let Err(err) = self.ports.notifier.error(message) {
            self.log(Level::Warn, || format!("notifier failed: {err}"));
        }
    }
}
