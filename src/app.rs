// src/app.rs
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use log::LevelFilter;

use crate::{
    cli::{Cli, Command, PreviewFormat},
    presentation,
    settings::Settings,
};
use notestat_infra::{
    ConsoleLogger, ConsoleNotifier, FrontMatterPropertyStore, FsVault, PlainTextRenderer, ScanningMetadataIndex,
    WatchService, Xxh3Hasher,
};
use notestat_usecase::{EnginePorts, EngineSettings, StatisticsEngine};

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Adapters shared by every engine-backed command.
struct Runtime {
    vault: FsVault,
    store: FrontMatterPropertyStore,
    notifier: ConsoleNotifier,
    logger: ConsoleLogger,
    settings: Settings,
}

impl Runtime {
    fn new(cli: &Cli, settings: Settings) -> Self {
        let max_level = if cli.quiet {
            LevelFilter::Off
        } else if cli.verbose {
            LevelFilter::Debug
        } else {
            settings.log_level.into()
        };
        let logger = ConsoleLogger::new(max_level);
        // テストなどで二重に初期化された場合は既存のロガーを使う
        let _ = logger.install();

        // watch のイベントパスと突き合わせるため正規化しておく
        let root = cli.vault.canonicalize().unwrap_or_else(|_| cli.vault.clone());
        let vault = FsVault::new(root);
        Self {
            store: FrontMatterPropertyStore::new(vault.clone()),
            vault,
            notifier: ConsoleNotifier::new(cli.quiet),
            logger,
            settings,
        }
    }

    fn index() -> ScanningMetadataIndex<'static> {
        ScanningMetadataIndex::new(&Xxh3Hasher)
    }

    fn engine<'a>(&'a self, index: &'a ScanningMetadataIndex<'_>) -> StatisticsEngine<'a> {
        let ports = EnginePorts {
            content: &self.vault,
            index,
            renderer: &PlainTextRenderer,
            properties: &self.store,
            notifier: &self.notifier,
            logger: &self.logger,
        };
        StatisticsEngine::new(ports, EngineSettings { rendered_text: self.settings.rendered_text })
    }
}

fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load(path).with_context(|| format!("failed to load settings from {}", path.display()))
}

/// Execute one parsed command line.
///
/// # Errors
///
/// Returns errors that prevent the command from running at all; per-document and
/// per-counter failures are reported through the exit code instead.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let settings_path = Settings::resolve_path(&cli.vault, cli.config.as_deref());

    match &cli.command {
        Command::Init => init(&settings_path),
        Command::Check => check(&settings_path),
        Command::Counters => {
            let settings = load_settings(&settings_path)?;
            print!("{}", presentation::counters_text(&settings.counters));
            Ok(ExitCode::SUCCESS)
        }
        Command::Calc { document, dry_run } => {
            let runtime = Runtime::new(cli, load_settings(&settings_path)?);
            let index = Runtime::index();
            let engine = runtime.engine(&index);
            let configs = runtime.settings.counters.enabled_snapshot();
            let id = runtime.vault.resolve(document);

            let outcome = if *dry_run { engine.dry_run(&id, &configs) } else { engine.calculate(&id, &configs) };
            let report = outcome.with_context(|| format!("failed to calculate statistics for {id}"))?;
            Ok(exit_code(report.is_success()))
        }
        Command::CalcAll => {
            let runtime = Runtime::new(cli, load_settings(&settings_path)?);
            let index = Runtime::index();
            let engine = runtime.engine(&index);
            let configs = runtime.settings.counters.enabled_snapshot();

            let summary = engine.calculate_all(&configs).context("failed to list documents")?;
            Ok(exit_code(summary.failed_documents.is_empty() && summary.counter_failures == 0))
        }
        Command::Preview { document, format } => {
            let runtime = Runtime::new(cli, load_settings(&settings_path)?);
            let index = Runtime::index();
            let engine = runtime.engine(&index);
            let id = runtime.vault.resolve(document);

            let stats = engine.preview(&id).with_context(|| format!("failed to read {id}"))?;
            match format {
                PreviewFormat::Text => print!("{}", presentation::stats_text(&id, &stats)),
                PreviewFormat::Json => println!("{}", presentation::stats_json(&id, &stats)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Watch => watch(cli, load_settings(&settings_path)?),
    }
}

fn init(path: &Path) -> Result<ExitCode> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    Settings::default().save(path).with_context(|| format!("failed to create {}", path.display()))?;
    println!("created {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn check(path: &Path) -> Result<ExitCode> {
    if !path.exists() {
        println!("{} not found; defaults apply", path.display());
        return Ok(ExitCode::SUCCESS);
    }
    let settings = load_settings(path)?;
    println!(
        "{}: ok ({} counters, {} enabled)",
        path.display(),
        settings.counters.len(),
        settings.counters.enabled().count()
    );
    Ok(ExitCode::SUCCESS)
}

fn watch(cli: &Cli, settings: Settings) -> Result<ExitCode> {
    if !settings.auto_calculate {
        bail!("auto_calculate is disabled in the settings file");
    }
    let runtime = Runtime::new(cli, settings);
    let index = Runtime::index();
    let engine = runtime.engine(&index);
    let configs = runtime.settings.counters.enabled_snapshot();
    let service = WatchService::new(runtime.vault.root(), runtime.settings.debounce());

    log::info!("watching {} (debounce {:?})", runtime.vault.root().display(), service.debounce());
    service
        .run(|paths: Vec<PathBuf>| {
            for path in paths {
                let Some(id) = runtime.vault.document_for(&path) else {
                    continue;
                };
                // 失敗は通知済み
                if let Err(err) = engine.calculate(&id, &configs) {
                    log::debug!("{id}: {err}");
                }
            }
            // 削除・リネームされたノートのエントリを捨てる
            let evicted = index.retain(|id| runtime.vault.path_of(id).is_file());
            if evicted > 0 {
                log::debug!("evicted {evicted} vanished documents from the index");
            }
            Ok(())
        })
        .context("watch stopped")?;
    Ok(ExitCode::SUCCESS)
}
