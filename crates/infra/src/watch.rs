// crates/infra/src/watch.rs
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    thread,
    time::{Duration, SystemTime},
};

use ignore::WalkBuilder;
use notestat_shared_kernel::Result;

#[cfg(feature = "watch")]
use {
    notestat_shared_kernel::InfrastructureError,
    notify::{RecommendedWatcher, RecursiveMode, Watcher, event::EventKind},
    std::{collections::BTreeSet, sync::mpsc, time::Instant},
};

#[cfg(feature = "watch")]
type EventReceiver = mpsc::Receiver<std::result::Result<notify::Event, notify::Error>>;

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Modification times of every visible markdown file under `root`.
fn snapshot(root: &Path) -> HashMap<PathBuf, SystemTime> {
    WalkBuilder::new(root)
        .hidden(true)
        .require_git(false)
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()) && is_markdown(entry.path()))
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((entry.into_path(), modified))
        })
        .collect()
}

/// Files that appeared or changed between two snapshots, sorted.
fn diff_snapshots(old: &HashMap<PathBuf, SystemTime>, new: &HashMap<PathBuf, SystemTime>) -> Vec<PathBuf> {
    let mut changed: Vec<PathBuf> = new
        .iter()
        .filter(|(path, modified)| old.get(*path) != Some(*modified))
        .map(|(path, _)| path.clone())
        .collect();
    changed.sort();
    changed
}

/// Recursive watch of a vault that reports changed markdown files in batches.
///
/// Events are coalesced until `debounce` has passed without a new one, so a
/// document that is still being written is not recalculated half way.
#[derive(Debug, Clone)]
pub struct WatchService {
    root: PathBuf,
    debounce: Duration,
}

impl WatchService {
    pub fn new(root: impl Into<PathBuf>, debounce: Duration) -> Self {
        Self { root: root.into(), debounce }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    fn poll_loop<F>(&self, on_change: &mut F) -> Result<()>
    where
        F: FnMut(Vec<PathBuf>) -> Result<()>,
    {
        let mut known = snapshot(&self.root);
        loop {
            thread::sleep(self.debounce);
            let current = snapshot(&self.root);
            let changed = diff_snapshots(&known, &current);
            if !changed.is_empty() {
                on_change(changed)?;
            }
            // コールバック内の書き込みを次回の差分に含めない
            known = snapshot(&self.root);
        }
    }
}

#[cfg(feature = "watch")]
impl WatchService {
    /// Run the watch service: try to use filesystem notifications and fall back to polling.
    ///
    /// # Errors
    ///
    /// Returns an error if the `on_change` callback returns one.
    pub fn run<F>(&self, mut on_change: F) -> Result<()>
    where
        F: FnMut(Vec<PathBuf>) -> Result<()>,
    {
        match self.create_watcher() {
            Ok((watcher, rx)) => {
                // Keep `watcher` alive in this scope so it continues watching.
                let _keep = &watcher;
                self.event_loop(&rx, &mut on_change)
            }
            Err(err) => {
                log::warn!("file watcher unavailable ({err}). Falling back to polling every {:?}.", self.debounce);
                self.poll_loop(&mut on_change)
            }
        }
    }

    fn create_watcher(&self) -> std::result::Result<(RecommendedWatcher, EventReceiver), InfrastructureError> {
        let (tx, rx) = mpsc::channel();
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .map_err(|err| InfrastructureError::WatchError { details: err.to_string() })?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|err| InfrastructureError::WatchError { details: err.to_string() })?;

        Ok((watcher, rx))
    }

    fn event_loop<F>(&self, rx: &EventReceiver, on_change: &mut F) -> Result<()>
    where
        F: FnMut(Vec<PathBuf>) -> Result<()>,
    {
        let mut pending: Option<Instant> = None;
        let mut changed = BTreeSet::new();

        loop {
            let last_event = match pending {
                Some(last_event) => last_event,
                None => {
                    match rx.recv() {
                        Ok(Ok(event)) => {
                            if Self::record(&event, &mut changed) {
                                pending = Some(Instant::now());
                            }
                        }
                        Ok(Err(err)) => log::warn!("watcher error: {err}"),
                        Err(_) => return self.poll_loop(on_change),
                    }
                    continue;
                }
            };

            let remaining = self.debounce.saturating_sub(last_event.elapsed());
            if remaining.is_zero() {
                Self::flush(&mut changed, on_change)?;
                pending = None;
                continue;
            }

            match rx.recv_timeout(remaining) {
                Ok(Ok(event)) => {
                    if Self::record(&event, &mut changed) {
                        pending = Some(Instant::now());
                    }
                }
                Ok(Err(err)) => log::warn!("watcher error: {err}"),
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    Self::flush(&mut changed, on_change)?;
                    pending = None;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => return self.poll_loop(on_change),
            }
        }
    }

    fn flush<F>(changed: &mut BTreeSet<PathBuf>, on_change: &mut F) -> Result<()>
    where
        F: FnMut(Vec<PathBuf>) -> Result<()>,
    {
        let batch: Vec<PathBuf> = std::mem::take(changed).into_iter().filter(|p| p.is_file()).collect();
        if batch.is_empty() {
            return Ok(());
        }
        on_change(batch)
    }

    /// Add the markdown paths of `event` to `changed`; true when anything was added.
    fn record(event: &notify::Event, changed: &mut BTreeSet<PathBuf>) -> bool {
        if !Self::is_relevant(event.kind) {
            return false;
        }
        let before = changed.len();
        changed.extend(event.paths.iter().filter(|p| is_markdown(p)).cloned());
        changed.len() > before
    }

    const fn is_relevant(kind: EventKind) -> bool {
        matches!(kind, EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Other)
    }
}

#[cfg(not(feature = "watch"))]
impl WatchService {
    /// Without filesystem notifications the vault is polled every debounce interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the `on_change` callback returns one.
    pub fn run<F>(&self, mut on_change: F) -> Result<()>
    where
        F: FnMut(Vec<PathBuf>) -> Result<()>,
    {
        self.poll_loop(&mut on_change)
    }
}
