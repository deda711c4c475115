//! Debounced auto-save.
//!
//! [`Debouncer`] is a pure state machine: it is fed edits and instants and
//! says when a commit is due. [`spawn_autosaver`] drives one on the tokio
//! runtime and hands due values to a [`CommitSink`]. Tests run the driver
//! under tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Errors from the auto-save pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutoSaveError {
    #[error("Auto-saver has shut down")]
    Closed,
    #[error("Commit failed: {0}")]
    Commit(String),
    /// The sink refused the value; retrying the same value cannot succeed.
    #[error("Commit rejected: {0}")]
    Rejected(String),
}

/// Timing for auto-save commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveSettings {
    /// Quiet period after the last edit before committing. Also the minimum
    /// spacing between two scheduled commits.
    pub quiet: Duration,
    /// Upper bound on how long a pending edit may wait under continuous editing.
    pub max_wait: Duration,
}

impl Default for AutoSaveSettings {
    fn default() -> Self {
        Self {
            quiet: Duration::from_secs(2),
            max_wait: Duration::from_secs(10),
        }
    }
}

/// Coalesces edits and decides when to commit. Latest edit wins.
#[derive(Debug)]
pub struct Debouncer<T> {
    settings: AutoSaveSettings,
    pending: Option<T>,
    first_pending_at: Option<Instant>,
    last_edit_at: Option<Instant>,
    last_commit_at: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(settings: AutoSaveSettings) -> Self {
        Self {
            settings,
            pending: None,
            first_pending_at: None,
            last_edit_at: None,
            last_commit_at: None,
        }
    }

    /// Records an edit, replacing any pending value.
    pub fn record(&mut self, value: T, now: Instant) {
        if self.pending.is_none() {
            self.first_pending_at = Some(now);
        }
        self.pending = Some(value);
        self.last_edit_at = Some(now);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if there is one.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        let last_edit = self.last_edit_at?;
        let first = self.first_pending_at.unwrap_or(last_edit);

        let due = (last_edit + self.settings.quiet).min(first + self.settings.max_wait);
        Some(match self.last_commit_at {
            Some(last_commit) => due.max(last_commit + self.settings.quiet),
            None => due,
        })
    }

    /// Takes the pending value if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.due_at() {
            Some(due) if due <= now => self.take(now),
            _ => None,
        }
    }

    /// Takes the pending value regardless of timing.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        self.take(now)
    }

    /// Puts back a value whose commit failed, unless a newer edit arrived.
    ///
    /// The retry is scheduled one quiet period after `now`.
    pub fn restore(&mut self, value: T, now: Instant) {
        if self.pending.is_none() {
            self.pending = Some(value);
            self.first_pending_at = Some(now);
            self.last_edit_at = Some(now);
        }
    }

    fn take(&mut self, now: Instant) -> Option<T> {
        let value = self.pending.take()?;
        self.first_pending_at = None;
        self.last_commit_at = Some(now);
        Some(value)
    }
}

/// Destination for committed edits, typically a REST save call.
#[async_trait::async_trait]
pub trait CommitSink<T: Send + Sync + 'static>: Send + Sync {
    async fn commit(&self, value: &T) -> Result<(), AutoSaveError>;
}

/// Handle to a running auto-saver.
pub struct AutoSaveHandle<T> {
    edits: mpsc::UnboundedSender<T>,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl<T: Send + Sync + 'static> AutoSaveHandle<T> {
    /// Submits an edit.
    pub fn edit(&self, value: T) -> Result<(), AutoSaveError> {
        self.edits.send(value).map_err(|_| AutoSaveError::Closed)
    }

    /// Stops the auto-saver, committing any pending edit first.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Auto-saver task failed");
        }
    }
}

/// Spawns an auto-saver committing through `sink`.
pub fn spawn_autosaver<T, S>(sink: Arc<S>, settings: AutoSaveSettings) -> AutoSaveHandle<T>
where
    T: Send + Sync + 'static,
    S: CommitSink<T> + 'static,
{
    let (edits, mut edits_rx) = mpsc::unbounded_channel::<T>();
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(settings);
        info!(quiet_ms = settings.quiet.as_millis() as u64, "Auto-saver started");

        loop {
            let due = debouncer.due_at();
            tokio::select! {
                edit = edits_rx.recv() => match edit {
                    Some(value) => {
                        debug!("Edit recorded");
                        debouncer.record(value, Instant::now());
                    }
                    None => break,
                },
                _ = tokio::time::sleep_until(due.unwrap_or_else(Instant::now)), if due.is_some() => {
                    if let Some(value) = debouncer.poll(Instant::now()) {
                        commit(sink.as_ref(), &mut debouncer, value).await;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        // Edits already queued count as pending
        while let Ok(value) = edits_rx.try_recv() {
            debouncer.record(value, Instant::now());
        }
        if let Some(value) = debouncer.flush(Instant::now()) {
            if let Err(e) = sink.commit(&value).await {
                error!(error = %e, "Final auto-save commit failed");
            }
        }
        info!("Auto-saver stopped");
    });

    AutoSaveHandle {
        edits,
        shutdown_tx,
        task,
    }
}

async fn commit<T, S>(sink: &S, debouncer: &mut Debouncer<T>, value: T)
where
    T: Send + Sync + 'static,
    S: CommitSink<T> + ?Sized,
{
    let start = Instant::now();
    match sink.commit(&value).await {
        Ok(()) => {
            debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Auto-save committed");
        }
        Err(e @ AutoSaveError::Rejected(_)) => {
            warn!(error = %e, "Auto-save commit rejected, dropping edit");
        }
        Err(e) => {
            error!(error = %e, "Auto-save commit failed, will retry");
            debouncer.restore(value, Instant::now());
        }
    }
}
