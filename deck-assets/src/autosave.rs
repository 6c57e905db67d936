//! Debounced autosave worker.
//!
//! Edits schedule a fresh record; the worker waits for a quiet period
//! before writing, and records scheduled inside the window coalesce so
//! only the latest reaches disk. Timer-based, not a lock: scheduling is
//! always cheap for the editing path.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::persist::{ProjectRecord, ProjectStore};

enum Command {
    Save(ProjectRecord),
    Flush(oneshot::Sender<()>),
}

/// Handle to a background autosave task.
#[derive(Debug)]
pub struct Autosaver {
    tx: mpsc::UnboundedSender<Command>,
    handle: JoinHandle<()>,
}

impl Autosaver {
    /// Spawn the worker. Records scheduled within `quiet` of each other
    /// coalesce; each new record restarts the window.
    #[must_use]
    pub fn spawn(projects: ProjectStore, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(projects, rx, quiet));
        Self { tx, handle }
    }

    /// Queue a record for saving after the quiet period.
    ///
    /// A record scheduled after the worker has shut down is dropped.
    pub fn schedule(&self, record: ProjectRecord) {
        if self.tx.send(Command::Save(record)).is_err() {
            tracing::warn!("Autosave worker is gone, dropping record");
        }
    }

    /// Write any pending record immediately and wait for the write.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Flush the pending record and stop the worker.
    pub async fn close(self) {
        drop(self.tx);
        if let Err(e) = self.handle.await {
            tracing::warn!("Autosave worker panicked: {e}");
        }
    }
}

async fn run(projects: ProjectStore, mut rx: mpsc::UnboundedReceiver<Command>, quiet: Duration) {
    let mut pending: Option<ProjectRecord> = None;
    loop {
        if pending.is_some() {
            tokio::select! {
                msg = rx.recv() => match msg {
                    // Latest record wins; the quiet window restarts.
                    Some(Command::Save(record)) => pending = Some(record),
                    Some(Command::Flush(ack)) => {
                        write_pending(&projects, &mut pending);
                        let _ = ack.send(());
                    }
                    None => break,
                },
                () = tokio::time::sleep(quiet) => {
                    write_pending(&projects, &mut pending);
                }
            }
        } else {
            match rx.recv().await {
                Some(Command::Save(record)) => pending = Some(record),
                Some(Command::Flush(ack)) => {
                    let _ = ack.send(());
                }
                None => break,
            }
        }
    }
    // Channel closed; don't lose whatever was still waiting out the window.
    write_pending(&projects, &mut pending);
}

fn write_pending(projects: &ProjectStore, pending: &mut Option<ProjectRecord>) {
    if let Some(record) = pending.take() {
        if let Err(e) = projects.save_record(&record) {
            tracing::warn!("Autosave of {} failed: {e}", record.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::DeckStore;

    fn record(id: &str, title: &str) -> ProjectRecord {
        let mut deck = DeckStore::new();
        deck.set_title(title);
        ProjectRecord::new(id, deck.document())
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_after_quiet_period() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = ProjectStore::new(dir.path()).expect("store");
        let saver = Autosaver::spawn(projects.clone(), Duration::from_millis(2000));

        saver.schedule(record("deck-1", "First"));
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let saved = projects.load_record("deck-1").expect("record");
        assert_eq!(saved.title, "First");
        saver.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_coalesce_to_latest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = ProjectStore::new(dir.path()).expect("store");
        let saver = Autosaver::spawn(projects.clone(), Duration::from_millis(2000));

        for title in ["draft 1", "draft 2", "draft 3"] {
            saver.schedule(record("deck-1", title));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(projects.load_record("deck-1").is_err());

        tokio::time::sleep(Duration::from_millis(2500)).await;
        let saved = projects.load_record("deck-1").expect("record");
        assert_eq!(saved.title, "draft 3");
        saver.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_immediately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = ProjectStore::new(dir.path()).expect("store");
        let saver = Autosaver::spawn(projects.clone(), Duration::from_secs(3600));

        saver.schedule(record("deck-1", "Pending"));
        saver.flush().await;

        let saved = projects.load_record("deck-1").expect("record");
        assert_eq!(saved.title, "Pending");
        saver.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_flushes_pending_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let projects = ProjectStore::new(dir.path()).expect("store");
        let saver = Autosaver::spawn(projects.clone(), Duration::from_secs(3600));

        saver.schedule(record("deck-1", "Last words"));
        saver.close().await;

        let saved = projects.load_record("deck-1").expect("record");
        assert_eq!(saved.title, "Last words");
    }
}
