use crate::collection::types::Collection;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Destination for autosaved collection snapshots.
pub trait CollectionSink: Send + Sync {
    fn save(&self, collection: &Collection) -> Result<()>;
}

/// Sink that writes snapshots to a collection file on disk
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CollectionSink for FileSink {
    fn save(&self, collection: &Collection) -> Result<()> {
        crate::collection::storage::save_collection(&self.path, collection)
    }
}

/// Debounced autosave scheduler.
///
/// Mutations call `schedule_save` with a full snapshot; the background task
/// coalesces bursts and writes only the latest snapshot after a quiet
/// period. Dropping the saver (or calling `shutdown`) flushes any pending
/// snapshot. The rating engine never touches this: scheduling saves is a
/// driver concern.
pub struct DebouncedSaver {
    tx: Option<mpsc::UnboundedSender<Collection>>,
    task: Option<JoinHandle<()>>,
}

impl DebouncedSaver {
    /// Default quiet period before a snapshot is written
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

    pub fn spawn(delay: Duration, sink: Arc<dyn CollectionSink>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Collection>();

        let task = tokio::spawn(async move {
            let mut pending: Option<Collection> = None;
            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(snapshot) => pending = Some(snapshot),
                        None => break,
                    },
                    Some(snapshot) => {
                        tokio::select! {
                            next = rx.recv() => match next {
                                // Newer snapshot supersedes the pending one;
                                // the quiet period restarts.
                                Some(newer) => pending = Some(newer),
                                None => {
                                    flush(sink.as_ref(), &snapshot);
                                    break;
                                }
                            },
                            _ = tokio::time::sleep(delay) => {
                                flush(sink.as_ref(), &snapshot);
                            }
                        }
                    }
                }
            }
        });

        Self {
            tx: Some(tx),
            task: Some(task),
        }
    }

    /// Queue a snapshot for saving after the quiet period
    pub fn schedule_save(&self, snapshot: Collection) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(snapshot);
        }
    }

    /// Flush any pending snapshot and wait for the background task to finish
    pub async fn shutdown(mut self) {
        self.tx.take();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

fn flush(sink: &dyn CollectionSink, snapshot: &Collection) {
    if let Err(e) = sink.save(snapshot) {
        eprintln!("Autosave failed: {}", e);
    }
}
