//! Editor collaborator: a source file watched by polling.
//!
//! The editor only ever reports full replacement text. Every poll reads the
//! whole file and emits it when it differs from the last text sent.

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::spawn as TokioSpawn;
use tokio::sync::mpsc::{Receiver, Sender, channel};
use tokio::time::{MissedTickBehavior, interval};

const EDIT_CHANNEL_CAPACITY: usize = 8;

/// Watches one source file and reports its contents on change.
#[derive(Debug, Clone)]
pub struct FileEditor {
    path: PathBuf,
    poll_interval: Duration,
}

impl FileEditor {
    pub fn new(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            path: path.into(),
            poll_interval,
        }
    }

    /// Start watching in the background. The watcher stops once the returned
    /// receiver is dropped.
    pub fn spawn(self) -> Receiver<String> {
        let (edits, receiver) = channel(EDIT_CHANNEL_CAPACITY);
        TokioSpawn(self.watch(edits));
        receiver
    }

    async fn watch(self, edits: Sender<String>) {
        info!(
            "Watching {} every {}",
            self.path.display(),
            humantime::format_duration(self.poll_interval)
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_sent: Option<String> = None;
        let mut read_failing = false;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = edits.closed() => {
                    debug!("Edit receiver dropped, stopping watcher for {}", self.path.display());
                    return;
                }
            }

            let text = match tokio::fs::read_to_string(&self.path).await {
                Ok(text) => {
                    read_failing = false;
                    text
                }
                Err(e) => {
                    if !read_failing {
                        warn!("Cannot read {}: {e}", self.path.display());
                        read_failing = true;
                    }
                    continue;
                }
            };

            if !is_new_edit(last_sent.as_deref(), &text) {
                continue;
            }

            debug!("{} changed ({} bytes)", self.path.display(), text.len());
            if edits.send(text.clone()).await.is_err() {
                return;
            }
            last_sent = Some(text);
        }
    }
}

/// The first read always counts as an edit.
pub(crate) fn is_new_edit(last_sent: Option<&str>, current: &str) -> bool {
    last_sent != Some(current)
}
