//! Asset load tracking
//!
//! Loaders run on their own (browser image/audio callbacks) and report back
//! through a channel. The renderer polls the tracker once per frame and
//! falls back to placeholder shapes for anything not ready. Nothing here
//! feeds back into the simulation.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Load state of one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Ready,
    Failed(String),
}

impl AssetStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetStatus::Ready)
    }
}

/// Completion report sent by a loader
#[derive(Debug, Clone)]
pub struct AssetEvent {
    pub id: String,
    pub result: Result<(), String>,
}

/// Handle given to a loader callback to report completion
#[derive(Debug, Clone)]
pub struct AssetReporter {
    id: String,
    tx: Sender<AssetEvent>,
}

impl AssetReporter {
    pub fn loaded(&self) {
        self.send(Ok(()));
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.send(Err(reason.into()));
    }

    fn send(&self, result: Result<(), String>) {
        // Tracker gone means nobody is drawing any more
        let _ = self.tx.send(AssetEvent {
            id: self.id.clone(),
            result,
        });
    }
}

/// Tracks which assets are usable
#[derive(Debug)]
pub struct AssetTracker {
    status: HashMap<String, AssetStatus>,
    tx: Sender<AssetEvent>,
    rx: Receiver<AssetEvent>,
}

impl Default for AssetTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetTracker {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            status: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Register an asset as pending and get the reporter for its loader
    pub fn track(&mut self, id: &str) -> AssetReporter {
        self.status.insert(id.to_string(), AssetStatus::Pending);
        AssetReporter {
            id: id.to_string(),
            tx: self.tx.clone(),
        }
    }

    /// Apply all completion reports received so far. Returns how many arrived.
    pub fn poll(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.rx.try_recv() {
            count += 1;
            let status = match event.result {
                Ok(()) => {
                    log::info!("Asset loaded: {}", event.id);
                    AssetStatus::Ready
                }
                Err(reason) => {
                    log::warn!(
                        "Failed to load asset {} ({}), using placeholder",
                        event.id,
                        reason
                    );
                    AssetStatus::Failed(reason)
                }
            };
            self.status.insert(event.id, status);
        }
        count
    }

    /// Unknown assets count as pending
    pub fn status(&self, id: &str) -> AssetStatus {
        self.status
            .get(id)
            .cloned()
            .unwrap_or(AssetStatus::Pending)
    }

    pub fn is_ready(&self, id: &str) -> bool {
        self.status.get(id).is_some_and(AssetStatus::is_ready)
    }

    /// True once nothing is pending (loaded or failed)
    pub fn settled(&self) -> bool {
        self.status
            .values()
            .all(|status| !matches!(status, AssetStatus::Pending))
    }
}
