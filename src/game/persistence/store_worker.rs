//! Store Worker
//!
//! Background thread that owns a [`CreationStore`]. Commands go in over one
//! channel and results come back as [`StoreEvent`]s on another.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::creation_store::{Creation, CreationStore};
use super::{PersistenceError, PersistenceResult};
use crate::game::building::Block;

pub enum StoreCommand {
    Save { name: String, blocks: Vec<Block> },
    Update { id: String, name: String, blocks: Vec<Block> },
    Load { id: String },
    List { limit: usize, offset: usize },
    Delete { id: String },
    Shutdown,
}

/// Which request a [`StoreEvent::Failed`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Save,
    Update,
    Load,
    List,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Saved { id: String, name: String },
    Updated { id: String, name: String },
    Loaded(Creation),
    Listed(Vec<Creation>),
    Deleted { id: String },
    Failed { op: StoreOp, error: PersistenceError },
}

/// Runs a [`CreationStore`] on its own thread so store round trips never
/// block the interaction loop.
pub struct StoreWorker {
    tx_cmd: Sender<StoreCommand>,
    rx_evt: Receiver<StoreEvent>,
    thread: Option<JoinHandle<()>>,
    available: bool,
}

impl StoreWorker {
    /// Probe the store once and move it onto a worker thread.
    pub fn spawn<S>(store: S) -> PersistenceResult<Self>
    where
        S: CreationStore + Send + 'static,
    {
        let available = store.is_available();
        if !available {
            log::warn!("[Store] Creation store unavailable; save and load are disabled");
        }

        let (tx_cmd, rx_cmd) = mpsc::channel::<StoreCommand>();
        let (tx_evt, rx_evt) = mpsc::channel::<StoreEvent>();

        let thread = thread::Builder::new()
            .name("creation-store-worker".to_string())
            .spawn(move || worker_loop(store, rx_cmd, tx_evt))?;

        Ok(Self {
            tx_cmd,
            rx_evt,
            thread: Some(thread),
            available,
        })
    }

    /// Result of the availability probe taken at spawn.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn send(&self, cmd: StoreCommand) -> bool {
        self.tx_cmd.send(cmd).is_ok()
    }

    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.rx_evt.try_recv().ok()
    }

    /// Block for the next event, up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> PersistenceResult<Option<StoreEvent>> {
        match self.rx_evt.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(PersistenceError::WorkerStopped),
        }
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(StoreCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop<S: CreationStore>(mut store: S, rx_cmd: Receiver<StoreCommand>, tx_evt: Sender<StoreEvent>) {
    while let Ok(cmd) = rx_cmd.recv() {
        let event = match cmd {
            StoreCommand::Save { name, blocks } => match store.save(&name, &blocks) {
                Ok(id) => {
                    log::info!("[Store] Saved '{}' as {} ({} bricks)", name, id, blocks.len());
                    StoreEvent::Saved { id, name }
                }
                Err(error) => failed(StoreOp::Save, error),
            },
            StoreCommand::Update { id, name, blocks } => match store.update(&id, &name, &blocks) {
                Ok(()) => {
                    log::info!("[Store] Updated {} ({} bricks)", id, blocks.len());
                    StoreEvent::Updated { id, name }
                }
                Err(error) => failed(StoreOp::Update, error),
            },
            StoreCommand::Load { id } => match store.get(&id) {
                Ok(creation) => StoreEvent::Loaded(creation),
                Err(error) => failed(StoreOp::Load, error),
            },
            StoreCommand::List { limit, offset } => match store.list(limit, offset) {
                Ok(creations) => StoreEvent::Listed(creations),
                Err(error) => failed(StoreOp::List, error),
            },
            StoreCommand::Delete { id } => match store.delete(&id) {
                Ok(()) => {
                    log::info!("[Store] Deleted {}", id);
                    StoreEvent::Deleted { id }
                }
                Err(error) => failed(StoreOp::Delete, error),
            },
            StoreCommand::Shutdown => break,
        };

        if tx_evt.send(event).is_err() {
            break;
        }
    }
}

fn failed(op: StoreOp, error: PersistenceError) -> StoreEvent {
    log::warn!("[Store] {:?} failed: {}", op, error);
    StoreEvent::Failed { op, error }
}
