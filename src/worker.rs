//! Runs one batch on a background thread. The thread never touches UI state;
//! it only sends `BatchEvent`s that the UI drains on its own thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::error;

use crate::adapter::AdapterFactory;
use crate::convert::{BatchEvent, Outcome, convert_all};

/// Called after every event so the UI can wake up and drain the queue.
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct BatchHandle {
    receiver: Receiver<BatchEvent>,
    thread: Option<JoinHandle<()>>,
}

/// Result of draining the queue once.
#[derive(Debug, Default)]
pub struct Drained {
    pub events: Vec<BatchEvent>,
    /// The worker is gone; no more events will arrive.
    pub disconnected: bool,
}

impl BatchHandle {
    /// Take everything queued so far without blocking.
    pub fn drain(&mut self) -> Drained {
        let mut drained = Drained::default();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => drained.events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    drained.disconnected = true;
                    if let Some(thread) = self.thread.take() {
                        if thread.join().is_err() {
                            error!("conversion worker panicked");
                        }
                    }
                    break;
                }
            }
        }
        drained
    }
}

/// Start converting `files` (already a snapshot) on a new thread.
pub fn spawn_batch(
    factory: AdapterFactory,
    files: Vec<PathBuf>,
    dpi: f32,
    notify: Notifier,
) -> std::io::Result<BatchHandle> {
    let (sender, receiver) = mpsc::channel();

    let thread = thread::Builder::new()
        .name("pdf2png-batch".to_string())
        .spawn(move || {
            let mut emit = |event: BatchEvent| {
                // Receiver gone means the window closed; nothing left to tell
                let _ = sender.send(event);
                notify();
            };

            let outcome = match factory() {
                Ok(adapter) => convert_all(adapter.as_ref(), &files, dpi, &mut emit),
                Err(e) => {
                    error!("cannot start conversion: {e:#}");
                    emit(BatchEvent::Error(format!("cannot start conversion: {e:#}")));
                    Outcome {
                        total: files.len(),
                        errored: files.len(),
                        ..Outcome::default()
                    }
                }
            };
            emit(BatchEvent::Finished(outcome));
        })?;

    Ok(BatchHandle {
        receiver,
        thread: Some(thread),
    })
}
