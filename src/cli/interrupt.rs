//! Ctrl-C routing: cancels the fetch in flight, or exits when nothing is being fetched.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::{CancelHandle, CancelSignal, cancel_pair};

/// Exit code of a process stopped by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    CancelFetch,
    Exit,
}

/// Shared between the signal listener and the code that runs fetches.
#[derive(Clone, Default)]
pub struct InterruptGuard {
    armed: Arc<Mutex<Option<CancelHandle>>>,
}

impl InterruptGuard {
    fn slot(&self) -> MutexGuard<'_, Option<CancelHandle>> {
        self.armed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Routes the next interrupt to the returned signal until [`disarm`].
    ///
    /// [`disarm`]: InterruptGuard::disarm
    pub fn arm(&self) -> CancelSignal {
        let (handle, signal) = cancel_pair();
        *self.slot() = Some(handle);
        signal
    }

    pub fn disarm(&self) {
        self.slot().take();
    }

    /// Handles one interrupt. Only the first interrupt of an armed fetch cancels it.
    pub fn on_interrupt(&self) -> InterruptAction {
        match self.slot().take() {
            Some(handle) => {
                handle.cancel();
                InterruptAction::CancelFetch
            }
            None => InterruptAction::Exit,
        }
    }

    /// Listens for Ctrl-C for the rest of the process.
    pub fn listen(&self) -> JoinHandle<()> {
        let guard = self.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match guard.on_interrupt() {
                    InterruptAction::CancelFetch => debug!("Interrupt cancelled the fetch"),
                    InterruptAction::Exit => {
                        debug!("Interrupt outside a fetch, exiting");
                        std::process::exit(INTERRUPTED_EXIT_CODE);
                    }
                }
            }
        })
    }
}
