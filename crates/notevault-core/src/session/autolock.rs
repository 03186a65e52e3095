//! Background inactivity timer.
//!
//! [`AutoLock`] polls a shared session and calls
//! [`SessionGuard::check_timeout`] on every tick. Stopping or dropping the
//! handle ends the thread.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::SessionGuard;
use crate::error::Result;

/// A session shared between the foreground and the auto-lock thread.
pub type SharedSession = Arc<Mutex<SessionGuard>>;

/// How often the timer checks for inactivity.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to a running auto-lock thread.
#[derive(Debug)]
pub struct AutoLock {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AutoLock {
    /// Start polling `session` every `interval`.
    pub fn spawn(session: SharedSession, interval: Duration) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("notevault-autolock".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                let mut guard = match session.lock() {
                    Ok(guard) => guard,
                    Err(_) => {
                        tracing::error!("session mutex poisoned; stopping auto-lock");
                        break;
                    }
                };
                if let Err(err) = guard.check_timeout() {
                    tracing::warn!(error = %err, "auto-lock could not save pending edits");
                }
            })?;

        tracing::debug!(interval_ms = interval.as_millis() as u64, "auto-lock started");
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop the timer and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("auto-lock thread panicked");
            }
        }
    }
}

impl Drop for AutoLock {
    fn drop(&mut self) {
        self.shutdown();
    }
}
