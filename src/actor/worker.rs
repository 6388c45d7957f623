//! Named background thread with a cooperative stop flag.

use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::warn;

/// Owns a thread whose body polls a shared flag and returns once it is set.
///
/// Dropping the worker raises the flag and joins the thread.
pub(crate) struct Worker {
    name: &'static str,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn<F>(name: &'static str, body: F) -> Result<Self>
    where
        F: FnOnce(&AtomicBool) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || body(&flag))?;
        Ok(Self {
            name,
            stop,
            thread: Some(thread),
        })
    }

    /// Ask the body to return; does not wait.
    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub(crate) fn stop_and_wait(&mut self) {
        self.request_stop();
        let Some(thread) = self.thread.take() else {
            return;
        };
        if thread.join().is_err() {
            warn!(thread = self.name, "worker thread panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop_and_wait();
    }
}

/// True once [`Worker::request_stop`] has been called.
pub(crate) fn stopping(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Acquire)
}
