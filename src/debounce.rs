//! Write coalescing.
//!
//! A [`Debouncer`] wraps a callback so that a burst of calls collapses into a
//! single execution, `delay` after the last call, with the last call's
//! arguments. Every call restarts the delay.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::Error;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

pub struct Debouncer<T> {
    delay: Duration,
    callback: Callback<T>,
    runtime: Handle,
    /// At most one scheduled execution exists at a time.
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Send + 'static,
{
    /// Wraps `callback`, scheduling on the tokio runtime this is called from.
    ///
    /// # Errors
    /// Returns [`Error::NoRuntime`] if called outside a tokio runtime.
    pub fn new<F>(delay: Duration, callback: F) -> Result<Self, Error>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self {
            delay,
            callback: Arc::new(callback),
            runtime,
            pending: None,
        })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels the pending execution, if any, and schedules a new one with `args`.
    pub fn call(&mut self, args: T) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// Whether an execution is scheduled and has not finished yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    /// Waits for the scheduled execution, if any, to run. Does not shorten the delay.
    pub async fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            // A panicking callback is not ours to handle; the write is simply gone.
            let _ = pending.await;
        }
    }
}
