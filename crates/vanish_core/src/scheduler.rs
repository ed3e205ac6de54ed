//! Deferred write scheduling
//!
//! Style mutations are decided immediately but written later, at the point
//! in the host's frame where visual writes are cheapest.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A deferred visual write
pub type WriteJob = Box<dyn FnOnce() + Send>;

/// Accepts visual writes for later execution
///
/// Writes are fire-and-forget: the caller never observes completion.
pub trait WriteScheduler: Send + Sync {
    /// Queue a write
    fn write(&self, job: WriteJob);
}

/// Batches writes until the host flushes them at its paint point
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct FrameWriteQueue {
    jobs: Arc<Mutex<VecDeque<WriteJob>>>,
}

impl FrameWriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<WriteJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run every queued write in FIFO order
    ///
    /// Writes queued while flushing run on the next flush. Returns the
    /// number of writes executed.
    pub fn flush(&self) -> usize {
        let batch = std::mem::take(&mut *self.lock());
        let count = batch.len();

        for job in batch {
            job();
        }

        if count > 0 {
            tracing::trace!(count, "flushed deferred writes");
        }
        count
    }

    /// Get the number of writes waiting for the next flush
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Check if no writes are waiting
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl WriteScheduler for FrameWriteQueue {
    fn write(&self, job: WriteJob) {
        self.lock().push_back(job);
    }
}

/// Runs every write synchronously, for hosts without a paint cycle
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateWriter;

impl WriteScheduler for ImmediateWriter {
    fn write(&self, job: WriteJob) {
        job();
    }
}
