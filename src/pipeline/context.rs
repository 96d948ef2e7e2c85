//! Worker context
//!
//! Context handed to each pipeline thread at spawn time. It carries strong
//! queue handles, so a worker never has to reach back into the object that
//! spawned it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::Level;

use crate::payload::LogMessage;
use crate::registry::QueueHandles;
use crate::stats::PipelineStats;

/// Counters shared by all workers of one pipeline
#[derive(Debug, Default)]
pub(super) struct PipelineCounters {
    pub frames_encoded: AtomicU64,
    pub frames_sent: AtomicU64,
    pub bytes_sent: AtomicU64,
    pub params_applied: AtomicU64,
    pub logs_emitted: AtomicU64,
    pub dropped_pictures: AtomicU64,
}

impl PipelineCounters {
    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            frames_encoded: self.frames_encoded.load(Ordering::Relaxed),
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            params_applied: self.params_applied.load(Ordering::Relaxed),
            logs_emitted: self.logs_emitted.load(Ordering::Relaxed),
            dropped_pictures: self.dropped_pictures.load(Ordering::Relaxed),
        }
    }
}

/// Context passed to a pipeline worker thread
#[derive(Debug, Clone)]
pub struct WorkerContext {
    /// Worker name (also the thread name)
    pub name: &'static str,

    /// Strong handles to the shared queues
    pub handles: QueueHandles,

    /// How long a worker waits on an empty queue before rechecking shutdown
    pub poll_interval: Duration,

    pub(super) shutdown: Arc<AtomicBool>,

    pub(super) counters: Arc<PipelineCounters>,
}

impl WorkerContext {
    /// Check if the owning pipeline asked its workers to stop
    pub fn should_stop(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Route a log entry through the log queue
    ///
    /// Falls back to emitting directly if the log queue is closed.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        let msg = LogMessage::new(level, self.name, message);
        if let Err(rejected) = self.handles.log.push(msg) {
            rejected.into_inner().emit();
        }
    }
}
