//! Reference media pipeline
//!
//! [`Pipeline`] is the application object that spawns and owns the worker
//! threads: encoder, network sender and log sink. It never owns the queues.
//! Each worker receives strong [`QueueHandles`] in its [`WorkerContext`], so
//! the queues outlive both the pipeline and the registry they came from
//! until the last worker has returned.
//!
//! Dropping a pipeline signals its workers and joins them. Workers keep
//! popping and pushing while the pipeline is mid-drop.

pub mod config;
pub mod context;
mod worker;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::registry::QueueHandles;
use crate::stats::PipelineStats;

pub use config::PipelineConfig;
pub use context::WorkerContext;

use context::PipelineCounters;

/// Running set of pipeline worker threads
pub struct Pipeline {
    /// Stops the encoder and sender
    shutdown: Arc<AtomicBool>,

    /// Stops the log sink, set only after the media workers have joined
    log_shutdown: Arc<AtomicBool>,

    media_workers: Vec<JoinHandle<()>>,

    log_worker: Option<JoinHandle<()>>,

    counters: Arc<PipelineCounters>,
}

impl Pipeline {
    /// Spawn the worker threads
    pub fn start(handles: QueueHandles, config: PipelineConfig) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let log_shutdown = Arc::new(AtomicBool::new(false));
        let counters = Arc::new(PipelineCounters::default());
        let poll_interval = config.effective_poll_interval();

        let worker_context = |name: &'static str, flag: &Arc<AtomicBool>| WorkerContext {
            name,
            handles: handles.clone(),
            poll_interval,
            shutdown: Arc::clone(flag),
            counters: Arc::clone(&counters),
        };

        // Workers spawned so far are stopped by Drop if a later spawn fails
        let mut pipeline = Self {
            shutdown: Arc::clone(&shutdown),
            log_shutdown: Arc::clone(&log_shutdown),
            media_workers: Vec::with_capacity(2),
            log_worker: None,
            counters: Arc::clone(&counters),
        };

        let ctx = worker_context("log-sink", &log_shutdown);
        pipeline.log_worker = Some(spawn_worker(ctx, worker::run_log_sink)?);

        let keyframe_interval = config.keyframe_interval.max(1);
        let ctx = worker_context("encoder", &shutdown);
        pipeline.media_workers.push(spawn_worker(ctx, move |ctx| {
            worker::run_encoder(ctx, keyframe_interval)
        })?);

        let ctx = worker_context("sender", &shutdown);
        pipeline
            .media_workers
            .push(spawn_worker(ctx, worker::run_sender)?);

        tracing::info!(
            poll_interval = ?poll_interval,
            keyframe_interval = keyframe_interval,
            "Pipeline started"
        );

        Ok(pipeline)
    }

    /// Snapshot of the worker counters
    pub fn stats(&self) -> PipelineStats {
        self.counters.snapshot()
    }

    /// Check if any worker is still running
    pub fn is_running(&self) -> bool {
        self.media_workers
            .iter()
            .chain(self.log_worker.iter())
            .any(|w| !w.is_finished())
    }

    /// Stop all workers, wait for them, and return the final counters
    pub fn shutdown(mut self) -> PipelineStats {
        self.stop_and_join();
        self.stats()
    }

    fn stop_and_join(&mut self) {
        if self.media_workers.is_empty() && self.log_worker.is_none() {
            return;
        }

        self.shutdown.store(true, Ordering::Release);
        for handle in self.media_workers.drain(..) {
            join_worker(handle);
        }

        // Media workers are gone, so nothing else can enqueue pipeline logs
        self.log_shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.log_worker.take() {
            join_worker(handle);
        }

        let stats = self.stats();
        tracing::info!(
            frames_encoded = stats.frames_encoded,
            frames_sent = stats.frames_sent,
            logs_emitted = stats.logs_emitted,
            "Pipeline stopped"
        );
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn spawn_worker<F>(ctx: WorkerContext, run: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce(WorkerContext) + Send + 'static,
{
    thread::Builder::new()
        .name(ctx.name.to_string())
        .spawn(move || run(ctx))
}

fn join_worker(handle: JoinHandle<()>) {
    let name = handle.thread().name().unwrap_or("<unnamed>").to_string();
    if handle.join().is_err() {
        tracing::error!(worker = %name, "Pipeline worker panicked");
    }
}
