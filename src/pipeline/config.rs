//! Pipeline configuration

use std::time::Duration;

/// Shortest worker poll interval
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Longest worker poll interval; bounds how long shutdown waits on an idle
/// worker
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Pipeline configuration options
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How long workers wait on an empty queue before rechecking shutdown
    pub poll_interval: Duration,

    /// Every Nth encoded picture is marked as a keyframe
    pub keyframe_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            keyframe_interval: 30,
        }
    }
}

impl PipelineConfig {
    /// Set the worker poll interval, clamped to
    /// [`MIN_POLL_INTERVAL`]..=[`MAX_POLL_INTERVAL`]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_interval = self.effective_poll_interval();
        self
    }

    /// Poll interval the workers actually use
    pub fn effective_poll_interval(&self) -> Duration {
        self.poll_interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL)
    }

    /// Set the keyframe interval
    pub fn keyframe_interval(mut self, interval: u64) -> Self {
        self.keyframe_interval = interval.max(1);
        self
    }
}
