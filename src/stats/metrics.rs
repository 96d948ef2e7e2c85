//! Statistics and metrics for shared queues

/// Queue-level statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Queue name
    pub name: &'static str,
    /// Items currently queued
    pub depth: usize,
    /// Deepest the queue has been
    pub high_water: usize,
    /// Total items pushed
    pub pushed: u64,
    /// Total items popped or drained
    pub popped: u64,
    /// Whether the queue has been closed
    pub closed: bool,
}

/// Registry-wide statistics
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    /// Raw picture queue
    pub picture: QueueStats,
    /// Encoded frame queue
    pub encode: QueueStats,
    /// Network parameter queue
    pub network: QueueStats,
    /// Log message queue
    pub log: QueueStats,
}

impl RegistryStats {
    /// Iterate over the four queue snapshots
    pub fn iter(&self) -> impl Iterator<Item = &QueueStats> {
        [&self.picture, &self.encode, &self.network, &self.log].into_iter()
    }

    /// Total items queued across all four queues
    pub fn total_depth(&self) -> usize {
        self.iter().map(|s| s.depth).sum()
    }
}

/// Pipeline worker statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Pictures turned into encoded frames
    pub frames_encoded: u64,
    /// Encoded frames handed to the network sender
    pub frames_sent: u64,
    /// Bytes handed to the network sender
    pub bytes_sent: u64,
    /// Network parameters applied by the sender
    pub params_applied: u64,
    /// Log messages forwarded to tracing
    pub logs_emitted: u64,
    /// Pictures dropped because they were malformed
    pub dropped_pictures: u64,
}
