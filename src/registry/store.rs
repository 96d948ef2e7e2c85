//! Queue registry implementation
//!
//! The arena that owns the four shared queues.

use std::sync::Arc;

use crate::stats::RegistryStats;

use super::config::RegistryConfig;
use super::handles::QueueHandles;
use super::{EncodeQueue, LogQueue, NetworkParamQueue, YuvQueue};

/// Owner of the four shared pipeline queues
///
/// All four queues are allocated together in the constructor and are never
/// replaced. Each is held by `Arc`, so a queue is freed only when the
/// registry and every handle cloned out of it are gone.
pub struct QueueRegistry {
    picture: Arc<YuvQueue>,
    encode: Arc<EncodeQueue>,
    network: Arc<NetworkParamQueue>,
    log: Arc<LogQueue>,
}

impl QueueRegistry {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        let registry = Self {
            picture: Arc::new(YuvQueue::with_config("picture", config.picture)),
            encode: Arc::new(EncodeQueue::with_config("encode", config.encode)),
            network: Arc::new(NetworkParamQueue::with_config("network", config.network)),
            log: Arc::new(LogQueue::with_config("log", config.log)),
        };

        tracing::debug!("Queue registry created");

        registry
    }

    /// Raw picture queue
    pub fn picture_queue(&self) -> &YuvQueue {
        &self.picture
    }

    /// Encoded frame queue
    pub fn encode_queue(&self) -> &EncodeQueue {
        &self.encode
    }

    /// Network parameter queue
    pub fn network_queue(&self) -> &NetworkParamQueue {
        &self.network
    }

    /// Log message queue
    pub fn log_queue(&self) -> &LogQueue {
        &self.log
    }

    /// Strong handle to the raw picture queue
    pub fn picture_handle(&self) -> Arc<YuvQueue> {
        Arc::clone(&self.picture)
    }

    /// Strong handle to the encoded frame queue
    pub fn encode_handle(&self) -> Arc<EncodeQueue> {
        Arc::clone(&self.encode)
    }

    /// Strong handle to the network parameter queue
    pub fn network_handle(&self) -> Arc<NetworkParamQueue> {
        Arc::clone(&self.network)
    }

    /// Strong handle to the log message queue
    pub fn log_handle(&self) -> Arc<LogQueue> {
        Arc::clone(&self.log)
    }

    /// Strong handles to all four queues, for a worker's entry context
    pub fn handles(&self) -> QueueHandles {
        QueueHandles {
            picture: self.picture_handle(),
            encode: self.encode_handle(),
            network: self.network_handle(),
            log: self.log_handle(),
        }
    }

    /// Close all four queues
    ///
    /// Blocked consumers wake up and drain what is left. The queues
    /// themselves stay allocated and reachable.
    pub fn close_all(&self) {
        self.picture.close();
        self.encode.close();
        self.network.close();
        self.log.close();

        tracing::info!("All registry queues closed");
    }

    /// Snapshot of all four queues
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            picture: self.picture.stats(),
            encode: self.encode.stats(),
            network: self.network.stats(),
            log: self.log.stats(),
        }
    }
}

impl Default for QueueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueueRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueRegistry")
            .field("picture", &self.picture)
            .field("encode", &self.encode)
            .field("network", &self.network)
            .field("log", &self.log)
            .finish()
    }
}

impl Drop for QueueRegistry {
    fn drop(&mut self) {
        // Outstanding handles keep their queues alive past this point
        tracing::debug!(
            queued = self.stats().total_depth(),
            picture_refs = Arc::strong_count(&self.picture) - 1,
            encode_refs = Arc::strong_count(&self.encode) - 1,
            network_refs = Arc::strong_count(&self.network) - 1,
            log_refs = Arc::strong_count(&self.log) - 1,
            "Queue registry released"
        );
    }
}
