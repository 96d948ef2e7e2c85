//! Strong handles to the registry queues
//!
//! [`QueueHandles`] is what a worker thread should carry in its entry
//! context: each field is an `Arc`, so the queues stay alive until the last
//! worker holding them drops its handles, regardless of what happens to the
//! registry or the object that spawned the worker.

use std::sync::Arc;

use super::{EncodeQueue, LogQueue, NetworkParamQueue, YuvQueue};

/// Cloneable bundle of the four shared queues
#[derive(Debug, Clone)]
pub struct QueueHandles {
    /// Raw pictures from capture/decode
    pub picture: Arc<YuvQueue>,
    /// Encoded frames from the encoder
    pub encode: Arc<EncodeQueue>,
    /// Network control parameters
    pub network: Arc<NetworkParamQueue>,
    /// Log messages for the log sink
    pub log: Arc<LogQueue>,
}

impl QueueHandles {
    /// Check if both bundles refer to the same four queues
    pub fn same_queues(&self, other: &QueueHandles) -> bool {
        Arc::ptr_eq(&self.picture, &other.picture)
            && Arc::ptr_eq(&self.encode, &other.encode)
            && Arc::ptr_eq(&self.network, &other.network)
            && Arc::ptr_eq(&self.log, &other.log)
    }
}
