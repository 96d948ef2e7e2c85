//! Statistics snapshots for queues, the registry and the pipeline

pub mod metrics;

pub use metrics::{PipelineStats, QueueStats, RegistryStats};
