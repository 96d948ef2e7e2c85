//! Shutdown-safe shared queues for a media pipeline
//!
//! Capture, encoder, network and logging threads exchange data through four
//! shared queues: raw YUV pictures, encoded frames, network parameters and
//! log messages. This crate owns those queues in a registry whose lifetime is
//! decoupled from the application objects that start and stop the threads,
//! so a worker that is still draining a queue during shutdown never sees it
//! freed underneath it.
//!
//! # Example
//!
//! ```no_run
//! use media_queues::payload::PicYuv;
//! use media_queues::pipeline::{Pipeline, PipelineConfig};
//! use media_queues::registry;
//!
//! let pipeline = Pipeline::start(registry::instance().handles(), PipelineConfig::default())?;
//!
//! // Capture thread
//! registry::instance()
//!     .picture_queue()
//!     .push(PicYuv::filled(640, 480, 0, 16, 128, 128))
//!     .ok();
//!
//! let stats = pipeline.shutdown();
//! println!("encoded {} frames", stats.frames_encoded);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod payload;
pub mod pipeline;
pub mod queue;
pub mod registry;
pub mod stats;

pub use payload::{Frame, FrameType, LogMessage, NetworkParameter, PicYuv};
pub use queue::{DataQueue, PushError, QueueConfig, QueueError};
pub use registry::{
    instance, EncodeQueue, LogQueue, NetworkParamQueue, QueueHandles, QueueRegistry,
    RegistryConfig, RegistryError, YuvQueue,
};
