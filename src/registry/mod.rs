//! Lifetime-extending registry of the shared pipeline queues
//!
//! Four queues connect the pipeline threads: raw pictures, encoded frames,
//! network parameters and log messages. Worker threads may still be
//! draining these queues while the application object that started them is
//! being torn down, so the queues must not be owned by that object.
//!
//! # Architecture
//!
//! ```text
//!          static GLOBAL_REGISTRY: OnceLock<QueueRegistry>
//!              ┌─────────────────────────────────┐
//!              │ picture: Arc<YuvQueue>          │
//!              │ encode:  Arc<EncodeQueue>       │
//!              │ network: Arc<NetworkParamQueue> │
//!              │ log:     Arc<LogQueue>          │
//!              └────────────────┬────────────────┘
//!                               │ handles()
//!         ┌─────────────────────┼──────────────────────┐
//!         ▼                     ▼                      ▼
//!    [Encoder]              [Sender]               [Log sink]
//!    picture.pop()          encode.pop()           log.pop()
//!    encode.push()          network.try_pop()      emit()
//! ```
//!
//! Two ways to reach the queues:
//!
//! - [`instance()`] returns the process-wide registry. It is a `static` that
//!   is never dropped, so any thread can call it at any point until the
//!   process exits.
//! - [`QueueRegistry::handles`] clones strong `Arc` handles that a worker
//!   carries in its entry context. The last handle to go frees the queue, so
//!   a scoped registry can be dropped while its workers are still running.

pub mod config;
pub mod error;
pub mod global;
pub mod handles;
pub mod store;

use crate::payload::{Frame, LogMessage, NetworkParameter, PicYuv};
use crate::queue::DataQueue;

/// Queue of raw pictures
pub type YuvQueue = DataQueue<PicYuv>;
/// Queue of encoded frames
pub type EncodeQueue = DataQueue<Frame>;
/// Queue of network control parameters
pub type NetworkParamQueue = DataQueue<NetworkParameter>;
/// Queue of log messages
pub type LogQueue = DataQueue<LogMessage>;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use global::{global_constructions, init_with, instance, try_instance};
pub use handles::QueueHandles;
pub use store::QueueRegistry;
