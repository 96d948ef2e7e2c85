//! Payload records carried by the shared queues
//!
//! This module provides:
//! - Raw I420 pictures from capture/decode
//! - Encoded frames from the encoder
//! - Network control parameters
//! - Log messages routed to the log sink thread
//!
//! Media payloads hold their data in `bytes::Bytes`, so moving them between
//! queues and cloning them only bumps a reference count.

pub mod frame;
pub mod log;
pub mod network;
pub mod yuv;

pub use frame::{Frame, FrameType};
pub use log::LogMessage;
pub use network::NetworkParameter;
pub use yuv::PicYuv;
