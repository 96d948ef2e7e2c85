//! Encoded frame types
//!
//! A [`Frame`] is one unit of encoder output on its way to the network
//! sender.

use bytes::Bytes;

/// Type of encoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Video bitstream unit
    Video,
    /// Audio bitstream unit
    Audio,
}

/// An encoded bitstream unit
///
/// This is designed to be cheap to clone due to `Bytes` reference counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Type of frame
    pub frame_type: FrameType,
    /// Presentation timestamp in milliseconds
    pub pts: u64,
    /// Decode timestamp in milliseconds
    pub dts: u64,
    /// Encoded data (zero-copy via reference counting)
    pub data: Bytes,
    /// Whether this is a keyframe (video only)
    pub is_keyframe: bool,
}

impl Frame {
    /// Create a video frame with `dts == pts`
    pub fn video(pts: u64, data: Bytes, is_keyframe: bool) -> Self {
        Self {
            frame_type: FrameType::Video,
            pts,
            dts: pts,
            data,
            is_keyframe,
        }
    }

    /// Create an audio frame
    pub fn audio(pts: u64, data: Bytes) -> Self {
        Self {
            frame_type: FrameType::Audio,
            pts,
            dts: pts,
            data,
            is_keyframe: false,
        }
    }

    /// Size of the encoded data in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
