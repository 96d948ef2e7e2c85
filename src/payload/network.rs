//! Network control parameters

use std::net::SocketAddr;

/// Control message for the network I/O thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkParameter {
    /// Start sending to a peer
    Connect(SocketAddr),
    /// Stop sending and drop the current peer
    Disconnect,
    /// Target bitrate in kbit/s
    Bitrate(u32),
    /// Target frame rate in frames per second
    FrameRate(u32),
}

impl NetworkParameter {
    /// Short name used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkParameter::Connect(_) => "connect",
            NetworkParameter::Disconnect => "disconnect",
            NetworkParameter::Bitrate(_) => "bitrate",
            NetworkParameter::FrameRate(_) => "frame_rate",
        }
    }
}

impl std::fmt::Display for NetworkParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkParameter::Connect(addr) => write!(f, "connect {}", addr),
            NetworkParameter::Disconnect => write!(f, "disconnect"),
            NetworkParameter::Bitrate(kbps) => write!(f, "bitrate {} kbit/s", kbps),
            NetworkParameter::FrameRate(fps) => write!(f, "frame rate {} fps", fps),
        }
    }
}
