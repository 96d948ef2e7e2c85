//! Pipeline worker loops
//!
//! Each loop pops with `pop_timeout` so it can notice the shutdown flag, and
//! exits early if its input queue is closed.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;

use tracing::Level;

use crate::payload::{Frame, NetworkParameter};
use crate::queue::QueueError;

use super::context::WorkerContext;

/// Stand-in encoder: turns each picture into a video frame carrying its luma
/// plane
pub(super) fn run_encoder(ctx: WorkerContext, keyframe_interval: u64) {
    tracing::debug!(worker = ctx.name, "Encoder started");
    let mut index: u64 = 0;

    while !ctx.should_stop() {
        let pic = match ctx.handles.picture.pop_timeout(ctx.poll_interval) {
            Ok(pic) => pic,
            Err(QueueError::Closed) => break,
            Err(QueueError::Empty | QueueError::Timeout) => continue,
        };

        let Some(luma) = pic.y().filter(|_| pic.is_valid()) else {
            ctx.counters.dropped_pictures.fetch_add(1, Ordering::Relaxed);
            ctx.log(
                Level::WARN,
                format!(
                    "dropping malformed {}x{} picture at pts {}",
                    pic.width, pic.height, pic.pts
                ),
            );
            continue;
        };

        let frame = Frame::video(pic.pts, luma, index % keyframe_interval == 0);
        index += 1;

        if ctx.handles.encode.push(frame).is_err() {
            break;
        }
        ctx.counters.frames_encoded.fetch_add(1, Ordering::Relaxed);
    }

    tracing::debug!(worker = ctx.name, encoded = index, "Encoder stopped");
}

#[derive(Debug, Default)]
struct SenderState {
    peer: Option<SocketAddr>,
    bitrate_kbps: Option<u32>,
    frame_rate: Option<u32>,
}

impl SenderState {
    fn apply(&mut self, param: NetworkParameter) {
        match param {
            NetworkParameter::Connect(addr) => self.peer = Some(addr),
            NetworkParameter::Disconnect => self.peer = None,
            NetworkParameter::Bitrate(kbps) => self.bitrate_kbps = Some(kbps),
            NetworkParameter::FrameRate(fps) => self.frame_rate = Some(fps),
        }
    }
}

/// Network sender: applies pending parameters, then consumes encoded frames
pub(super) fn run_sender(ctx: WorkerContext) {
    tracing::debug!(worker = ctx.name, "Sender started");
    let mut state = SenderState::default();

    while !ctx.should_stop() {
        while let Ok(param) = ctx.handles.network.try_pop() {
            tracing::debug!(
                worker = ctx.name,
                kind = param.kind(),
                param = %param,
                "Network parameter applied"
            );
            state.apply(param);
            ctx.counters.params_applied.fetch_add(1, Ordering::Relaxed);
        }

        match ctx.handles.encode.pop_timeout(ctx.poll_interval) {
            Ok(frame) => {
                ctx.counters.frames_sent.fetch_add(1, Ordering::Relaxed);
                ctx.counters
                    .bytes_sent
                    .fetch_add(frame.len() as u64, Ordering::Relaxed);
            }
            Err(QueueError::Closed) => break,
            Err(QueueError::Empty | QueueError::Timeout) => {}
        }
    }

    tracing::debug!(
        worker = ctx.name,
        peer = ?state.peer,
        bitrate_kbps = ?state.bitrate_kbps,
        frame_rate = ?state.frame_rate,
        "Sender stopped"
    );
}

/// Log sink: forwards queued log messages to tracing
///
/// On shutdown, whatever is still queued is flushed before returning.
pub(super) fn run_log_sink(ctx: WorkerContext) {
    while !ctx.should_stop() {
        match ctx.handles.log.pop_timeout(ctx.poll_interval) {
            Ok(msg) => {
                msg.emit();
                ctx.counters.logs_emitted.fetch_add(1, Ordering::Relaxed);
            }
            Err(QueueError::Closed) => break,
            Err(QueueError::Empty | QueueError::Timeout) => {}
        }
    }

    for msg in ctx.handles.log.drain() {
        msg.emit();
        ctx.counters.logs_emitted.fetch_add(1, Ordering::Relaxed);
    }
}
