//! Queue error types
//!
//! Error types for push and pop operations on a [`DataQueue`](super::DataQueue).

/// Error returned by the pop family of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// No item is queued right now
    Empty,
    /// The queue was closed and every queued item has been consumed
    Closed,
    /// No item arrived before the deadline
    Timeout,
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::Empty => write!(f, "Queue is empty"),
            QueueError::Closed => write!(f, "Queue is closed"),
            QueueError::Timeout => write!(f, "Timed out waiting for an item"),
        }
    }
}

impl std::error::Error for QueueError {}

/// Error returned by `push` on a closed queue
///
/// Hands the rejected item back to the caller.
#[derive(PartialEq, Eq)]
pub struct PushError<T>(pub T);

impl<T> PushError<T> {
    /// Recover the item that could not be queued
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PushError(..)")
    }
}

impl<T> std::fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Push on a closed queue")
    }
}

impl<T> std::error::Error for PushError<T> {}
