//! Per-queue configuration

/// Queue configuration options
#[derive(Debug, Clone, Default)]
pub struct QueueConfig {
    /// Depth at which a warning is logged (None = never)
    ///
    /// Purely diagnostic: pushes are never refused or delayed.
    pub warn_depth: Option<usize>,
}

impl QueueConfig {
    /// Set the warning depth
    pub fn warn_depth(mut self, depth: usize) -> Self {
        self.warn_depth = Some(depth.max(1));
        self
    }

    /// Disable depth warnings
    pub fn no_warn_depth(mut self) -> Self {
        self.warn_depth = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueueConfig::default();

        assert_eq!(config.warn_depth, None);
    }

    #[test]
    fn test_builder_warn_depth() {
        let config = QueueConfig::default().warn_depth(64);

        assert_eq!(config.warn_depth, Some(64));
    }

    #[test]
    fn test_builder_warn_depth_floor() {
        // Zero would warn on every push into an empty queue
        let config = QueueConfig::default().warn_depth(0);

        assert_eq!(config.warn_depth, Some(1));
    }

    #[test]
    fn test_builder_no_warn_depth() {
        let config = QueueConfig::default().warn_depth(8).no_warn_depth();

        assert_eq!(config.warn_depth, None);
    }
}
