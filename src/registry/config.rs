//! Registry configuration

use crate::queue::QueueConfig;

/// Configuration for the four registry queues
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Raw picture queue
    pub picture: QueueConfig,
    /// Encoded frame queue
    pub encode: QueueConfig,
    /// Network parameter queue
    pub network: QueueConfig,
    /// Log message queue
    pub log: QueueConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            // A few seconds of video at typical frame rates
            picture: QueueConfig::default().warn_depth(120),
            encode: QueueConfig::default().warn_depth(240),
            network: QueueConfig::default(),
            log: QueueConfig::default().warn_depth(4096),
        }
    }
}

impl RegistryConfig {
    /// Set the raw picture queue configuration
    pub fn picture(mut self, config: QueueConfig) -> Self {
        self.picture = config;
        self
    }

    /// Set the encoded frame queue configuration
    pub fn encode(mut self, config: QueueConfig) -> Self {
        self.encode = config;
        self
    }

    /// Set the network parameter queue configuration
    pub fn network(mut self, config: QueueConfig) -> Self {
        self.network = config;
        self
    }

    /// Set the log message queue configuration
    pub fn log(mut self, config: QueueConfig) -> Self {
        self.log = config;
        self
    }

    /// Disable depth warnings on every queue
    pub fn quiet(self) -> Self {
        Self {
            picture: self.picture.no_warn_depth(),
            encode: self.encode.no_warn_depth(),
            network: self.network.no_warn_depth(),
            log: self.log.no_warn_depth(),
        }
    }
}
