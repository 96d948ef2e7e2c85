//! Process-wide registry instance
//!
//! The global registry lives in a `static`, which Rust never drops. Once
//! constructed it is reachable from every thread until the process exits, so
//! no teardown of application objects can leave a running worker holding a
//! dangling queue. `OnceLock` makes the first construction atomic: racing
//! callers block until the single winner has finished and then all observe
//! the same registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use super::config::RegistryConfig;
use super::error::RegistryError;
use super::store::QueueRegistry;

static GLOBAL_REGISTRY: OnceLock<QueueRegistry> = OnceLock::new();

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

fn construct(config: RegistryConfig) -> QueueRegistry {
    CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
    let registry = QueueRegistry::with_config(config);

    tracing::info!(
        thread = std::thread::current().name().unwrap_or("<unnamed>"),
        "Global queue registry initialized"
    );

    registry
}

/// Get the global queue registry
///
/// Constructed with [`RegistryConfig::default`] on the first call from any
/// thread, unless [`init_with`] ran first.
///
/// # Example
///
/// ```
/// use media_queues::registry::instance;
/// use media_queues::payload::LogMessage;
///
/// instance().log_queue().push(LogMessage::info("capture", "started")).unwrap();
/// let msg = instance().log_queue().pop().unwrap();
/// assert_eq!(msg.message, "started");
/// ```
pub fn instance() -> &'static QueueRegistry {
    GLOBAL_REGISTRY.get_or_init(|| construct(RegistryConfig::default()))
}

/// Construct the global registry with a custom configuration
///
/// Must run before any call to [`instance`]. Returns
/// [`RegistryError::AlreadyInitialized`] if the registry already exists.
pub fn init_with(config: RegistryConfig) -> Result<&'static QueueRegistry, RegistryError> {
    let mut constructed = false;
    let registry = GLOBAL_REGISTRY.get_or_init(|| {
        constructed = true;
        construct(config)
    });

    if constructed {
        Ok(registry)
    } else {
        Err(RegistryError::AlreadyInitialized)
    }
}

/// Get the global registry if it has been constructed
pub fn try_instance() -> Option<&'static QueueRegistry> {
    GLOBAL_REGISTRY.get()
}

/// Number of times the global registry has been constructed (0 or 1)
///
/// Diagnostic only: lets tests confirm that racing first calls built a
/// single registry.
#[doc(hidden)]
pub fn global_constructions() -> usize {
    CONSTRUCTIONS.load(Ordering::SeqCst)
}
