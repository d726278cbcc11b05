// Logging facade over tracing with DEBUG/INFO/WARN/ERROR levels.
// Modules call these helpers instead of the tracing macros directly so the
// level switch stays in one place.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Install the stderr subscriber. Safe to call more than once (tests);
// only the first call installs anything.
pub fn init(debug: bool) {
    DEBUG_ENABLED.store(debug, Ordering::Relaxed);

    let level = if debug { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// Returns true if debug logging is enabled.
pub fn is_debug() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

pub fn debug(msg: &str) {
    tracing::debug!("{}", msg);
}

pub fn info(msg: &str) {
    tracing::info!("{}", msg);
}

pub fn warn(msg: &str) {
    tracing::warn!("{}", msg);
}

pub fn error(msg: &str) {
    tracing::error!("{}", msg);
}
