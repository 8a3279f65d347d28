// Application state module
// Holds the immutable configuration and the precomputed mock payloads

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::api::mock::MockPayloads;

/// Application state
///
/// Everything here is fixed at startup: the demo has no mutable runtime
/// state beyond connection counters owned by the accept loop.
pub struct AppState {
    pub config: Config,

    // Cached config value for fast access in the request path
    pub cached_access_log: AtomicBool,

    // Mock JSON bodies, serialized once so every response is byte-identical
    pub mock: MockPayloads,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            cached_access_log: AtomicBool::new(config.logging.access_log),
            mock: MockPayloads::build(),
        }
    }
}
