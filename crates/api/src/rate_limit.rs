//! Rate Limiting Middleware
//!
//! IP-keyed request throttling using the Generic Cell Rate Algorithm via
//! tower_governor. Throttled callers receive a 429 with X-RateLimit-*
//! headers carrying the retry hint; the condition is transient, never fatal.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with rate-limit headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Token replenishment period in seconds
    pub per_second: u64,
    /// Requests that may be made immediately
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // Dashboards poll health/alerts and occasionally upload a dataset;
        // streaming itself rides a single upgraded connection.
        Self {
            per_second: 1,
            burst_size: 20,
        }
    }
}

impl RateLimitConfig {
    /// Tighter limits for expensive endpoints (batch analysis)
    pub fn strict() -> Self {
        Self {
            per_second: 5,
            burst_size: 3,
        }
    }
}

/// Build the governor config for [`tower_governor::GovernorLayer`].
///
/// Requires the service to be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer IP is
/// available for key extraction.
pub fn create_governor_config(config: &RateLimitConfig) -> Option<Arc<DefaultGovernorConfig>> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
}
