//! Rate limiting middleware for the support API
//!
//! Fixed-window, in-memory limiter keyed by the client IP reported by the
//! reverse proxy (`x-real-ip`, then `x-forwarded-for`). The support ticket
//! endpoint allows a handful of submissions per hour per client; see
//! [`crate::config::RateLimitConfig`] for the knobs.
//!
//! # Example
//!
//! ```rust,no_run
//! use docsite::config::RateLimitConfig;
//! use docsite::middleware::RateLimit;
//! use axum::{Router, routing::post};
//!
//! let rate_limit = RateLimit::new(RateLimitConfig::default());
//! let app: Router = Router::new()
//!     .route("/api/ticket", post(|| async { "ok" }))
//!     .layer(axum::middleware::from_fn_with_state(
//!         rate_limit,
//!         RateLimit::middleware,
//!     ));
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

/// Per-client fixed-window counter
#[derive(Debug, Clone)]
struct WindowEntry {
    /// Requests seen in the current window
    count: u32,
    /// Window start time
    window_start: Instant,
}

type Store = Arc<RwLock<HashMap<String, WindowEntry>>>;

/// Rate limiting middleware state
#[derive(Clone)]
pub struct RateLimit {
    config: RateLimitConfig,
    store: Store,
}

impl RateLimit {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Middleware function enforcing the limit.
    ///
    /// Returns 429 Too Many Requests with a `Retry-After` header once a
    /// client exhausts its window.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Exceeded`] when the window limit is hit.
    pub async fn middleware(
        State(rate_limit): State<Self>,
        request: Request,
        next: Next,
    ) -> Result<Response, RateLimitError> {
        if !rate_limit.config.enabled {
            return Ok(next.run(request).await);
        }

        let key = client_key(&request);

        debug!(
            key = %key,
            limit = rate_limit.config.max_requests,
            path = %request.uri().path(),
            "Checking rate limit"
        );

        rate_limit.check(&key).await?;

        Ok(next.run(request).await)
    }

    /// Count one request against a key
    async fn check(&self, key: &str) -> Result<(), RateLimitError> {
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_secs);

        let mut store = self.store.write().await;
        let entry = store.entry(key.to_string()).or_insert_with(|| WindowEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= window {
            entry.count = 1;
            entry.window_start = now;
        } else {
            entry.count += 1;
        }

        let count = entry.count;
        drop(store);

        if count > self.config.max_requests {
            warn!(
                key = %key,
                count = count,
                limit = self.config.max_requests,
                window_secs = self.config.window_secs,
                "Rate limit exceeded"
            );
            return Err(RateLimitError::Exceeded {
                limit: self.config.max_requests,
                window,
            });
        }

        Ok(())
    }

    /// Drop entries whose window has elapsed. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_secs);

        let removed = {
            let mut store = self.store.write().await;
            let before = store.len();
            store.retain(|_, entry| now.duration_since(entry.window_start) < window);
            before - store.len()
        };

        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired rate limit entries");
        }

        removed
    }
}

/// Client key derived from proxy headers, matching the deployment where a
/// reverse proxy fronts this service. Missing headers collapse to a shared
/// empty key.
fn client_key(request: &Request) -> String {
    for header in ["x-real-ip", "x-forwarded-for"] {
        if let Some(value) = request.headers().get(header) {
            if let Ok(value) = value.to_str() {
                return value.to_string();
            }
        }
    }
    String::new()
}

/// Rate limit errors
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Window limit hit
    #[error("Rate limit exceeded: {limit} requests per {window:?}")]
    Exceeded {
        /// Maximum requests allowed
        limit: u32,
        /// Window length
        window: Duration,
    },
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        match self {
            Self::Exceeded { limit, window } => (
                StatusCode::TOO_MANY_REQUESTS,
                [
                    ("Retry-After", window.as_secs().to_string()),
                    ("X-RateLimit-Limit", limit.to_string()),
                ],
                format!(
                    "Rate limit exceeded. Maximum {} requests per {} seconds.",
                    limit,
                    window.as_secs()
                ),
            )
                .into_response(),
        }
    }
}
