//! HTTP handlers and router assembly

pub mod docs;
pub mod gallery;

use askama::Template;
use axum::http::{HeaderValue, Method};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::SiteError;
use crate::middleware::RateLimit;
use crate::state::SiteState;
use crate::support;

/// Render an Askama template into an HTML response
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, SiteError> {
    Ok(Html(template.render()?))
}

/// Build the complete application router.
///
/// Must be called within a tokio runtime; spawns the rate limiter's
/// cleanup task.
#[must_use]
pub fn router(state: SiteState) -> Router {
    let rate_limit = RateLimit::new(state.config.rate_limit.clone());

    // Expired windows would otherwise accumulate per client IP.
    let janitor = rate_limit.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            interval.tick().await;
            janitor.cleanup_expired().await;
        }
    });

    let origins: Vec<HeaderValue> = state
        .config
        .support
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST]);

    let api = Router::new()
        .route("/api/ticket", post(support::submit_ticket))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            RateLimit::middleware,
        ))
        .layer(cors);

    Router::new()
        .route("/", get(|| async { Redirect::permanent("/docs") }))
        .route("/docs", get(docs::docs_page))
        .route("/docs/{*path}", get(docs::docs_page))
        .route("/templates", get(gallery::gallery_page))
        .route("/templates/{slug}", get(gallery::template_detail))
        .route("/health", get(support::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
