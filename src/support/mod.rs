//! Support ticket proxy
//!
//! Validates ticket submissions and forwards them to the Zendesk ticket API
//! under basic auth. Three outcomes are distinguished: validation failure
//! (rejected by [`crate::extractors::ValidatedForm`] before the handler
//! runs), upstream failure (generic 500), and success (upstream JSON body
//! passed through verbatim with 200). Also hosts the `/health` endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::config::SupportSettings;
use crate::extractors::ValidatedForm;
use crate::state::SiteState;

/// Ticket submission form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TicketForm {
    /// Requester name
    #[validate(length(min = 2))]
    pub name: Option<String>,

    /// Requester email
    #[validate(email)]
    pub email: String,

    /// Ticket subject line
    pub subject: String,

    /// Ticket body; short submissions are rejected outright
    #[validate(length(min = 30))]
    pub comment: String,
}

/// Zendesk ticket payload shape
#[derive(Debug, Serialize)]
struct TicketPayload {
    ticket: TicketBody,
}

#[derive(Debug, Serialize)]
struct TicketBody {
    subject: String,
    comment: CommentBody,
    requester: RequesterBody,
}

#[derive(Debug, Serialize)]
struct CommentBody {
    body: String,
}

#[derive(Debug, Serialize)]
struct RequesterBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
}

/// Zendesk API client
#[derive(Clone)]
pub struct ZendeskClient {
    http: reqwest::Client,
    hostname: String,
    auth_token: String,
}

impl ZendeskClient {
    /// Build a client from validated support settings
    #[must_use]
    pub fn new(settings: &SupportSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            hostname: settings.zendesk_hostname.clone(),
            auth_token: api_token(&settings.zendesk_email, &settings.zendesk_api_key),
        }
    }

    /// Forward a validated ticket to the Zendesk API.
    ///
    /// # Errors
    ///
    /// Returns the transport or decode error; the handler maps it to a
    /// generic 500.
    pub async fn create_ticket(&self, form: &TicketForm) -> Result<serde_json::Value, reqwest::Error> {
        let payload = TicketPayload {
            ticket: TicketBody {
                subject: form.subject.clone(),
                comment: CommentBody {
                    body: form.comment.clone(),
                },
                requester: RequesterBody {
                    name: form.name.clone(),
                    email: form.email.clone(),
                },
            },
        };

        let url = format!(
            "https://{}.zendesk.com/api/v2/tickets.json?async=true",
            self.hostname
        );

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", self.auth_token))
            .json(&payload)
            .send()
            .await?;

        response.json().await
    }
}

/// Basic-auth token for the Zendesk API: `base64("{email}/token:{key}")`
fn api_token(email: &str, api_key: &str) -> String {
    BASE64.encode(format!("{email}/token:{api_key}"))
}

/// `POST /api/ticket` — validate and forward a support ticket
pub async fn submit_ticket(
    State(state): State<SiteState>,
    ValidatedForm(form): ValidatedForm<TicketForm>,
) -> Response {
    match state.zendesk.create_ticket(&form).await {
        Ok(data) => (StatusCode::OK, Json(serde_json::json!({ "data": data }))).into_response(),
        Err(error) => {
            tracing::error!(error = %error, "Ticket forwarding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "message": "Oops! Failed for some reason..." })),
            )
                .into_response()
        }
    }
}

/// `GET /health` — process liveness with human-friendly uptime
pub async fn health(State(state): State<SiteState>) -> Response {
    let uptime = uptime_to_human_friendly(state.started_at.elapsed().as_secs());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "OK", "uptime": uptime })),
    )
        .into_response()
}

/// Render seconds of uptime as `"D Days H Hours M Minutes S Seconds"`
#[must_use]
pub fn uptime_to_human_friendly(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;
    format!("{days} Days {hours} Hours {minutes} Minutes {seconds} Seconds")
}
