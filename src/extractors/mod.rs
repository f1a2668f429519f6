//! Request extractors

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Form extractor that runs `validator` rules before the handler executes.
///
/// A payload that fails validation is rejected with 422 and a field-error
/// body; the handler body never runs for invalid input.
#[derive(Debug, Clone)]
pub struct ValidatedForm<T>(pub T);

/// Rejection for [`ValidatedForm`]
#[derive(Debug, thiserror::Error)]
pub enum ValidatedFormRejection {
    /// Body could not be parsed as a form
    #[error("Malformed form payload: {0}")]
    Form(#[from] FormRejection),

    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl IntoResponse for ValidatedFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Form(rejection) => rejection.into_response(),
            Self::Validation(errors) => {
                tracing::debug!(errors = %errors, "Rejected invalid form submission");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "errors": errors })),
                )
                    .into_response()
            }
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
