pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;

use fyyur_db::AppState;

use crate::error::RecordError;
use crate::flash;
use crate::forms::{Choices, FormErrors};

/// Every page carries the notifications pending for this client.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub messages: Vec<String>,
    #[serde(flatten)]
    pub content: T,
}

/// A create or edit form, with its choices when the form offers any.
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
    pub form: F,
}

/// Integer id from the route path. Anything else is an unknown page.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "rejected path id");
                ApiError::NotFound("Page not found".to_string())
            })?;
        Ok(Self(id))
    }
}

/// Render `content`, draining pending notifications.
pub fn page<T: Serialize>(
    state: &AppState,
    jar: CookieJar,
    content: T,
) -> (CookieJar, Json<Page<T>>) {
    let (jar, messages) = flash::take(jar, &state.secret_key);
    (jar, Json(Page { messages, content }))
}

/// Queue `message` and send the client to `to`.
pub fn redirect_with_flash(
    state: &AppState,
    jar: CookieJar,
    to: &str,
    message: impl Into<String>,
) -> (CookieJar, Redirect) {
    (flash::push(jar, &state.secret_key, message), Redirect::to(to))
}

#[derive(Debug)]
pub enum ApiError {
    /// Rejected submission, echoed back with its errors.
    Invalid {
        messages: Vec<String>,
        errors: FormErrors,
        form: serde_json::Value,
    },
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Map a failed write. `failure` is the user-facing message for storage errors.
    pub fn from_record<F: Serialize>(
        err: RecordError,
        entity: &str,
        failure: String,
        form: &F,
    ) -> Self {
        match err {
            RecordError::Validation(errors) => {
                let messages = errors
                    .first_messages()
                    .into_iter()
                    .map(|m| format!("{entity} not saved: {m}"))
                    .collect();
                ApiError::Invalid {
                    messages,
                    errors,
                    form: serde_json::to_value(form).unwrap_or_default(),
                }
            }
            RecordError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} {id} not found"))
            }
            RecordError::Database(e) => {
                tracing::error!(error = %e, "{failure}");
                ApiError::Internal(failure)
            }
        }
    }

    pub fn database(err: DbErr) -> Self {
        tracing::error!(error = %err, "database query failed");
        ApiError::Internal("An internal error occurred.".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid {
                messages,
                errors,
                form,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "validation failed",
                    "messages": messages,
                    "errors": errors,
                    "form": form,
                })),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".to_string())
}
