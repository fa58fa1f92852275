//! HTTP handlers for the FAQ API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::faq::{DeletedFaq, Faq, FaqError, FaqService, FaqView};

/// Query string of `GET /faqs`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub lang: Option<String>,
}

/// Body of `POST /faqs`. Missing fields are reported as validation errors.
#[derive(Debug, Deserialize)]
pub struct CreateFaqRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl IntoResponse for FaqError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FaqError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            FaqError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            FaqError::Internal(e) => {
                error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// `GET /faqs?lang=<tag>`
pub async fn list_faqs(
    State(service): State<FaqService>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<FaqView>>, FaqError> {
    let faqs = service.list_faqs(params.lang.as_deref()).await?;
    Ok(Json(faqs))
}

/// `POST /faqs`
pub async fn create_faq(
    State(service): State<FaqService>,
    payload: Result<Json<CreateFaqRequest>, JsonRejection>,
) -> Result<Json<Faq>, FaqError> {
    let Json(body) = payload.map_err(|e| FaqError::validation(e.body_text()))?;

    let faq = service
        .create_faq(
            body.question.as_deref().unwrap_or_default(),
            body.answer.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(faq))
}

/// `DELETE /faqs/:id`
pub async fn delete_faq(
    State(service): State<FaqService>,
    Path(id): Path<String>,
) -> Result<Json<DeletedFaq>, FaqError> {
    let deleted = service.delete_faq(&id).await?;
    Ok(Json(deleted))
}
