//! Route table.

use axum::Router;
use axum::routing::{delete, get};
use tower_http::cors::CorsLayer;

use super::handlers::{create_faq, delete_faq, list_faqs};
use crate::faq::FaqService;

fn faq_routes() -> Router<FaqService> {
    Router::new()
        .route("/faqs", get(list_faqs).post(create_faq))
        .route("/faqs/:id", delete(delete_faq))
}

/// Build the application router.
///
/// Routes are served at the root and again under `/api`.
pub fn router(service: FaqService) -> Router {
    Router::new()
        .merge(faq_routes())
        .nest("/api", faq_routes())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
