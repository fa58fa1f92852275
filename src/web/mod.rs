//! Web module - axum transport over the FAQ service.

mod handlers;
mod routes;

pub use routes::router;
