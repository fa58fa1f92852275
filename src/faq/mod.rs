//! FAQ domain: models, errors and the translation-aware service.

mod error;
mod model;
mod service;

#[cfg(test)]
pub mod testing;

pub use error::FaqError;
pub use model::{BASELINE_LANG, DeletedFaq, Faq, FaqId, FaqView, NewFaq, Translation};
pub use service::FaqService;
