//! Repository module - MongoDB data access layer.

mod faq_repository;

pub use faq_repository::FaqRepository;
