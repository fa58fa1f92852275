//! Database model exports.

pub mod db_faq;

pub use db_faq::DbFaq;
