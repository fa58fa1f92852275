//! Record store contract.

use anyhow::Result;
use async_trait::async_trait;

use crate::faq::{Faq, FaqId, NewFaq, Translation};

/// Durable keyed storage of FAQ records.
///
/// The store is the system of record. Implementations must be safe to call
/// concurrently at the granularity of a single operation.
#[async_trait]
pub trait FaqStore: Send + Sync {
    /// Insert a record, assigning its id and timestamps.
    async fn insert(&self, faq: NewFaq) -> Result<Faq>;

    /// Load every record in insertion order.
    async fn find_all(&self) -> Result<Vec<Faq>>;

    /// Patch the nested `translations.<lang>` field of one record.
    ///
    /// Sibling languages and baseline fields are left untouched. Patching a
    /// missing record is a no-op.
    async fn set_translation(&self, id: &FaqId, lang: &str, translation: &Translation)
    -> Result<()>;

    /// Delete a record, returning it if it existed.
    async fn delete(&self, id: &FaqId) -> Result<Option<Faq>>;
}
