//! In-memory record store for local runs without MongoDB.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;

use super::FaqStore;
use crate::faq::{Faq, FaqId, NewFaq, Translation};

/// Record store kept in a vector, preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryFaqStore {
    faqs: RwLock<Vec<Faq>>,
}

impl MemoryFaqStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FaqStore for MemoryFaqStore {
    async fn insert(&self, faq: NewFaq) -> Result<Faq> {
        let now = Utc::now();
        let faq = Faq {
            id: FaqId::generate(),
            question: faq.question,
            answer: faq.answer,
            translations: faq.translations,
            created_at: now,
            updated_at: now,
        };

        self.faqs.write().push(faq.clone());
        debug!("Inserted FAQ {} in memory", faq.id);
        Ok(faq)
    }

    async fn find_all(&self) -> Result<Vec<Faq>> {
        Ok(self.faqs.read().clone())
    }

    async fn set_translation(
        &self,
        id: &FaqId,
        lang: &str,
        translation: &Translation,
    ) -> Result<()> {
        let mut faqs = self.faqs.write();
        if let Some(faq) = faqs.iter_mut().find(|f| f.id == *id) {
            faq.translations
                .insert(lang.to_string(), translation.clone());
            faq.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: &FaqId) -> Result<Option<Faq>> {
        let mut faqs = self.faqs.write();
        let removed = faqs
            .iter()
            .position(|f| f.id == *id)
            .map(|index| faqs.remove(index));
        Ok(removed)
    }
}
