//! FAQ repository backed by MongoDB.
//!
//! Translations are merged with targeted `$set` updates on
//! `translations.<lang>` so concurrent writers never clobber each other.

use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{self, DateTime, Document, doc};
use tracing::debug;

use crate::database::models::DbFaq;
use crate::database::{Database, FaqStore};
use crate::faq::{Faq, FaqId, NewFaq, Translation};

/// Repository for FAQ documents.
#[derive(Debug, Clone)]
pub struct FaqRepository {
    collection: Collection<DbFaq>,
}

impl FaqRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("faqs"),
        }
    }
}

/// Build the update document that patches one language entry.
fn translation_patch(lang: &str, translation: &Translation) -> Result<Document> {
    let mut set = Document::new();
    set.insert(format!("translations.{lang}"), bson::to_bson(translation)?);
    set.insert("updatedAt", DateTime::now());
    Ok(doc! { "$set": set })
}

#[async_trait]
impl FaqStore for FaqRepository {
    async fn insert(&self, faq: NewFaq) -> Result<Faq> {
        let doc = DbFaq::new(faq);
        self.collection.insert_one(&doc).await?;

        debug!("Inserted FAQ {}", doc.id);
        Ok(doc.into())
    }

    async fn find_all(&self) -> Result<Vec<Faq>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;

        let docs: Vec<DbFaq> = cursor.try_collect().await?;
        debug!("Loaded {} FAQs", docs.len());
        Ok(docs.into_iter().map(Faq::from).collect())
    }

    async fn set_translation(
        &self,
        id: &FaqId,
        lang: &str,
        translation: &Translation,
    ) -> Result<()> {
        let filter = doc! { "_id": id.object_id() };
        let update = translation_patch(lang, translation)?;

        let result = self.collection.update_one(filter, update).await?;
        debug!(
            "Saved '{}' translation for FAQ {} (matched: {})",
            lang, id, result.matched_count
        );
        Ok(())
    }

    async fn delete(&self, id: &FaqId) -> Result<Option<Faq>> {
        let filter = doc! { "_id": id.object_id() };
        let deleted = self.collection.find_one_and_delete(filter).await?;
        Ok(deleted.map(Faq::from))
    }
}
