//! FAQ document model for the `faqs` collection.

use std::collections::BTreeMap;

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::faq::{Faq, NewFaq, Translation};

/// A single FAQ document (stored in `faqs` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbFaq {
    /// MongoDB document ID
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub question: String,

    /// Rich text answer
    pub answer: String,

    /// Language tag -> translated pair
    #[serde(default)]
    pub translations: BTreeMap<String, Translation>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl DbFaq {
    /// Build a document for a new FAQ with a fresh id and timestamps.
    pub fn new(faq: NewFaq) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            question: faq.question,
            answer: faq.answer,
            translations: faq.translations,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<DbFaq> for Faq {
    fn from(doc: DbFaq) -> Self {
        Self {
            id: doc.id.into(),
            question: doc.question,
            answer: doc.answer,
            translations: doc.translations,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}
