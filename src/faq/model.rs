//! FAQ domain types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language every FAQ is authored in.
pub const BASELINE_LANG: &str = "en";

/// Identifier of a FAQ record.
///
/// Wraps a MongoDB ObjectId and travels as its 24-char hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaqId(ObjectId);

impl FaqId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the hex form. Returns `None` for anything that is not a valid ObjectId.
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for FaqId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for FaqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for FaqId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for FaqId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FaqId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid FAQ id: {raw}")))
    }
}

/// A question/answer pair in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub question: String,
    pub answer: String,
}

/// A persisted FAQ record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: FaqId,

    /// Question text (English)
    pub question: String,

    /// Answer as rich text / HTML (English)
    pub answer: String,

    /// Language tag -> translated pair. Always holds `en`.
    #[serde(default)]
    pub translations: BTreeMap<String, Translation>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A FAQ about to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub translations: BTreeMap<String, Translation>,
}

impl NewFaq {
    /// Create a new FAQ whose translation map mirrors the baseline text.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into();
        let answer = answer.into();

        let mut translations = BTreeMap::new();
        translations.insert(
            BASELINE_LANG.to_string(),
            Translation {
                question: question.clone(),
                answer: answer.clone(),
            },
        );

        Self {
            question,
            answer,
            translations,
        }
    }
}

/// One entry of a rendered listing, as cached and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FaqId>,
}

impl FaqView {
    /// Baseline text without id.
    pub fn baseline(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            id: None,
        }
    }

    /// Baseline text tagged with the record id.
    pub fn with_id(faq: &Faq) -> Self {
        Self {
            id: Some(faq.id),
            ..Self::baseline(faq)
        }
    }

    /// Translated text tagged with the record id.
    pub fn translated(id: FaqId, translation: &Translation) -> Self {
        Self {
            question: translation.question.clone(),
            answer: translation.answer.clone(),
            id: Some(id),
        }
    }
}

/// Result of a successful delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedFaq {
    pub message: String,
    #[serde(rename = "deletedFAQ")]
    pub deleted_faq: Faq,
}
