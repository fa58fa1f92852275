//! Translation module.
//!
//! - `Translator` - adapter trait for translation backends
//! - `GoogleTranslator` - HTTP backend
//! - `TranslatorGateway` - what the FAQ service calls; failures become `None`

mod error;
mod google;
mod rich_text;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

pub use error::TranslateError;
pub use google::GoogleTranslator;
pub use rich_text::translate_rich_text;

/// Translator trait (adapter for different backends).
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate plain `text` into the language tagged `to`.
    async fn translate(&self, text: &str, to: &str) -> Result<String, TranslateError>;
}

/// Gateway between the FAQ service and a translation backend.
///
/// Never fails: a failed translation is logged and reported as `None`.
#[derive(Clone)]
pub struct TranslatorGateway {
    translator: Arc<dyn Translator>,
}

impl TranslatorGateway {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translate a plain-text question.
    pub async fn translate_question(&self, text: &str, lang: &str) -> Option<String> {
        match self.translator.translate(text, lang).await {
            Ok(translated) => Some(translated),
            Err(e) => {
                warn!("Question translation into '{}' failed: {}", lang, e);
                None
            }
        }
    }

    /// Translate a rich-text answer, keeping its markup.
    pub async fn translate_answer(&self, html: &str, lang: &str) -> Option<String> {
        match translate_rich_text(self.translator.as_ref(), html, lang).await {
            Ok(translated) => Some(translated),
            Err(e) => {
                warn!("Answer translation into '{}' failed: {}", lang, e);
                None
            }
        }
    }
}

impl std::fmt::Debug for TranslatorGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorGateway").finish_non_exhaustive()
    }
}
