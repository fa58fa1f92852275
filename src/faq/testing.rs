//! Test doubles for the FAQ service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::database::{FaqStore, MemoryFaqStore};
use crate::faq::{Faq, FaqId, NewFaq, Translation};
use crate::translate::{TranslateError, Translator};

/// Translator that prefixes text with the target tag, e.g. `[es] Hello`.
#[derive(Default)]
pub struct FakeTranslator {
    calls: AtomicUsize,
    failing: Vec<String>,
    delays: HashMap<String, Duration>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call whose text equals `text`.
    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.push(text.to_string());
        self
    }

    /// Delay every call whose text equals `text`.
    pub fn delaying(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, to: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.iter().any(|t| t == text) {
            return Err(TranslateError::Malformed(format!("cannot translate {text:?}")));
        }

        Ok(format!("[{to}] {text}"))
    }
}

/// Memory store that counts calls and can simulate an outage.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryFaqStore,
    pub reads: AtomicUsize,
    pub inserts: AtomicUsize,
    pub patches: AtomicUsize,
    pub deletes: AtomicUsize,
    pub unavailable: AtomicBool,
    patch_limit: Option<usize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept the first `limit` translation patches, fail every later one.
    /// Reads and other writes keep working.
    pub fn failing_patches_after(mut self, limit: usize) -> Self {
        self.patch_limit = Some(limit);
        self
    }

    /// Insert directly, bypassing the counters.
    pub async fn seed(&self, question: &str, answer: &str) -> Faq {
        self.inner
            .insert(NewFaq::new(question, answer))
            .await
            .unwrap()
    }

    pub async fn all(&self) -> Vec<Faq> {
        self.inner.find_all().await.unwrap()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl FaqStore for CountingStore {
    async fn insert(&self, faq: NewFaq) -> Result<Faq> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.insert(faq).await
    }

    async fn find_all(&self) -> Result<Vec<Faq>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_all().await
    }

    async fn set_translation(
        &self,
        id: &FaqId,
        lang: &str,
        translation: &Translation,
    ) -> Result<()> {
        let attempt = self.patches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.patch_limit.is_some_and(|limit| attempt >= limit) {
            bail!("write conflict on translations.{lang}");
        }
        self.inner.set_translation(id, lang, translation).await
    }

    async fn delete(&self, id: &FaqId) -> Result<Option<Faq>> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete(id).await
    }
}
