//! FAQ service - cache-aside listing with lazy translation.
//!
//! Read path: `faqs:<lang>` cache → record store → translator. Newly
//! translated pairs are written back to the store one language at a time,
//! and the assembled non-English listing is cached with a TTL.
//!
//! Write path: creates and deletes go to the store, then patch the English
//! listing in place. Translated listings are never invalidated; they keep
//! showing deleted FAQs until they expire.

use std::sync::Arc;

use anyhow::Result;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::{BASELINE_LANG, DeletedFaq, Faq, FaqError, FaqId, FaqView, NewFaq, Translation};
use crate::cache::{ListingCache, listing_key};
use crate::database::FaqStore;
use crate::translate::TranslatorGateway;

/// Longest language tag accepted in a listing request.
const MAX_LANG_LEN: usize = 16;

/// Orchestrates store, listing cache and translator.
#[derive(Clone)]
pub struct FaqService {
    store: Arc<dyn FaqStore>,
    cache: Arc<dyn ListingCache>,
    translator: TranslatorGateway,
}

impl FaqService {
    pub fn new(
        store: Arc<dyn FaqStore>,
        cache: Arc<dyn ListingCache>,
        translator: TranslatorGateway,
    ) -> Self {
        Self {
            store,
            cache,
            translator,
        }
    }

    /// List every FAQ in `lang` (English when absent).
    ///
    /// # Errors
    /// `Validation` for a malformed tag, `Internal` when the store fails.
    pub async fn list_faqs(&self, lang: Option<&str>) -> Result<Vec<FaqView>, FaqError> {
        let lang = normalize_lang(lang)?;
        let key = listing_key(&lang);

        if let Some(views) = self.read_listing(&key).await {
            debug!("Listing {} served from cache ({} FAQs)", key, views.len());
            return Ok(views);
        }

        let faqs = self.store.find_all().await?;

        if lang == BASELINE_LANG {
            return Ok(faqs.iter().map(FaqView::baseline).collect());
        }

        let views = try_join_all(faqs.iter().map(|faq| self.localize(faq, &lang))).await?;
        self.write_listing(&key, &views).await;

        Ok(views)
    }

    /// Create a FAQ and append it to the English listing.
    ///
    /// # Errors
    /// `Validation` for an empty question or answer, `Internal` when the store fails.
    pub async fn create_faq(&self, question: &str, answer: &str) -> Result<Faq, FaqError> {
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(FaqError::validation("Question and answer are required."));
        }

        let faq = self.store.insert(NewFaq::new(question, answer)).await?;
        info!("Created FAQ {}", faq.id);

        if let Err(e) = self.append_to_baseline_listing(&faq).await {
            warn!("Failed to add FAQ {} to the English listing: {:#}", faq.id, e);
        }

        Ok(faq)
    }

    /// Delete a FAQ and drop it from the English listing.
    ///
    /// # Errors
    /// `Validation` for a malformed id, `NotFound` when no record matches,
    /// `Internal` when the store fails.
    pub async fn delete_faq(&self, id: &str) -> Result<DeletedFaq, FaqError> {
        let id = FaqId::parse(id).ok_or_else(|| FaqError::validation("A valid FAQ ID is required."))?;

        let Some(faq) = self.store.delete(&id).await? else {
            return Err(FaqError::not_found("FAQ not found."));
        };
        info!("Deleted FAQ {}", id);

        if let Err(e) = self.remove_from_baseline_listing(&id).await {
            warn!("Failed to drop FAQ {} from the English listing: {:#}", id, e);
        }

        Ok(DeletedFaq {
            message: "FAQ deleted successfully.".to_string(),
            deleted_faq: faq,
        })
    }

    /// Project one record into `lang`, translating and persisting if needed.
    ///
    /// Translation failures fall back to the baseline text; only a failing
    /// store write is an error.
    async fn localize(&self, faq: &Faq, lang: &str) -> Result<FaqView> {
        if let Some(existing) = faq.translations.get(lang) {
            return Ok(FaqView::translated(faq.id, existing));
        }

        let (question, answer) = futures::join!(
            self.translator.translate_question(&faq.question, lang),
            self.translator.translate_answer(&faq.answer, lang),
        );

        let (Some(question), Some(answer)) = (question, answer) else {
            debug!("FAQ {} falls back to English for '{}'", faq.id, lang);
            return Ok(FaqView::baseline(faq));
        };

        let translation = Translation { question, answer };
        self.store.set_translation(&faq.id, lang, &translation).await?;

        Ok(FaqView::translated(faq.id, &translation))
    }

    /// Read and decode a cached listing. Any problem counts as a miss.
    async fn read_listing(&self, key: &str) -> Option<Vec<FaqView>> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Cache read for {} failed: {:#}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(views) => Some(views),
            Err(e) => {
                warn!("Ignoring malformed cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Cache a translated listing. Failures are logged only.
    async fn write_listing(&self, key: &str, views: &[FaqView]) {
        let raw = match serde_json::to_string(views) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode listing {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set_expiring(key, raw).await {
            warn!("Failed to cache listing {}: {:#}", key, e);
        }
    }

    async fn append_to_baseline_listing(&self, faq: &Faq) -> Result<()> {
        let key = listing_key(BASELINE_LANG);

        let mut views: Vec<FaqView> = match self.cache.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Replacing malformed cache entry {}: {}", key, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        views.push(FaqView::with_id(faq));
        self.cache.set(&key, serde_json::to_string(&views)?).await
    }

    async fn remove_from_baseline_listing(&self, id: &FaqId) -> Result<()> {
        let key = listing_key(BASELINE_LANG);

        let Some(raw) = self.cache.get(&key).await? else {
            return Ok(());
        };

        let mut views: Vec<FaqView> = serde_json::from_str(&raw)?;
        views.retain(|view| view.id != Some(*id));
        self.cache.set(&key, serde_json::to_string(&views)?).await
    }
}

impl std::fmt::Debug for FaqService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqService")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}

/// Resolve the requested language, defaulting to English.
///
/// Tags end up in the store path `translations.<lang>`, so only
/// alphanumerics, `-` and `_` are allowed. Tags are case-insensitive and
/// returned lower-cased, so `EN` is the baseline and `ES`/`es` share one
/// listing and one stored translation.
fn normalize_lang(lang: Option<&str>) -> Result<String, FaqError> {
    let lang = lang
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(BASELINE_LANG);

    let well_formed = lang.len() <= MAX_LANG_LEN
        && lang
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !well_formed {
        return Err(FaqError::validation(format!("Invalid language tag: {lang}")));
    }

    Ok(lang.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cache::{CacheConfig, MokaListingCache};
    use crate::faq::testing::{CountingStore, FakeTranslator};

    struct Harness {
        service: FaqService,
        store: Arc<CountingStore>,
        cache: Arc<MokaListingCache>,
        translator: Arc<FakeTranslator>,
    }

    fn harness_with(translator: FakeTranslator, ttl: Duration) -> Harness {
        harness_over(CountingStore::new(), translator, ttl)
    }

    fn harness_over(store: CountingStore, translator: FakeTranslator, ttl: Duration) -> Harness {
        let store = Arc::new(store);
        let cache = Arc::new(MokaListingCache::new(CacheConfig::listings().ttl(ttl)));
        let translator = Arc::new(translator);

        let service = FaqService::new(
            store.clone(),
            cache.clone(),
            TranslatorGateway::new(translator.clone()),
        );

        Harness {
            service,
            store,
            cache,
            translator,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeTranslator::new(), Duration::from_secs(120))
    }

    async fn cached(h: &Harness, lang: &str) -> Option<Vec<FaqView>> {
        h.cache
            .get(&listing_key(lang))
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[tokio::test]
    async fn test_english_listing_uses_baseline_without_translating() {
        let h = harness();
        h.store.seed("What is Rust?", "<p>A language.</p>").await;
        h.store.seed("Is it fast?", "Yes.").await;

        let views = h.service.list_faqs(None).await.unwrap();

        assert_eq!(
            views,
            vec![
                FaqView {
                    question: "What is Rust?".into(),
                    answer: "<p>A language.</p>".into(),
                    id: None,
                },
                FaqView {
                    question: "Is it fast?".into(),
                    answer: "Yes.".into(),
                    id: None,
                },
            ]
        );
        assert_eq!(h.translator.calls(), 0);
        assert!(cached(&h, "en").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_lang_means_english() {
        let h = harness();
        h.store.seed("Q", "A").await;

        let views = h.service.list_faqs(Some("  ")).await.unwrap();
        assert_eq!(views[0].question, "Q");
        assert_eq!(h.translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_first_translated_listing_translates_and_persists() {
        let h = harness();
        let a = h.store.seed("Q1", "A1").await;
        let b = h.store.seed("Q2", "A2").await;

        let views = h.service.list_faqs(Some("es")).await.unwrap();

        assert_eq!(views[0], FaqView::translated(a.id, &Translation {
            question: "[es] Q1".into(),
            answer: "[es] A1".into(),
        }));
        assert_eq!(views[1].question, "[es] Q2");
        assert_eq!(views[1].id, Some(b.id));

        // one call per field per record
        assert_eq!(h.translator.calls(), 4);
        assert_eq!(CountingStore::count(&h.store.patches), 2);

        let stored = h.store.all().await;
        assert_eq!(stored[0].translations["es"].question, "[es] Q1");
        assert_eq!(stored[0].translations["en"].question, "Q1");
        assert_eq!(cached(&h, "es").await.unwrap(), views);
    }

    #[tokio::test]
    async fn test_second_translated_listing_is_a_cache_hit() {
        let h = harness();
        h.store.seed("Q1", "A1").await;

        let first = h.service.list_faqs(Some("fr")).await.unwrap();
        let second = h.service.list_faqs(Some("fr")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.translator.calls(), 2);
        assert_eq!(CountingStore::count(&h.store.reads), 1);
    }

    #[tokio::test]
    async fn test_existing_translation_is_reused() {
        let h = harness();
        let faq = h.store.seed("Q", "A").await;
        let de = Translation {
            question: "Frage".into(),
            answer: "Antwort".into(),
        };
        h.store.inner.set_translation(&faq.id, "de", &de).await.unwrap();

        let views = h.service.list_faqs(Some("de")).await.unwrap();

        assert_eq!(views, vec![FaqView::translated(faq.id, &de)]);
        assert_eq!(h.translator.calls(), 0);
        assert_eq!(CountingStore::count(&h.store.patches), 0);
    }

    #[tokio::test]
    async fn test_translated_listing_expires_and_reloads() {
        let h = harness_with(FakeTranslator::new(), Duration::from_millis(50));
        h.store.seed("Q", "A").await;

        h.service.list_faqs(Some("it")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cached(&h, "it").await.is_none());

        let views = h.service.list_faqs(Some("it")).await.unwrap();

        assert_eq!(views[0].question, "[it] Q");
        assert_eq!(CountingStore::count(&h.store.reads), 2);
        // the persisted translation is reused after expiry
        assert_eq!(h.translator.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_translation_falls_back_for_that_record_only() {
        let translator = FakeTranslator::new().failing_on("broken");
        let h = harness_with(translator, Duration::from_secs(120));
        let bad = h.store.seed("Q-bad", "<b>broken</b>").await;
        let good = h.store.seed("Q-good", "fine").await;

        let views = h.service.list_faqs(Some("ja")).await.unwrap();

        assert_eq!(views[0], FaqView::baseline(&bad));
        assert_eq!(views[1].question, "[ja] Q-good");
        assert_eq!(views[1].id, Some(good.id));

        let stored = h.store.all().await;
        assert!(!stored[0].translations.contains_key("ja"));
        assert!(stored[1].translations.contains_key("ja"));
        assert_eq!(CountingStore::count(&h.store.patches), 1);
    }

    #[tokio::test]
    async fn test_listing_keeps_store_order_despite_slow_translations() {
        let translator = FakeTranslator::new().delaying("Q1", Duration::from_millis(60));
        let h = harness_with(translator, Duration::from_secs(120));
        for i in 1..=3 {
            h.store.seed(&format!("Q{i}"), &format!("A{i}")).await;
        }

        let views = h.service.list_faqs(Some("pt")).await.unwrap();
        let questions: Vec<_> = views.iter().map(|v| v.question.as_str()).collect();

        assert_eq!(questions, ["[pt] Q1", "[pt] Q2", "[pt] Q3"]);
    }

    #[tokio::test]
    async fn test_store_outage_is_internal_and_caches_nothing() {
        let h = harness();
        h.store.seed("Q", "A").await;
        h.store.unavailable.store(true, std::sync::atomic::Ordering::SeqCst);

        let err = h.service.list_faqs(Some("es")).await.unwrap_err();

        assert!(matches!(err, FaqError::Internal(_)));
        assert!(cached(&h, "es").await.is_none());
        assert_eq!(h.translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_translation_write_aborts_listing_but_keeps_earlier_writes() {
        let translator = FakeTranslator::new().delaying("Q2", Duration::from_millis(40));
        let h = harness_over(
            CountingStore::new().failing_patches_after(1),
            translator,
            Duration::from_secs(120),
        );
        h.store.seed("Q1", "A1").await;
        h.store.seed("Q2", "A2").await;

        let err = h.service.list_faqs(Some("es")).await.unwrap_err();

        assert!(matches!(err, FaqError::Internal(_)));
        assert!(cached(&h, "es").await.is_none());
        assert_eq!(CountingStore::count(&h.store.patches), 2);

        let stored = h.store.all().await;
        assert_eq!(stored[0].translations["es"].question, "[es] Q1");
        assert!(!stored[1].translations.contains_key("es"));
    }

    #[tokio::test]
    async fn test_lang_tag_is_case_insensitive() {
        let h = harness();
        h.store.seed("Q", "A").await;

        let english = h.service.list_faqs(Some("EN")).await.unwrap();
        assert_eq!(english[0].question, "Q");
        assert_eq!(h.translator.calls(), 0);

        let upper = h.service.list_faqs(Some("ES")).await.unwrap();
        let lower = h.service.list_faqs(Some("es")).await.unwrap();

        assert_eq!(upper, lower);
        assert_eq!(h.translator.calls(), 2);
        assert_eq!(CountingStore::count(&h.store.reads), 2);

        let stored = h.store.all().await;
        assert!(stored[0].translations.contains_key("es"));
        assert!(!stored[0].translations.contains_key("ES"));
        assert!(!stored[0].translations.contains_key("EN"));
    }

    #[tokio::test]
    async fn test_malformed_cache_entry_is_a_miss() {
        let h = harness();
        h.store.seed("Q", "A").await;
        h.cache.set_expiring("faqs:es", "{not json".into()).await.unwrap();

        let views = h.service.list_faqs(Some("es")).await.unwrap();

        assert_eq!(views[0].question, "[es] Q");
        assert_eq!(CountingStore::count(&h.store.reads), 1);
    }

    #[tokio::test]
    async fn test_malformed_lang_is_rejected() {
        let h = harness();

        let err = h.service.list_faqs(Some("es.$where")).await.unwrap_err();

        assert!(matches!(err, FaqError::Validation(_)));
        assert_eq!(CountingStore::count(&h.store.reads), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields_without_side_effects() {
        let h = harness();

        for (question, answer) in [("", "x"), ("x", ""), ("   ", "x")] {
            let err = h.service.create_faq(question, answer).await.unwrap_err();
            assert!(matches!(err, FaqError::Validation(_)));
        }

        assert_eq!(CountingStore::count(&h.store.inserts), 0);
        assert!(cached(&h, "en").await.is_none());
    }

    #[tokio::test]
    async fn test_create_returns_record_and_patches_english_listing() {
        let h = harness();

        let faq = h.service.create_faq("What is Node.js?", "A runtime.").await.unwrap();

        assert_eq!(faq.question, "What is Node.js?");
        assert_eq!(faq.translations["en"].answer, "A runtime.");
        assert_eq!(
            cached(&h, "en").await.unwrap(),
            vec![FaqView::with_id(&faq)]
        );
    }

    #[tokio::test]
    async fn test_english_patch_starts_from_empty_and_never_expires() {
        let h = harness_with(FakeTranslator::new(), Duration::from_millis(50));
        h.store.seed("Older", "FAQ").await;

        let faq = h.service.create_faq("New", "FAQ").await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;

        // the patch appends to what is cached, it does not rebuild from the store
        assert_eq!(cached(&h, "en").await.unwrap(), vec![FaqView::with_id(&faq)]);
        assert_eq!(h.service.list_faqs(Some("en")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_succeeds_over_malformed_english_entry() {
        let h = harness();
        h.cache.set("faqs:en", "garbage".into()).await.unwrap();

        let faq = h.service.create_faq("Q", "A").await.unwrap();

        assert_eq!(cached(&h, "en").await.unwrap(), vec![FaqView::with_id(&faq)]);
    }

    #[tokio::test]
    async fn test_delete_patches_english_but_leaves_translated_listings_stale() {
        let h = harness();
        let keep = h.service.create_faq("Keep", "me").await.unwrap();
        let gone = h.service.create_faq("Drop", "me").await.unwrap();
        let spanish = h.service.list_faqs(Some("es")).await.unwrap();
        assert_eq!(spanish.len(), 2);

        let deleted = h.service.delete_faq(&gone.id.to_string()).await.unwrap();

        assert_eq!(deleted.message, "FAQ deleted successfully.");
        assert_eq!(deleted.deleted_faq.id, gone.id);
        assert_eq!(cached(&h, "en").await.unwrap(), vec![FaqView::with_id(&keep)]);
        assert_eq!(h.store.all().await.len(), 1);

        // accepted staleness: translated listings keep the deleted FAQ until they expire
        let stale = h.service.list_faqs(Some("es")).await.unwrap();
        assert_eq!(stale, spanish);
        assert!(stale.iter().any(|v| v.id == Some(gone.id)));
    }

    #[tokio::test]
    async fn test_delete_without_english_entry_skips_patch() {
        let h = harness();
        let faq = h.store.seed("Q", "A").await;

        h.service.delete_faq(&faq.id.to_string()).await.unwrap();

        assert!(cached(&h, "en").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found_and_mutates_nothing() {
        let h = harness();
        let faq = h.service.create_faq("Q", "A").await.unwrap();
        let before = cached(&h, "en").await;

        let err = h
            .service
            .delete_faq(&FaqId::generate().to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, FaqError::NotFound(_)));
        assert_eq!(h.store.all().await, vec![faq]);
        assert_eq!(cached(&h, "en").await, before);
    }

    #[tokio::test]
    async fn test_delete_malformed_id_never_reaches_store() {
        let h = harness();

        let err = h.service.delete_faq("12345").await.unwrap_err();

        assert!(matches!(err, FaqError::Validation(_)));
        assert_eq!(CountingStore::count(&h.store.deletes), 0);
    }

    #[test]
    fn test_normalize_lang() {
        assert_eq!(normalize_lang(None).unwrap(), "en");
        assert_eq!(normalize_lang(Some("")).unwrap(), "en");
        assert_eq!(normalize_lang(Some("zh-CN")).unwrap(), "zh-cn");
        assert_eq!(normalize_lang(Some("EN")).unwrap(), "en");
        assert!(normalize_lang(Some("a.b")).is_err());
        assert!(normalize_lang(Some("x".repeat(17).as_str())).is_err());
    }
}
