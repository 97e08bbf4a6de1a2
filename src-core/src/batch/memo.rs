// FICHIER : src-core/src/batch/memo.rs

//! Mémo LRU côté appelant : empreinte du bilan (`summary_hash`) -> bilan.
//! Le vérificateur lui-même ne met rien en cache.

use crate::batch::hash::summary_hash;
use crate::batch::summary::{evaluate_batch, BatchSummary};
use crate::model::test_result::TestResult;
use crate::rules_engine::table::RuleTable;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone)]
pub struct BatchMemo {
    // LruCache::get réordonne les entrées : mutation même en lecture
    store: Arc<Mutex<LruCache<String, BatchSummary>>>,
}

impl Default for BatchMemo {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}

impl BatchMemo {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn get(&self, hash: &str) -> Option<BatchSummary> {
        let mut guard = self.store.lock().ok()?;
        guard.get(hash).cloned()
    }

    pub fn put(&self, hash: String, summary: BatchSummary) {
        if let Ok(mut guard) = self.store.lock() {
            guard.put(hash, summary);
        }
    }

    /// Réutilise le bilan si l'empreinte est connue, sinon évalue et mémorise.
    /// La clé couvre aussi les libellés recopiés dans le bilan.
    pub fn evaluate(&self, records: &[TestResult], table: &RuleTable) -> BatchSummary {
        let hash = summary_hash(records, table);
        if let Some(hit) = self.get(&hash) {
            tracing::debug!(hash = %hash, "Bilan repris du mémo");
            return hit;
        }
        let summary = evaluate_batch(records, table);
        self.put(hash, summary.clone());
        summary
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.store.lock() {
            guard.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.store.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
