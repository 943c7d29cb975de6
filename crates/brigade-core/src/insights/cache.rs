//! Process-wide insight cache keyed by kind and dataset context.

use super::InsightKind;
use super::records::InsightPayload;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

type CacheKey = (InsightKind, String);

/// Shared cache of successful insight results. Cloning shares storage.
///
/// Only parsed, schema-valid payloads are stored. Failures never are.
#[derive(Debug, Clone, Default)]
pub struct InsightCache {
    entries: Arc<RwLock<HashMap<CacheKey, InsightPayload>>>,
}

impl InsightCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: InsightKind, context: &str) -> Option<InsightPayload> {
        self.entries
            .read()
            .get(&(kind, context.to_string()))
            .cloned()
    }

    pub fn insert(&self, kind: InsightKind, context: impl Into<String>, payload: InsightPayload) {
        self.entries.write().insert((kind, context.into()), payload);
    }

    /// Drop one entry. Returns whether anything was cached.
    pub fn invalidate(&self, kind: InsightKind, context: &str) -> bool {
        self.entries
            .write()
            .remove(&(kind, context.to_string()))
            .is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
