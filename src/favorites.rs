//! Favorites list persisted as one JSON blob under [`STORAGE_KEY`].
//!
//! The whole collection is rewritten on every mutation, so the in-memory list
//! and the stored blob agree once a call returns. A missing or corrupt blob
//! loads as an empty list; storage errors are logged and never reach the UI.

use serde::Serialize;
use serde_json::Value;

use crate::storage::KvStore;
use crate::types::{FavoriteItem, FavoriteKind};

pub const STORAGE_KEY: &str = "catFavorites";

/// Handle bound to one rendered entry; removal goes by id, never by content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoveAction {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub content: String,
    pub added_ms: i64,
    pub remove: RemoveAction,
}

/// Favorites split by kind, insertion order kept inside each partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavoritesView {
    pub facts: Vec<FavoriteEntry>,
    pub images: Vec<FavoriteEntry>,
}

impl FavoritesView {
    pub fn len(&self) -> usize {
        self.facts.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct FavoritesStore {
    store: Box<dyn KvStore>,
    items: Vec<FavoriteItem>,
}

impl FavoritesStore {
    /// Wrap a backend and load whatever it already holds.
    pub fn new(store: Box<dyn KvStore>) -> Self {
        let mut favorites = Self { store, items: Vec::new() };
        favorites.load();
        favorites
    }

    /// Re-read the persisted collection.
    pub fn load(&mut self) -> &[FavoriteItem] {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[favorites] storage unavailable, starting empty: {e}");
                None
            }
        };

        let (items, migrated) = match raw {
            Some(raw) => decode_collection(&raw),
            None => (Vec::new(), 0),
        };
        self.items = items;

        if migrated > 0 {
            log::info!("[favorites] assigned ids to {migrated} legacy entries");
            self.persist();
        }
        &self.items
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Append a favorite. Duplicate content is allowed; each add gets its own id.
    pub fn add(&mut self, kind: FavoriteKind, content: impl Into<String>) -> FavoriteItem {
        let item = FavoriteItem {
            id: self.fresh_id(),
            kind,
            content: content.into(),
            added_ms: chrono::Utc::now().timestamp_millis(),
        };
        self.items.push(item.clone());
        self.persist();
        log::info!("[favorites] added {} {}", item.kind, item.id);
        item
    }

    /// Remove exactly the favorite with this id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
            log::info!("[favorites] removed {id}");
        }
        removed
    }

    /// Remove every favorite whose content equals `content`.
    ///
    /// Two favorites sharing content are indistinguishable here, so both go.
    /// UI paths use [`FavoritesStore::remove`] instead.
    pub fn remove_content(&mut self, content: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.content != content);
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            log::error!("[favorites] failed to clear storage: {e}");
        }
    }

    pub fn render(&self) -> FavoritesView {
        let mut view = FavoritesView::default();
        for item in &self.items {
            let entry = FavoriteEntry {
                id: item.id.clone(),
                content: item.content.clone(),
                added_ms: item.added_ms,
                remove: RemoveAction { id: item.id.clone() },
            };
            match item.kind {
                FavoriteKind::Fact => view.facts.push(entry),
                FavoriteKind::Image => view.images.push(entry),
            }
        }
        view
    }

    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.items) {
            Ok(blob) => blob,
            Err(e) => {
                log::error!("[favorites] failed to encode collection: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(STORAGE_KEY, &blob) {
            log::error!("[favorites] failed to persist {} items: {e}", self.items.len());
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = new_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn new_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Decode a stored blob. Returns the items and how many entries had to be
/// given a fresh id (entries written before ids existed).
fn decode_collection(raw: &str) -> (Vec<FavoriteItem>, usize) {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            log::warn!("[favorites] stored blob is not an array, ignoring it");
            return (Vec::new(), 0);
        }
        Err(e) => {
            log::warn!("[favorites] stored blob is not valid JSON, ignoring it: {e}");
            return (Vec::new(), 0);
        }
    };

    let mut items: Vec<FavoriteItem> = Vec::with_capacity(entries.len());
    let mut migrated = 0;

    for entry in entries {
        let kind = match entry.get("type").and_then(Value::as_str) {
            Some("fact") => FavoriteKind::Fact,
            Some("image") => FavoriteKind::Image,
            other => {
                log::warn!("[favorites] skipping entry with type {other:?}");
                continue;
            }
        };
        let Some(content) = entry.get("content").and_then(Value::as_str) else {
            log::warn!("[favorites] skipping {kind} entry without content");
            continue;
        };

        let id = match entry.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() && !items.iter().any(|i| i.id == id) => id.to_string(),
            _ => {
                migrated += 1;
                loop {
                    let id = new_id();
                    if !items.iter().any(|i| i.id == id) {
                        break id;
                    }
                }
            }
        };

        items.push(FavoriteItem {
            id,
            kind,
            content: content.to_string(),
            added_ms: entry.get("added_ms").and_then(Value::as_i64).unwrap_or(0),
        });
    }

    (items, migrated)
}
