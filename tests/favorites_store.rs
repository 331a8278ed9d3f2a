//! Favorites store behaviour against the public API

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use catbox::favorites::{FavoritesStore, STORAGE_KEY};
use catbox::storage::{KvStore, MemoryStore, SqliteStore};
use catbox::FavoriteKind;

/// Store whose contents the test can still read after handing it over.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<HashMap<String, String>>>);

impl SharedStore {
    fn blob(&self) -> Option<String> {
        self.0.borrow().get(STORAGE_KEY).cloned()
    }
}

impl KvStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.borrow().get(key).cloned())
    }
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn remove(&mut self, key: &str) -> Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

/// Reads work, writes always fail (full disk, quota exceeded).
struct ReadOnlyStore;

impl KvStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("quota exceeded"))
    }
    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(anyhow!("quota exceeded"))
    }
}

fn contents(store: &FavoritesStore) -> Vec<(FavoriteKind, String)> {
    store.items().iter().map(|i| (i.kind, i.content.clone())).collect()
}

#[test]
fn remove_content_drops_every_match() {
    let mut favs = FavoritesStore::new(Box::new(MemoryStore::new()));
    favs.add(FavoriteKind::Fact, "Cats sleep 70% of their lives.");
    favs.add(FavoriteKind::Image, "https://cdn2.thecatapi.com/images/abc.jpg");

    assert_eq!(favs.remove_content("Cats sleep 70% of their lives."), 1);
    assert_eq!(
        contents(&favs),
        vec![(FavoriteKind::Image, "https://cdn2.thecatapi.com/images/abc.jpg".to_string())]
    );

    favs.add(FavoriteKind::Fact, "dup");
    favs.add(FavoriteKind::Fact, "dup");
    assert_eq!(favs.remove_content("dup"), 2);
    assert_eq!(favs.remove_content("missing"), 0);
}

#[test]
fn removing_the_only_fact_by_content_empties_store_and_view() {
    let seeded = r#"[{"type":"fact","content":"Cats sleep 70% of their lives."}]"#;
    let shared = SharedStore::default();
    shared.0.borrow_mut().insert(STORAGE_KEY.to_string(), seeded.to_string());

    let mut favs = FavoritesStore::new(Box::new(shared.clone()));
    assert_eq!(favs.render().facts.len(), 1);

    assert_eq!(favs.remove_content("Cats sleep 70% of their lives."), 1);
    assert_eq!(shared.blob().as_deref(), Some("[]"));
    assert!(favs.render().is_empty());
    assert!(favs.load().is_empty());
}

#[test]
fn remove_by_id_leaves_duplicates_alone() {
    let mut favs = FavoritesStore::new(Box::new(MemoryStore::new()));
    let first = favs.add(FavoriteKind::Fact, "dup");
    let second = favs.add(FavoriteKind::Fact, "dup");
    assert_ne!(first.id, second.id);

    assert!(favs.remove(&first.id));
    assert!(!favs.remove(&first.id));
    assert_eq!(favs.items().len(), 1);
    assert_eq!(favs.items()[0].id, second.id);
}

#[test]
fn add_then_remove_restores_collection() {
    let shared = SharedStore::default();
    let mut favs = FavoritesStore::new(Box::new(shared.clone()));
    favs.add(FavoriteKind::Fact, "A group of cats is a clowder.");
    let before = favs.items().to_vec();
    let blob_before = shared.blob();

    let item = favs.add(FavoriteKind::Image, "https://cdn2.thecatapi.com/images/x.png");
    assert!(favs.remove(&item.id));

    assert_eq!(favs.items(), before.as_slice());
    assert_eq!(shared.blob(), blob_before);
}

#[test]
fn every_mutation_rewrites_the_blob() {
    let shared = SharedStore::default();
    let mut favs = FavoritesStore::new(Box::new(shared.clone()));
    favs.add(FavoriteKind::Fact, "one");
    favs.add(FavoriteKind::Image, "https://x/two.jpg");

    let blob = shared.blob().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["type"], "fact");
    assert_eq!(arr[0]["content"], "one");
    assert_eq!(arr[1]["type"], "image");

    // A second handle on the same storage sees the same list
    let reopened = FavoritesStore::new(Box::new(shared.clone()));
    assert_eq!(reopened.items(), favs.items());
}

#[test]
fn clear_then_load_is_empty() {
    let shared = SharedStore::default();
    let mut favs = FavoritesStore::new(Box::new(shared.clone()));
    favs.add(FavoriteKind::Fact, "x");
    favs.clear();

    assert!(favs.is_empty());
    assert!(favs.load().is_empty());
    assert_eq!(shared.blob(), None);
}

#[test]
fn render_partitions_in_insertion_order() {
    let mut favs = FavoritesStore::new(Box::new(MemoryStore::new()));
    let inputs = [
        (FavoriteKind::Fact, "f1"),
        (FavoriteKind::Image, "i1"),
        (FavoriteKind::Fact, "f2"),
        (FavoriteKind::Image, "i2"),
        (FavoriteKind::Fact, "f3"),
    ];
    for (kind, content) in inputs {
        favs.add(kind, content);
    }

    let view = favs.render();
    assert_eq!(view.len(), inputs.len());
    let facts: Vec<_> = view.facts.iter().map(|e| e.content.as_str()).collect();
    let images: Vec<_> = view.images.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(facts, ["f1", "f2", "f3"]);
    assert_eq!(images, ["i1", "i2"]);
    assert!(view.facts.iter().all(|e| e.remove.id == e.id));
}

#[test]
fn legacy_blob_is_migrated_once() {
    let legacy = r#"[{"type":"fact","content":"Cats sleep 70% of their lives."},{"type":"image","content":"https://x/y.jpg"}]"#;
    let shared = SharedStore::default();
    shared.0.borrow_mut().insert(STORAGE_KEY.to_string(), legacy.to_string());

    let favs = FavoritesStore::new(Box::new(shared.clone()));
    assert_eq!(favs.len(), 2);

    let blob = shared.blob().unwrap();
    assert_ne!(blob, legacy);
    let again = FavoritesStore::new(Box::new(shared.clone()));
    assert_eq!(again.items(), favs.items());
    assert_eq!(shared.blob().unwrap(), blob);
}

#[test]
fn corrupt_blob_loads_empty() {
    let favs = FavoritesStore::new(Box::new(MemoryStore::with_entry(STORAGE_KEY, "{oops")));
    assert!(favs.is_empty());
}

#[test]
fn failed_writes_keep_the_session_usable() {
    let mut favs = FavoritesStore::new(Box::new(ReadOnlyStore));
    let item = favs.add(FavoriteKind::Fact, "still here");
    assert_eq!(favs.len(), 1);
    assert!(favs.remove(&item.id));
    favs.add(FavoriteKind::Fact, "again");
    favs.clear();
    assert!(favs.is_empty());
}

#[test]
fn sqlite_keeps_favorites_across_reopen() {
    let dir = std::env::temp_dir().join(format!("catbox-fav-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("favorites.db");
    let path = path.to_str().unwrap();

    let id = {
        let mut favs = FavoritesStore::new(Box::new(SqliteStore::open(path).unwrap()));
        favs.add(FavoriteKind::Fact, "Cats have five toes on their front paws.");
        favs.add(FavoriteKind::Image, "https://cdn2.thecatapi.com/images/0XYvRd7oD.jpg").id
    };

    let mut favs = FavoritesStore::new(Box::new(SqliteStore::open(path).unwrap()));
    assert_eq!(favs.len(), 2);
    assert!(favs.remove(&id));

    let favs = FavoritesStore::new(Box::new(SqliteStore::open(path).unwrap()));
    assert_eq!(favs.len(), 1);
    assert_eq!(favs.items()[0].kind, FavoriteKind::Fact);

    let _ = std::fs::remove_dir_all(&dir);
}
