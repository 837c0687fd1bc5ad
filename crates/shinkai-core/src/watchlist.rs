//! Personal watch-lists: planned, watching, completed and dropped.
//!
//! A title belongs to at most one category at a time. Every mutation reads the
//! current lists from the injected [`KeyValueStore`], applies the change, and
//! writes the result back before returning. Nothing is cached between calls,
//! so the store stays the single source of truth.

use std::collections::BTreeMap;

use crate::error::ShinkaiError;
use crate::models::{AnimeSummary, Category, StatusLabel};
use crate::records;
use crate::store::KeyValueStore;

/// Snapshot of all four lists, insertion order preserved within each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchListState {
    lists: BTreeMap<Category, Vec<AnimeSummary>>,
}

impl WatchListState {
    /// Titles in `category`, oldest first.
    pub fn get(&self, category: Category) -> &[AnimeSummary] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, category: Category, id: u64) -> bool {
        self.get(category).iter().any(|a| a.id == id)
    }

    /// First category (in priority order) holding `id`.
    pub fn status_of(&self, id: u64) -> StatusLabel {
        Category::ALL
            .into_iter()
            .find(|&c| self.contains(c, id))
            .map_or(StatusLabel::Unlisted, StatusLabel::Listed)
    }

    /// All lists in priority order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[AnimeSummary])> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Total number of stored titles across all lists.
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Put `anime` into `target` and take it out of every other list.
    ///
    /// An entry already present in `target` keeps its position and stored
    /// title; it is not appended twice.
    pub fn categorize(&mut self, anime: &AnimeSummary, target: Category) {
        for category in Category::ALL {
            let list = self.lists.entry(category).or_default();
            if category == target {
                if !list.iter().any(|a| a.id == anime.id) {
                    list.push(anime.clone());
                }
            } else {
                list.retain(|a| a.id != anime.id);
            }
        }
    }
}

/// Watch-list store over an injected key-value backend.
pub struct WatchList<S> {
    store: S,
}

impl<S: KeyValueStore> WatchList<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Read one category. Absent or malformed content reads as empty.
    pub fn list(&self, category: Category) -> Result<Vec<AnimeSummary>, ShinkaiError> {
        let key = category.storage_key();
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        Ok(records::decode(&raw).unwrap_or_else(|| {
            tracing::warn!(key, "stored watch-list is not a JSON array, treating as empty");
            Vec::new()
        }))
    }

    /// Read all four categories.
    pub fn state(&self) -> Result<WatchListState, ShinkaiError> {
        let mut lists = BTreeMap::new();
        for category in Category::ALL {
            lists.insert(category, self.list(category)?);
        }
        Ok(WatchListState { lists })
    }

    /// Current status of a title. Scans in priority order and stops at the
    /// first hit.
    pub fn status_of(&self, id: u64) -> Result<StatusLabel, ShinkaiError> {
        for category in Category::ALL {
            if self.list(category)?.iter().any(|a| a.id == id) {
                return Ok(StatusLabel::Listed(category));
            }
        }
        Ok(StatusLabel::Unlisted)
    }

    /// Move `anime` into `target`, removing it from the other three lists,
    /// and persist all four in one batch. On a failed write the stored lists
    /// are left as they were. Calling this twice with the same arguments
    /// leaves the lists as they were after the first call.
    pub fn categorize(
        &mut self,
        anime: &AnimeSummary,
        target: Category,
    ) -> Result<StatusLabel, ShinkaiError> {
        let mut state = self.state()?;
        state.categorize(anime, target);
        self.persist(&state, target)?;
        tracing::debug!(id = anime.id, category = %target, "categorized anime");
        Ok(StatusLabel::Listed(target))
    }

    /// Remove `id` from `category` and persist. No-op if it isn't there.
    pub fn remove(&mut self, category: Category, id: u64) -> Result<bool, ShinkaiError> {
        let mut list = self.list(category)?;
        let before = list.len();
        list.retain(|a| a.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.write(category, &list)?;
        tracing::debug!(id, category = %category, "removed anime");
        Ok(true)
    }

    /// Write every list, `target` first, so a store without transactions
    /// never drops a title on a partial write.
    fn persist(&mut self, state: &WatchListState, target: Category) -> Result<(), ShinkaiError> {
        let others = Category::ALL.into_iter().filter(|&c| c != target);
        let order = std::iter::once(target).chain(others);
        let mut entries = Vec::with_capacity(Category::ALL.len());
        for category in order {
            entries.push((category.storage_key(), records::encode(state.get(category))?));
        }
        self.store.set_many(&entries)
    }

    fn write(&mut self, category: Category, list: &[AnimeSummary]) -> Result<(), ShinkaiError> {
        let json = records::encode(list)?;
        self.store.set(category.storage_key(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn frieren() -> AnimeSummary {
        AnimeSummary::new(
            52991,
            "Sousou no Frieren",
            "https://cdn.myanimelist.net/images/anime/1015/138006.jpg",
        )
    }

    fn bebop() -> AnimeSummary {
        AnimeSummary::new(1, "Cowboy Bebop", "")
    }

    fn ids(list: &[AnimeSummary]) -> Vec<u64> {
        list.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_categorize_then_move() {
        let mut wl = WatchList::new(MemoryStore::new());
        let anime = AnimeSummary::new(1, "X", "");

        assert_eq!(
            wl.categorize(&anime, Category::Watching).unwrap(),
            StatusLabel::Listed(Category::Watching)
        );
        wl.categorize(&anime, Category::Dropped).unwrap();

        let state = wl.state().unwrap();
        assert!(state.get(Category::Planned).is_empty());
        assert!(state.get(Category::Watching).is_empty());
        assert!(state.get(Category::Completed).is_empty());
        assert_eq!(state.get(Category::Dropped), &[anime]);
    }

    #[test]
    fn test_planned_to_watching() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&frieren(), Category::Planned).unwrap();
        wl.categorize(&frieren(), Category::Watching).unwrap();

        assert!(wl.list(Category::Planned).unwrap().is_empty());
        assert_eq!(ids(&wl.list(Category::Watching).unwrap()), vec![52991]);
    }

    #[test]
    fn test_categorize_is_idempotent() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&bebop(), Category::Planned).unwrap();
        wl.categorize(&frieren(), Category::Completed).unwrap();
        let first = wl.state().unwrap();

        wl.categorize(&frieren(), Category::Completed).unwrap();
        assert_eq!(wl.state().unwrap(), first);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_at_most_one_category() {
        let mut wl = WatchList::new(MemoryStore::new());
        let moves = [
            (frieren(), Category::Planned),
            (bebop(), Category::Watching),
            (frieren(), Category::Completed),
            (bebop(), Category::Completed),
            (frieren(), Category::Dropped),
            (bebop(), Category::Planned),
            (frieren(), Category::Dropped),
        ];
        for (anime, category) in &moves {
            wl.categorize(anime, *category).unwrap();
            let state = wl.state().unwrap();
            for id in [1, 52991] {
                let hits = state.iter().filter(|(c, _)| state.contains(*c, id)).count();
                assert!(hits <= 1, "id {id} found in {hits} lists");
            }
        }

        let state = wl.state().unwrap();
        assert_eq!(state.status_of(1), StatusLabel::Listed(Category::Planned));
        assert_eq!(state.status_of(52991), StatusLabel::Listed(Category::Dropped));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut wl = WatchList::new(MemoryStore::new());
        for id in [30, 10, 20] {
            wl.categorize(&AnimeSummary::new(id, format!("#{id}"), ""), Category::Planned)
                .unwrap();
        }
        // Re-adding an existing title doesn't move it to the end.
        wl.categorize(&AnimeSummary::new(30, "#30", ""), Category::Planned)
            .unwrap();
        assert_eq!(ids(&wl.list(Category::Planned).unwrap()), vec![30, 10, 20]);
    }

    #[test]
    fn test_remove() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&frieren(), Category::Watching).unwrap();
        wl.categorize(&bebop(), Category::Watching).unwrap();

        assert!(wl.remove(Category::Watching, 52991).unwrap());
        assert_eq!(ids(&wl.list(Category::Watching).unwrap()), vec![1]);
        assert_eq!(wl.status_of(52991).unwrap(), StatusLabel::Unlisted);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&bebop(), Category::Completed).unwrap();
        let before = wl.store().get("completedAnime").unwrap();

        assert!(!wl.remove(Category::Completed, 999).unwrap());
        // Wrong category: bebop stays where it is.
        assert!(!wl.remove(Category::Dropped, 1).unwrap());

        assert_eq!(wl.store().get("completedAnime").unwrap(), before);
        assert_eq!(wl.store().get("droppedAnime").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_status_of() {
        let mut wl = WatchList::new(MemoryStore::new());
        assert_eq!(wl.status_of(52991).unwrap(), StatusLabel::Unlisted);
        assert_eq!(wl.status_of(52991).unwrap().as_str(), "Add to the list");

        wl.categorize(&frieren(), Category::Completed).unwrap();
        assert_eq!(wl.status_of(52991).unwrap().as_str(), "✅ Completed");
    }

    #[test]
    fn test_status_of_prefers_priority_order() {
        // Violate exclusivity behind the store's back.
        let mut store = MemoryStore::new();
        store.set("droppedAnime", r#"[{"id":7,"title":"Dup"}]"#).unwrap();
        store.set("watchingAnime", r#"[{"id":7,"title":"Dup"}]"#).unwrap();
        let wl = WatchList::new(store);

        assert_eq!(
            wl.status_of(7).unwrap(),
            StatusLabel::Listed(Category::Watching)
        );
        assert_eq!(
            wl.state().unwrap().status_of(7),
            StatusLabel::Listed(Category::Watching)
        );
    }

    #[test]
    fn test_categorize_repairs_duplicates() {
        let mut store = MemoryStore::new();
        store.set("plannedAnime", r#"[{"id":7,"title":"Dup"}]"#).unwrap();
        store.set("droppedAnime", r#"[{"id":7,"title":"Dup"}]"#).unwrap();
        let mut wl = WatchList::new(store);

        wl.categorize(&AnimeSummary::new(7, "Dup", ""), Category::Completed)
            .unwrap();
        let state = wl.state().unwrap();
        assert_eq!(state.len(), 1);
        assert!(state.contains(Category::Completed, 7));
    }

    #[test]
    fn test_malformed_storage_reads_empty() {
        let mut store = MemoryStore::new();
        store.set("plannedAnime", "{not json").unwrap();
        store.set("watchingAnime", r#"{"id":1}"#).unwrap();
        store.set("completedAnime", "null").unwrap();
        let mut wl = WatchList::new(store);

        assert!(wl.list(Category::Planned).unwrap().is_empty());
        assert!(wl.state().unwrap().is_empty());

        // The next write replaces the garbage with a proper array.
        wl.categorize(&bebop(), Category::Planned).unwrap();
        assert_eq!(ids(&wl.list(Category::Planned).unwrap()), vec![1]);
        assert_eq!(wl.store().get("watchingAnime").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_categorize_writes_all_keys() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&bebop(), Category::Dropped).unwrap();

        let store = wl.into_inner();
        for category in Category::ALL {
            assert!(store.get(category.storage_key()).unwrap().is_some());
        }
        assert_eq!(store.len(), 4);
    }

    /// Fails every write to `droppedAnime`.
    struct FullDroppedStore(MemoryStore);

    impl KeyValueStore for FullDroppedStore {
        fn get(&self, key: &str) -> Result<Option<String>, ShinkaiError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), ShinkaiError> {
            if key == Category::Dropped.storage_key() {
                return Err(ShinkaiError::Io(std::io::Error::other("quota exceeded")));
            }
            self.0.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), ShinkaiError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_failed_write_into_target_keeps_old_category() {
        let mut store = MemoryStore::new();
        store.set("plannedAnime", r#"[{"id":1,"title":"Cowboy Bebop"}]"#).unwrap();
        let mut wl = WatchList::new(FullDroppedStore(store));

        assert!(wl.categorize(&bebop(), Category::Dropped).is_err());
        assert_eq!(wl.status_of(1).unwrap(), StatusLabel::Listed(Category::Planned));
        assert_eq!(wl.state().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_write_out_of_old_category_rolls_back() {
        let mut store = MemoryStore::new();
        store.set("droppedAnime", r#"[{"id":1,"title":"Cowboy Bebop"}]"#).unwrap();
        let mut wl = WatchList::new(FullDroppedStore(store));

        assert!(wl.categorize(&bebop(), Category::Planned).is_err());
        let state = wl.state().unwrap();
        assert_eq!(state.len(), 1);
        assert!(state.contains(Category::Dropped, 1));
        assert!(!state.contains(Category::Planned, 1));
    }

    #[test]
    fn test_detail_fields_dropped_on_store() {
        let mut wl = WatchList::new(MemoryStore::new());
        wl.categorize(&frieren(), Category::Planned).unwrap();

        let raw = wl.store().get("plannedAnime").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["title"], "Sousou no Frieren");
        assert_eq!(value[0]["synopsis"], "");
        assert_eq!(value[0]["episodes"], 0);
    }
}
