use crate::error::ShinkaiError;
use crate::models::AnimeSummary;
use crate::records;
use crate::store::KeyValueStore;

const AIRING_KEY: &str = "animeList";

/// Cached "airing now" listing.
///
/// Written once after a successful fetch and served until cleared; there is
/// no expiry.
pub struct AiringCache<S> {
    store: S,
}

impl<S: KeyValueStore> AiringCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Cached listing, or `None` if nothing usable is stored.
    pub fn load(&self) -> Result<Option<Vec<AnimeSummary>>, ShinkaiError> {
        let Some(raw) = self.store.get(AIRING_KEY)? else {
            return Ok(None);
        };
        let cached = records::decode(&raw);
        if cached.is_none() {
            tracing::warn!("airing cache is unreadable, ignoring it");
        }
        Ok(cached)
    }

    pub fn store(&mut self, items: &[AnimeSummary]) -> Result<(), ShinkaiError> {
        let json = records::encode(items)?;
        self.store.set(AIRING_KEY, &json)
    }

    pub fn clear(&mut self) -> Result<(), ShinkaiError> {
        self.store.remove(AIRING_KEY)
    }
}
