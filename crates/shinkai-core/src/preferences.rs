//! Persisted UI preferences: theme, browse filters and the current page.

use serde::{Deserialize, Serialize};

use crate::error::ShinkaiError;
use crate::store::KeyValueStore;

const THEME_KEY: &str = "theme";
const FILTERS_KEY: &str = "filters";
const PAGE_KEY: &str = "page";

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Genre/type filters for the popular listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseFilters {
    /// Selected genre ids, in selection order.
    #[serde(default)]
    pub genres: Vec<u32>,
    /// Media type (`TV`, `Movie`, ...); empty means all types.
    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl BrowseFilters {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.media_type.is_empty()
    }
}

/// Preference accessors over an injected key-value backend.
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn saved_theme(&self) -> Result<Option<Theme>, ShinkaiError> {
        Ok(self
            .store
            .get(THEME_KEY)?
            .and_then(|raw| Theme::parse(&raw)))
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), ShinkaiError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Saved theme, dark when nothing usable is stored.
    pub fn effective_theme(&self) -> Result<Theme, ShinkaiError> {
        Ok(self.saved_theme()?.unwrap_or_default())
    }

    /// Flip the effective theme and save it.
    pub fn toggle_theme(&mut self) -> Result<Theme, ShinkaiError> {
        let theme = self.effective_theme()?.toggled();
        self.save_theme(theme)?;
        Ok(theme)
    }

    /// Saved filters, or `None` if absent or unreadable.
    pub fn saved_filters(&self) -> Result<Option<BrowseFilters>, ShinkaiError> {
        let Some(raw) = self.store.get(FILTERS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(filters) => Ok(Some(filters)),
            Err(e) => {
                tracing::warn!("ignoring unreadable saved filters: {e}");
                Ok(None)
            }
        }
    }

    pub fn save_filters(&mut self, filters: &BrowseFilters) -> Result<(), ShinkaiError> {
        let json = serde_json::to_string(filters)?;
        self.store.set(FILTERS_KEY, &json)
    }

    /// Save new filters and go back to the first page.
    pub fn update_filters(&mut self, filters: &BrowseFilters) -> Result<(), ShinkaiError> {
        self.save_filters(filters)?;
        self.save_page(1)
    }

    /// Saved page number, 1 when absent or unusable.
    pub fn saved_page(&self) -> Result<u32, ShinkaiError> {
        Ok(self
            .store
            .get(PAGE_KEY)?
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|&page| page >= 1)
            .unwrap_or(1))
    }

    pub fn save_page(&mut self, page: u32) -> Result<(), ShinkaiError> {
        self.store.set(PAGE_KEY, &page.max(1).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_theme_defaults_to_dark() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.saved_theme().unwrap(), None);
        assert_eq!(prefs.effective_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_saved_light_theme_is_honored() {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.save_theme(Theme::Light).unwrap();
        assert_eq!(prefs.effective_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_toggle_theme() {
        let mut store = MemoryStore::new();
        {
            let mut prefs = Preferences::new(&mut store);
            assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
            assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);
        }
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unknown_theme_value() {
        let mut store = MemoryStore::new();
        store.set("theme", "solarized").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.saved_theme().unwrap(), None);
        assert_eq!(prefs.effective_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_filters_roundtrip_uses_browser_layout() {
        let mut store = MemoryStore::new();
        let filters = BrowseFilters {
            genres: vec![1, 4],
            media_type: "TV".into(),
        };
        Preferences::new(&mut store).save_filters(&filters).unwrap();

        assert_eq!(
            store.get("filters").unwrap().as_deref(),
            Some(r#"{"genres":[1,4],"type":"TV"}"#)
        );
        let prefs = Preferences::new(store);
        assert_eq!(prefs.saved_filters().unwrap(), Some(filters));
    }

    #[test]
    fn test_malformed_filters() {
        let mut store = MemoryStore::new();
        store.set("filters", "[1,2").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.saved_filters().unwrap(), None);
    }

    #[test]
    fn test_update_filters_resets_page() {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.save_page(7).unwrap();
        assert_eq!(prefs.saved_page().unwrap(), 7);

        let filters = BrowseFilters {
            genres: vec![10],
            media_type: String::new(),
        };
        prefs.update_filters(&filters).unwrap();
        assert_eq!(prefs.saved_page().unwrap(), 1);
    }

    #[test]
    fn test_saved_page_fallbacks() {
        let mut store = MemoryStore::new();
        assert_eq!(Preferences::new(&mut store).saved_page().unwrap(), 1);

        store.set("page", "abc").unwrap();
        assert_eq!(Preferences::new(&mut store).saved_page().unwrap(), 1);

        store.set("page", "0").unwrap();
        assert_eq!(Preferences::new(&mut store).saved_page().unwrap(), 1);

        store.set("page", "12").unwrap();
        assert_eq!(Preferences::new(&mut store).saved_page().unwrap(), 12);
    }

    #[test]
    fn test_filters_is_empty() {
        let mut filters = BrowseFilters::default();
        assert!(filters.is_empty());
        filters.media_type = "OVA".into();
        assert!(!filters.is_empty());
    }
}
