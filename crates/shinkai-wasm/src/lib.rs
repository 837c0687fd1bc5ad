//! Browser bindings: watch-list operations persisted in `window.localStorage`.

use shinkai_core::error::ShinkaiError;
use shinkai_core::models::{AnimeSummary, Category, StatusLabel};
use shinkai_core::store::KeyValueStore;
use shinkai_core::watchlist::WatchList;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = localStorage, js_name = getItem)]
    fn get_item(key: &str) -> Option<String>;

    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = setItem)]
    fn set_item(key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = localStorage, js_name = removeItem)]
    fn remove_item(key: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(message: &str);
}

/// [`KeyValueStore`] backed by the page's `localStorage`.
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ShinkaiError> {
        Ok(get_item(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ShinkaiError> {
        // Throws when the origin's quota is exhausted.
        set_item(key, value).map_err(|e| {
            ShinkaiError::Io(std::io::Error::other(format!(
                "localStorage.setItem({key}) failed: {e:?}"
            )))
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), ShinkaiError> {
        remove_item(key);
        Ok(())
    }
}

/// Move a title into `category` and return its new status label.
#[wasm_bindgen]
pub fn categorize(id: u32, title: &str, image_url: &str, category: &str) -> String {
    categorize_in(LocalStorage, u64::from(id), title, image_url, category)
}

/// Drop a title from `category`; unknown categories are ignored. Storage
/// failures are reported on the console and leave the list unchanged.
#[wasm_bindgen]
pub fn remove(category: &str, id: u32) {
    if let Err(e) = remove_in(LocalStorage, category, u64::from(id)) {
        console_warn(&format!("shinkai: removing {id} from {category} failed: {e}"));
    }
}

#[wasm_bindgen]
pub fn status_of(id: u32) -> String {
    status_in(LocalStorage, u64::from(id))
}

/// JSON array of `{id, title, image}` entries in `category`.
#[wasm_bindgen]
pub fn list(category: &str) -> String {
    list_in(LocalStorage, category)
}

fn categorize_in<S: KeyValueStore>(
    store: S,
    id: u64,
    title: &str,
    image_url: &str,
    category: &str,
) -> String {
    let Some(category) = Category::from_slug(category) else {
        return StatusLabel::UNLISTED.to_string();
    };
    let anime = AnimeSummary::new(id, title, image_url);
    let mut lists = WatchList::new(store);
    match lists.categorize(&anime, category) {
        Ok(label) => label.to_string(),
        // The batch write was rolled back; report whatever is stored now.
        Err(_) => lists.status_of(id).unwrap_or_default().to_string(),
    }
}

/// Whether anything was removed. Unknown categories remove nothing.
fn remove_in<S: KeyValueStore>(store: S, category: &str, id: u64) -> Result<bool, ShinkaiError> {
    match Category::from_slug(category) {
        Some(category) => WatchList::new(store).remove(category, id),
        None => Ok(false),
    }
}

fn status_in<S: KeyValueStore>(store: S, id: u64) -> String {
    WatchList::new(store)
        .status_of(id)
        .unwrap_or_default()
        .to_string()
}

fn list_in<S: KeyValueStore>(store: S, category: &str) -> String {
    let items = Category::from_slug(category)
        .and_then(|c| WatchList::new(store).list(c).ok())
        .unwrap_or_default();
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}
