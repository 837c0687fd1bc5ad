use serde::{Deserialize, Serialize};

/// Minimal record kept for list membership.
///
/// Detail fields (synopsis, rating, characters, ...) are only known at fetch
/// time and are dropped before a title is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeSummary {
    /// MyAnimeList id, assigned by the catalog source.
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Cover image URL; empty when the source had none.
    #[serde(rename = "image", default)]
    pub image_url: String,
}

impl AnimeSummary {
    pub fn new(id: u64, title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}
