use serde::{Deserialize, Serialize};

/// One of the four mutually exclusive watch-list buckets.
///
/// Declaration order is the priority order used when looking up a title's
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Planned,
    Watching,
    Completed,
    Dropped,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Planned,
        Self::Watching,
        Self::Completed,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }

    /// Lowercase identifier used on the command line and in the wasm API.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s))
    }

    /// Key-value store key holding this category's JSON array.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Planned => "plannedAnime",
            Self::Watching => "watchingAnime",
            Self::Completed => "completedAnime",
            Self::Dropped => "droppedAnime",
        }
    }

    /// Human-readable status label shown once a title is in this category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "📌 Planned",
            Self::Watching => "📺 Watching",
            Self::Completed => "✅ Completed",
            Self::Dropped => "❌ Dropped",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a title currently sits, as presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLabel {
    #[default]
    Unlisted,
    Listed(Category),
}

impl StatusLabel {
    pub const UNLISTED: &'static str = "Add to the list";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlisted => Self::UNLISTED,
            Self::Listed(category) => category.label(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Unlisted => None,
            Self::Listed(category) => Some(*category),
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
