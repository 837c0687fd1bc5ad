//! Catalog service interface and the shared types it returns.
//!
//! Front ends talk to [`CatalogService`] so they never see wire formats.

use std::future::Future;

/// Read-only anime catalog.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Most popular titles, filtered and paginated.
    fn popular(
        &self,
        query: &BrowseQuery,
    ) -> impl Future<Output = Result<CatalogPage, Self::Error>> + Send;

    /// Search by title.
    fn search(&self, query: &str)
        -> impl Future<Output = Result<Vec<AnimeCard>, Self::Error>> + Send;

    /// Titles airing this season.
    fn airing_now(&self) -> impl Future<Output = Result<Vec<AnimeCard>, Self::Error>> + Send;

    /// Full record for one title.
    fn anime_details(
        &self,
        anime_id: u64,
    ) -> impl Future<Output = Result<AnimeDetails, Self::Error>> + Send;

    /// Full record for a random title.
    fn random_anime(&self) -> impl Future<Output = Result<AnimeDetails, Self::Error>> + Send;
}

/// Parameters for the popular listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseQuery {
    /// 1-based page number.
    pub page: u32,
    pub genres: Vec<u32>,
    pub media_type: Option<String>,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            genres: Vec::new(),
            media_type: None,
        }
    }
}

impl BrowseQuery {
    /// Query-string pairs; genres and type are only sent when set.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("order_by", "popularity".to_string()),
            ("page", self.page.max(1).to_string()),
        ];
        if !self.genres.is_empty() {
            let genres: Vec<String> = self.genres.iter().map(u32::to_string).collect();
            params.push(("genres", genres.join(",")));
        }
        if let Some(ref media_type) = self.media_type {
            if !media_type.is_empty() {
                params.push(("type", media_type.clone()));
            }
        }
        params
    }
}

/// A title as shown in listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimeCard {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    /// Start of airing, ISO 8601 as sent by the API.
    pub aired_from: Option<String>,
    pub media_type: Option<String>,
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<AnimeCard>,
    pub has_next: bool,
}

/// A character shown on the detail page.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub image_url: String,
}

/// Full detail record for one title.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimeDetails {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
    pub rating: Option<String>,
    pub episodes: Option<u32>,
    pub media_type: Option<String>,
    pub duration: Option<String>,
    /// Studio names joined with `", "`.
    pub studios: String,
    pub genres: Vec<String>,
    pub mal_url: Option<String>,
    pub trailer_url: Option<String>,
    pub characters: Vec<Character>,
    pub screenshots: Vec<String>,
}
