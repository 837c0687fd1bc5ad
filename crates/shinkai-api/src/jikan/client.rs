use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::JikanError;
use super::types::{
    JikanAnime, JikanAnimeResponse, JikanCharacterRole, JikanCharactersResponse, JikanImages,
    JikanListResponse, JikanPicturesResponse,
};
use crate::traits::{AnimeCard, AnimeDetails, BrowseQuery, CatalogPage, CatalogService};

pub const BASE_URL: &str = "https://api.jikan.moe/v4";

/// Characters and screenshots kept on a detail record.
const DETAIL_LIMIT: usize = 6;

const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Jikan v4 REST client (public, unauthenticated).
pub struct JikanClient {
    base_url: String,
    http: Client,
    retry_delay: Duration,
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JikanClient {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            http: Client::new(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Client against another Jikan-compatible host, with a request timeout.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, JikanError> {
        let parsed = Url::parse(base_url).map_err(|e| JikanError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JikanError::InvalidBaseUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// How long to wait before the single retry after HTTP 429.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(
        resp: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, JikanError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(JikanError::NotFound(path.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(JikanError::RateLimited);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), path, "Jikan API error");
        Err(JikanError::Api {
            status: status.as_u16(),
            message: body,
        })
    }

    /// GET `path` and decode the JSON body. A 429 is retried once after
    /// `retry_delay`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, JikanError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "GET");

        let mut resp = self.http.get(&url).query(query).send().await?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(path, "rate limited, retrying once");
            tokio::time::sleep(self.retry_delay).await;
            resp = self.http.get(&url).query(query).send().await?;
        }

        let resp = Self::check_response(resp, path).await?;
        resp.json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))
    }

    async fn characters(&self, anime_id: u64) -> Result<Vec<JikanCharacterRole>, JikanError> {
        let resp: JikanCharactersResponse = self
            .get_json(&format!("/anime/{anime_id}/characters"), &[])
            .await?;
        Ok(resp.data)
    }

    async fn pictures(&self, anime_id: u64) -> Result<Vec<JikanImages>, JikanError> {
        let resp: JikanPicturesResponse = self
            .get_json(&format!("/anime/{anime_id}/pictures"), &[])
            .await?;
        Ok(resp.data)
    }

    /// Fetch a detail record's characters and pictures, then assemble it.
    async fn complete_details(
        &self,
        anime: JikanAnime,
    ) -> Result<AnimeDetails, JikanError> {
        let (characters, pictures) =
            futures::try_join!(self.characters(anime.mal_id), self.pictures(anime.mal_id))?;
        Ok(anime.into_details(characters, pictures, DETAIL_LIMIT))
    }

    async fn list(&self, path: &str, query: &[(&str, String)]) -> Result<CatalogPage, JikanError> {
        let resp: JikanListResponse = self.get_json(path, query).await?;
        Ok(CatalogPage {
            has_next: resp.pagination.is_some_and(|p| p.has_next_page),
            items: resp.data.into_iter().map(|a| a.into_card()).collect(),
        })
    }
}

impl CatalogService for JikanClient {
    type Error = JikanError;

    async fn popular(&self, query: &BrowseQuery) -> Result<CatalogPage, JikanError> {
        let params = query.to_params();
        let page = self.list("/anime", &params).await?;
        tracing::debug!(page = query.page, results = page.items.len(), "fetched popular");
        Ok(page)
    }

    async fn search(&self, query: &str) -> Result<Vec<AnimeCard>, JikanError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let page = self.list("/anime", &[("q", query.to_string())]).await?;
        Ok(page.items)
    }

    async fn airing_now(&self) -> Result<Vec<AnimeCard>, JikanError> {
        let page = self.list("/seasons/now", &[]).await?;
        Ok(page.items)
    }

    async fn anime_details(&self, anime_id: u64) -> Result<AnimeDetails, JikanError> {
        let resp: JikanAnimeResponse = self.get_json(&format!("/anime/{anime_id}"), &[]).await?;
        let anime = resp
            .data
            .ok_or_else(|| JikanError::NotFound(format!("anime {anime_id}")))?;
        self.complete_details(anime).await
    }

    async fn random_anime(&self) -> Result<AnimeDetails, JikanError> {
        let resp: JikanAnimeResponse = self.get_json("/random/anime", &[]).await?;
        let anime = resp
            .data
            .ok_or_else(|| JikanError::NotFound("random anime".into()))?;
        self.complete_details(anime).await
    }
}
