use serde::Deserialize;

use crate::traits::{AnimeCard, AnimeDetails, Character};

/// Shown when the API has no portrait for a character.
pub const DEFAULT_CHARACTER_IMAGE: &str = "/default-character.jpg";

// ── Envelopes ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnimeResponse {
    pub data: Option<JikanAnime>,
}

#[derive(Debug, Deserialize)]
pub struct JikanListResponse {
    #[serde(default)]
    pub data: Vec<JikanAnime>,
    pub pagination: Option<JikanPagination>,
}

#[derive(Debug, Deserialize)]
pub struct JikanCharactersResponse {
    #[serde(default)]
    pub data: Vec<JikanCharacterRole>,
}

#[derive(Debug, Deserialize)]
pub struct JikanPicturesResponse {
    #[serde(default)]
    pub data: Vec<JikanImages>,
}

#[derive(Debug, Deserialize)]
pub struct JikanPagination {
    #[serde(default)]
    pub has_next_page: bool,
    pub last_visible_page: Option<u32>,
}

// ── Anime ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    pub url: Option<String>,
    pub images: Option<JikanImages>,
    pub trailer: Option<JikanTrailer>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub episodes: Option<u32>,
    pub aired: Option<JikanAired>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub synopsis: Option<String>,
    pub studios: Option<Vec<JikanNamed>>,
    pub genres: Option<Vec<JikanNamed>>,
}

/// Image URLs by format; only JPEG is used.
#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanTrailer {
    pub youtube_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    pub from: Option<String>,
}

/// Studio, genre and similar `{mal_id, name}` references.
#[derive(Debug, Deserialize)]
pub struct JikanNamed {
    pub name: String,
}

// ── Characters ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanCharacterRole {
    pub character: JikanCharacter,
}

#[derive(Debug, Deserialize)]
pub struct JikanCharacter {
    pub mal_id: u64,
    pub name: String,
    pub images: Option<JikanImages>,
}

// ── Conversions to shared trait types ───────────────────────────

impl JikanImages {
    pub fn jpg_url(self) -> Option<String> {
        self.jpg.and_then(|set| set.image_url)
    }
}

impl JikanAnime {
    pub fn into_card(self) -> AnimeCard {
        AnimeCard {
            id: self.mal_id,
            title: self.title,
            image_url: self.images.and_then(JikanImages::jpg_url),
            aired_from: self.aired.and_then(|a| a.from),
            media_type: self.media_type,
        }
    }

    /// Build the detail record, keeping at most `limit` characters and
    /// screenshots.
    pub fn into_details(
        self,
        characters: Vec<JikanCharacterRole>,
        pictures: Vec<JikanImages>,
        limit: usize,
    ) -> AnimeDetails {
        let studios = self
            .studios
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.name)
            .collect::<Vec<_>>()
            .join(", ");

        AnimeDetails {
            id: self.mal_id,
            title: self.title,
            image_url: self.images.and_then(JikanImages::jpg_url),
            synopsis: self.synopsis,
            rating: self.rating,
            episodes: self.episodes,
            media_type: self.media_type,
            duration: self.duration,
            studios,
            genres: self
                .genres
                .map(|g| g.into_iter().map(|x| x.name).collect())
                .unwrap_or_default(),
            mal_url: self.url,
            trailer_url: self
                .trailer
                .and_then(|t| t.youtube_id)
                .filter(|id| !id.is_empty())
                .map(|id| format!("https://www.youtube.com/watch?v={id}")),
            characters: characters
                .into_iter()
                .take(limit)
                .map(JikanCharacterRole::into_character)
                .collect(),
            screenshots: pictures
                .into_iter()
                .filter_map(JikanImages::jpg_url)
                .take(limit)
                .collect(),
        }
    }
}

impl JikanCharacterRole {
    pub fn into_character(self) -> Character {
        let c = self.character;
        Character {
            id: c.mal_id,
            name: c.name,
            image_url: c
                .images
                .and_then(JikanImages::jpg_url)
                .unwrap_or_else(|| DEFAULT_CHARACTER_IMAGE.to_string()),
        }
    }
}
