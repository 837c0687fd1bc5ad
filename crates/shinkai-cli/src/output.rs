//! Plain-text rendering of listings and detail pages.

use std::io::{self, Write};

use chrono::DateTime;
use shinkai_api::catalog::{self, GENRES};
use shinkai_api::traits::{AnimeCard, AnimeDetails};
use shinkai_core::models::{AnimeSummary, Category, StatusLabel};
use shinkai_core::preferences::BrowseFilters;

pub const EMPTY_LIST: &str = "It's empty so far...";

/// `2024-04-06T00:00:00+00:00` -> `2024-04-06`.
pub fn aired_date(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

pub fn cards(out: &mut impl Write, items: &[AnimeCard]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "No results.");
    }
    for card in items {
        write!(out, "{:>7}  {}", card.id, card.title)?;
        let mut extra = Vec::new();
        if let Some(kind) = &card.media_type {
            extra.push(kind.clone());
        }
        if let Some(date) = card.aired_from.as_deref().and_then(aired_date) {
            extra.push(date);
        }
        if !extra.is_empty() {
            write!(out, " ({})", extra.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn summaries(out: &mut impl Write, items: &[AnimeSummary]) -> io::Result<()> {
    for anime in items {
        writeln!(out, "{:>7}  {}", anime.id, anime.title)?;
    }
    Ok(())
}

pub fn watch_list(
    out: &mut impl Write,
    category: Category,
    items: &[AnimeSummary],
) -> io::Result<()> {
    writeln!(out, "{category} ({})", items.len())?;
    if items.is_empty() {
        writeln!(out, "  {EMPTY_LIST}")
    } else {
        summaries(out, items)
    }
}

pub fn filters(out: &mut impl Write, filters: &BrowseFilters) -> io::Result<()> {
    if filters.is_empty() {
        return Ok(());
    }
    let mut parts = Vec::new();
    if !filters.genres.is_empty() {
        let names: Vec<&str> = filters
            .genres
            .iter()
            .filter_map(|&id| catalog::genre_name(id))
            .collect();
        parts.push(format!("genres: {}", names.join(", ")));
    }
    if !filters.media_type.is_empty() {
        parts.push(format!("type: {}", filters.media_type));
    }
    writeln!(out, "Filters: {}", parts.join("; "))
}

pub fn page_footer(out: &mut impl Write, page: u32, has_next: bool) -> io::Result<()> {
    let more = if has_next { ", more with --next" } else { "" };
    writeln!(out, "-- page {page}{more} --")
}

pub fn details(out: &mut impl Write, anime: &AnimeDetails, status: StatusLabel) -> io::Result<()> {
    writeln!(out, "{} [{}]", anime.title, anime.id)?;
    writeln!(out, "Status: {status}")?;

    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
    writeln!(out, "Type: {}", field(&anime.media_type))?;
    match anime.episodes {
        Some(n) => writeln!(out, "Episodes: {n}")?,
        None => writeln!(out, "Episodes: -")?,
    }
    writeln!(out, "Duration: {}", field(&anime.duration))?;
    writeln!(out, "Rating: {}", field(&anime.rating))?;
    if !anime.studios.is_empty() {
        writeln!(out, "Studios: {}", anime.studios)?;
    }
    if !anime.genres.is_empty() {
        writeln!(out, "Genres: {}", anime.genres.join(", "))?;
    }
    if let Some(url) = &anime.mal_url {
        writeln!(out, "MyAnimeList: {url}")?;
    }
    if let Some(url) = &anime.trailer_url {
        writeln!(out, "Trailer: {url}")?;
    }
    if let Some(synopsis) = &anime.synopsis {
        writeln!(out)?;
        writeln!(out, "{synopsis}")?;
    }
    if !anime.characters.is_empty() {
        writeln!(out)?;
        writeln!(out, "Characters:")?;
        for c in &anime.characters {
            writeln!(out, "  {}", c.name)?;
        }
    }
    if !anime.screenshots.is_empty() {
        writeln!(out)?;
        writeln!(out, "Pictures:")?;
        for url in &anime.screenshots {
            writeln!(out, "  {url}")?;
        }
    }
    Ok(())
}

pub fn genres(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Genres:")?;
    for genre in GENRES {
        writeln!(out, "{:>5}  {}", genre.id, genre.name)?;
    }
    writeln!(out)?;
    writeln!(out, "Types: {}", catalog::ANIME_TYPES.join(", "))
}
