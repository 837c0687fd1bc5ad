use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use shinkai_api::jikan::JikanClient;
use shinkai_api::traits::{AnimeCard, AnimeDetails, BrowseQuery, CatalogService};
use shinkai_core::airing::AiringCache;
use shinkai_core::config::AppConfig;
use shinkai_core::error::ShinkaiError;
use shinkai_core::models::{AnimeSummary, Category};
use shinkai_core::preferences::{BrowseFilters, Preferences, Theme};
use shinkai_core::store::{KeyValueStore, SqliteStore};
use shinkai_core::watchlist::WatchList;
use thiserror::Error;
use tracing::{debug, info};

use crate::cli::{Command, PopularArgs, ThemeAction};
use crate::output;

const MAL_ANIME_URL: &str = "https://myanimelist.net/anime";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ShinkaiError),

    #[error("catalog request failed: {0}")]
    Api(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open {url}: {source}")]
    Browser {
        url: String,
        source: std::io::Error,
    },
}

fn api_err(e: impl std::error::Error) -> CliError {
    CliError::Api(e.to_string())
}

fn summary_of_card(card: AnimeCard) -> AnimeSummary {
    AnimeSummary::new(card.id, card.title, card.image_url.unwrap_or_default())
}

fn summary_of_details(details: &AnimeDetails) -> AnimeSummary {
    AnimeSummary::new(
        details.id,
        details.title.clone(),
        details.image_url.clone().unwrap_or_default(),
    )
}

/// Command dispatcher over a key-value store and a catalog backend.
pub struct App<S, C> {
    store: S,
    catalog: C,
}

impl App<SqliteStore, JikanClient> {
    /// Open the database and build the Jikan client from `config`.
    pub fn open(config: &AppConfig, db: Option<PathBuf>) -> Result<Self, CliError> {
        let path = db.unwrap_or_else(|| config.resolved_db_path());
        AppConfig::ensure_parent(&path)?;
        let store = SqliteStore::open(&path)?;

        let client = JikanClient::with_base_url(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )
        .map_err(api_err)?
        .with_retry_delay(Duration::from_millis(config.api.retry_delay_ms));

        Ok(Self::new(store, client))
    }
}

impl<S: KeyValueStore, C: CatalogService> App<S, C> {
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    pub async fn run(&mut self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        debug!(?command, "running command");
        match command {
            Command::Popular(args) => self.popular(args, out).await,
            Command::Search { query } => self.search(&query.join(" "), out).await,
            Command::Airing { refresh } => self.airing(refresh, out).await,
            Command::Random => {
                let details = self.catalog.random_anime().await.map_err(api_err)?;
                self.print_details(&details, out)
            }
            Command::Show { id } => {
                let details = self.catalog.anime_details(id).await.map_err(api_err)?;
                self.print_details(&details, out)
            }
            Command::Genres => Ok(output::genres(out)?),
            Command::Add { id, category } => self.add(id, category, out).await,
            Command::Remove { category, id } => self.remove(category, id, out),
            Command::Status { id } => {
                let status = WatchList::new(&mut self.store).status_of(id)?;
                writeln!(out, "{status}")?;
                Ok(())
            }
            Command::List { category } => self.list(category, out),
            Command::Theme { action } => self.theme(action, out),
            Command::Open { id } => open_in_browser(id, out),
        }
    }

    async fn popular(&mut self, args: PopularArgs, out: &mut impl Write) -> Result<(), CliError> {
        let mut prefs = Preferences::new(&mut self.store);
        let saved = prefs.saved_filters()?.unwrap_or_default();

        let mut filters = if args.clear_filters {
            BrowseFilters::default()
        } else {
            saved.clone()
        };
        if !args.genres.is_empty() {
            filters.genres = args.genres;
        }
        if let Some(media_type) = args.media_type {
            filters.media_type = media_type;
        }
        if filters != saved {
            info!(?filters, "browse filters changed");
            prefs.update_filters(&filters)?;
        }

        let current = prefs.saved_page()?;
        let page = match args.page {
            Some(page) => page,
            None if args.next => current.saturating_add(1),
            None if args.prev => current.saturating_sub(1).max(1),
            None => current,
        };
        if page != current {
            prefs.save_page(page)?;
        }

        let query = BrowseQuery {
            page,
            genres: filters.genres.clone(),
            media_type: (!filters.media_type.is_empty()).then(|| filters.media_type.clone()),
        };
        let result = self.catalog.popular(&query).await.map_err(api_err)?;

        output::filters(out, &filters)?;
        output::cards(out, &result.items)?;
        output::page_footer(out, page, result.has_next)?;
        Ok(())
    }

    async fn search(&mut self, query: &str, out: &mut impl Write) -> Result<(), CliError> {
        let items = self.catalog.search(query).await.map_err(api_err)?;
        output::cards(out, &items)?;
        Ok(())
    }

    async fn airing(&mut self, refresh: bool, out: &mut impl Write) -> Result<(), CliError> {
        let mut cache = AiringCache::new(&mut self.store);
        if refresh {
            cache.clear()?;
        }

        let items = match cache.load()? {
            Some(items) => {
                debug!(count = items.len(), "airing listing served from cache");
                items
            }
            None => {
                let cards = self.catalog.airing_now().await.map_err(api_err)?;
                let items: Vec<AnimeSummary> = cards.into_iter().map(summary_of_card).collect();
                cache.store(&items)?;
                info!(count = items.len(), "cached airing listing");
                items
            }
        };

        if items.is_empty() {
            writeln!(out, "No results.")?;
        } else {
            output::summaries(out, &items)?;
        }
        Ok(())
    }

    async fn add(
        &mut self,
        id: u64,
        category: Category,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        let details = self.catalog.anime_details(id).await.map_err(api_err)?;
        let anime = summary_of_details(&details);
        let status = WatchList::new(&mut self.store).categorize(&anime, category)?;
        writeln!(out, "{}: {status}", anime.title)?;
        Ok(())
    }

    fn remove(
        &mut self,
        category: Category,
        id: u64,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        if WatchList::new(&mut self.store).remove(category, id)? {
            writeln!(out, "Removed {id} from {category}")?;
        } else {
            writeln!(out, "{id} is not in {category}")?;
        }
        Ok(())
    }

    fn list(&mut self, category: Option<Category>, out: &mut impl Write) -> Result<(), CliError> {
        let lists = WatchList::new(&mut self.store);
        match category {
            Some(category) => output::watch_list(out, category, &lists.list(category)?)?,
            None => {
                let state = lists.state()?;
                for (i, category) in Category::ALL.into_iter().enumerate() {
                    if i > 0 {
                        writeln!(out)?;
                    }
                    output::watch_list(out, category, state.get(category))?;
                }
            }
        }
        Ok(())
    }

    fn theme(&mut self, action: Option<ThemeAction>, out: &mut impl Write) -> Result<(), CliError> {
        let mut prefs = Preferences::new(&mut self.store);
        let theme = match action {
            None => prefs.effective_theme()?,
            Some(ThemeAction::Toggle) => prefs.toggle_theme()?,
            Some(explicit) => {
                let theme = if explicit == ThemeAction::Light {
                    Theme::Light
                } else {
                    Theme::Dark
                };
                prefs.save_theme(theme)?;
                theme
            }
        };
        writeln!(out, "Theme: {theme}")?;
        Ok(())
    }

    fn print_details(
        &mut self,
        details: &AnimeDetails,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        let status = WatchList::new(&mut self.store).status_of(details.id)?;
        output::details(out, details, status)?;
        Ok(())
    }
}

fn open_in_browser(id: u64, out: &mut impl Write) -> Result<(), CliError> {
    let url = format!("{MAL_ANIME_URL}/{id}");
    open::that(&url).map_err(|source| CliError::Browser {
        url: url.clone(),
        source,
    })?;
    writeln!(out, "Opened {url}")?;
    Ok(())
}
