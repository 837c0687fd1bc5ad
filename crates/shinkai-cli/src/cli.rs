use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shinkai_api::catalog;
use shinkai_core::models::Category;

/// Browse the anime catalog and keep personal watch-lists.
#[derive(Debug, Parser)]
#[command(name = "shinkai", version)]
pub struct Cli {
    /// Database file (defaults to the platform data directory).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Most popular titles, filtered by the saved genre/type selection.
    Popular(PopularArgs),
    /// Search titles by name.
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Titles airing this season (cached after the first fetch).
    Airing {
        /// Ignore the cached listing and fetch again.
        #[arg(long)]
        refresh: bool,
    },
    /// Details of a random title.
    Random,
    /// Details of one title.
    Show { id: u64 },
    /// Genre ids and media types usable as filters.
    Genres,
    /// Put a title into a watch-list, taking it out of the others.
    Add {
        id: u64,
        #[arg(value_parser = parse_category)]
        category: Category,
    },
    /// Take a title out of a watch-list.
    Remove {
        #[arg(value_parser = parse_category)]
        category: Category,
        id: u64,
    },
    /// Which watch-list a title is in.
    Status { id: u64 },
    /// Print one watch-list, or all of them.
    List {
        #[arg(value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Show or change the color theme.
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Open a title's MyAnimeList page in the browser.
    Open { id: u64 },
}

#[derive(Debug, Args)]
pub struct PopularArgs {
    /// Page to show; remembered for the next run.
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with_all = ["next", "prev"]
    )]
    pub page: Option<u32>,

    /// Go one page forward from the remembered page.
    #[arg(long, conflicts_with = "prev")]
    pub next: bool,

    /// Go one page back from the remembered page.
    #[arg(long)]
    pub prev: bool,

    /// Genre id to filter by (repeatable). Replaces the saved genres.
    #[arg(short, long = "genre", value_parser = parse_genre)]
    pub genres: Vec<u32>,

    /// Media type to filter by (TV, Movie, OVA, ONA, Special, Music).
    #[arg(short = 't', long = "type", value_parser = parse_media_type)]
    pub media_type: Option<String>,

    /// Drop the saved filters.
    #[arg(long, conflicts_with_all = ["genres", "media_type"])]
    pub clear_filters: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Dark,
    Light,
    Toggle,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_slug(s).ok_or_else(|| {
        format!("unknown category '{s}' (expected planned, watching, completed or dropped)")
    })
}

fn parse_genre(s: &str) -> Result<u32, String> {
    let id: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("genre must be a numeric id, got '{s}'"))?;
    match catalog::genre_name(id) {
        Some(_) => Ok(id),
        None => Err(format!("unknown genre id {id} (see `shinkai genres`)")),
    }
}

fn parse_media_type(s: &str) -> Result<String, String> {
    catalog::canonical_type(s)
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "unknown type '{s}' (expected one of {})",
                catalog::ANIME_TYPES.join(", ")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("shinkai").chain(args.iter().copied()))
    }

    #[test]
    fn test_add_parses_category_slug() {
        let cli = parse(&["add", "42", "Watching"]).unwrap();
        match cli.command {
            Command::Add { id, category } => {
                assert_eq!(id, 42);
                assert_eq!(category, Category::Watching);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(parse(&["add", "42", "someday"]).is_err());
        assert!(parse(&["list", "favorites"]).is_err());
    }

    #[test]
    fn test_popular_filters() {
        let cli = parse(&["popular", "-g", "1", "--genre", "22", "--type", "movie"]).unwrap();
        let Command::Popular(args) = cli.command else {
            panic!("expected popular");
        };
        assert_eq!(args.genres, vec![1, 22]);
        assert_eq!(args.media_type.as_deref(), Some("Movie"));
        assert!(args.page.is_none());
    }

    #[test]
    fn test_popular_rejects_bad_filters() {
        assert!(parse(&["popular", "--genre", "9999"]).is_err());
        assert!(parse(&["popular", "--genre", "action"]).is_err());
        assert!(parse(&["popular", "--type", "podcast"]).is_err());
        assert!(parse(&["popular", "--page", "0"]).is_err());
        assert!(parse(&["popular", "--page", "2", "--next"]).is_err());
        assert!(parse(&["popular", "--clear-filters", "--genre", "1"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["list", "--db", "/tmp/x.db", "-v"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::List { category: None }));
    }

    #[test]
    fn test_search_joins_words() {
        let cli = parse(&["search", "cowboy", "bebop"]).unwrap();
        let Command::Search { query } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(query.join(" "), "cowboy bebop");
        assert!(parse(&["search"]).is_err());
    }
}
