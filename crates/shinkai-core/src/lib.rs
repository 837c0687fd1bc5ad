pub mod airing;
#[cfg(feature = "native")]
pub mod config;
pub mod error;
pub mod models;
pub mod preferences;
mod records;
pub mod store;
pub mod watchlist;
