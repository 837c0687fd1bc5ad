pub mod catalog;
pub mod jikan;
pub mod traits;
