mod anime;
mod category;

pub use anime::AnimeSummary;
pub use category::{Category, StatusLabel};
