//! JSON encoding of stored anime arrays.
//!
//! Arrays are written in the layout the Shinkai web app used in
//! `localStorage`, so data exported from a browser can be read back as-is.

use serde::Serialize;
use serde_json::Value;

use crate::models::AnimeSummary;

/// One stored element: the summary plus the detail fields, written blank.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord<'a> {
    #[serde(flatten)]
    anime: &'a AnimeSummary,
    synopsis: &'static str,
    rating: &'static str,
    episodes: u32,
    #[serde(rename = "type")]
    media_type: &'static str,
    duration: &'static str,
    studios: &'static str,
    genres: [&'static str; 0],
    mal_url: &'static str,
    trailer_url: Option<&'static str>,
    characters: [Value; 0],
    screenshots: [&'static str; 0],
}

impl<'a> StoredRecord<'a> {
    fn blank(anime: &'a AnimeSummary) -> Self {
        Self {
            anime,
            synopsis: "",
            rating: "",
            episodes: 0,
            media_type: "",
            duration: "",
            studios: "",
            genres: [],
            mal_url: "",
            trailer_url: None,
            characters: [],
            screenshots: [],
        }
    }
}

pub(crate) fn encode(items: &[AnimeSummary]) -> Result<String, serde_json::Error> {
    let records: Vec<StoredRecord<'_>> = items.iter().map(StoredRecord::blank).collect();
    serde_json::to_string(&records)
}

/// Decode a stored array. Returns `None` when the content is not a JSON array;
/// elements that don't look like an anime record are skipped.
pub(crate) fn decode(raw: &str) -> Option<Vec<AnimeSummary>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(anime) => Some(anime),
                Err(e) => {
                    tracing::debug!("skipping malformed stored record: {e}");
                    None
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_writes_blank_detail_fields() {
        let json = encode(&[AnimeSummary::new(1, "X", "")]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let record = &value[0];
        assert_eq!(record["id"], 1);
        assert_eq!(record["title"], "X");
        assert_eq!(record["image"], "");
        assert_eq!(record["synopsis"], "");
        assert_eq!(record["episodes"], 0);
        assert_eq!(record["type"], "");
        assert_eq!(record["malUrl"], "");
        assert!(record["trailerUrl"].is_null());
        assert_eq!(record["genres"], serde_json::json!([]));
        assert_eq!(record["characters"], serde_json::json!([]));
    }

    #[test]
    fn test_decode_browser_export() {
        let raw = r#"[{"id":52991,"title":"Sousou no Frieren","image":"https://cdn.myanimelist.net/images/anime/1015/138006.jpg","synopsis":"","rating":"","episodes":0,"type":"","duration":"","studios":"","genres":[],"malUrl":"","trailerUrl":null,"characters":[],"screenshots":[]}]"#;
        let items = decode(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 52991);
        assert_eq!(items[0].title, "Sousou no Frieren");
        assert!(items[0].image_url.ends_with("138006.jpg"));
    }

    #[test]
    fn test_decode_missing_image() {
        let items = decode(r#"[{"id":5,"title":"Bebop"}]"#).unwrap();
        assert_eq!(items, vec![AnimeSummary::new(5, "Bebop", "")]);
    }

    #[test]
    fn test_decode_rejects_non_arrays() {
        assert!(decode("not json").is_none());
        assert!(decode("null").is_none());
        assert!(decode(r#"{"id":1}"#).is_none());
    }

    #[test]
    fn test_decode_skips_bad_elements() {
        let items = decode(r#"[{"id":1,"title":"A"},"junk",{"title":"no id"}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }
}
