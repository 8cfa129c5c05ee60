//! Decoding of the raw endpoint payload into normalized records
//!
//! The endpoint returns `{ resultCount, results }` where each element is a
//! loosely-typed record: tracks, collections, apps and books all share the
//! array and provide overlapping optional fields. Decoding never fails to
//! the caller: a malformed payload yields an empty list, a malformed
//! element is skipped. Both degrade with a warning rather than blocking
//! the visible results.

use serde::Deserialize;

use super::content::SearchResult;

/// Top-level search payload
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default)]
    result_count: u32,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// One raw record with every field the endpoint may or may not send
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    artist_name: Option<String>,
    kind: Option<String>,
    currency: Option<String>,
    artwork_url60: Option<String>,
    artwork_url100: Option<String>,
    track_name: Option<String>,
    track_price: Option<f64>,
    track_view_url: Option<String>,
    collection_name: Option<String>,
    collection_view_url: Option<String>,
    collection_price: Option<f64>,
    price: Option<f64>,
    primary_genre_name: Option<String>,
    genres: Option<Vec<String>>,
}

impl RawRecord {
    /// Coalesce the overlapping optional fields into one normalized record.
    /// Precedence: the track-specific field wins, then the collection
    /// field, then the generic one, then empty/zero.
    fn normalize(self) -> SearchResult {
        let genre = match (self.primary_genre_name, self.genres) {
            (Some(genre), _) => genre,
            (None, Some(genres)) => genres.join(", "),
            (None, None) => String::new(),
        };
        let kind = self.kind.unwrap_or_else(|| "audiobook".to_string());

        SearchResult {
            name: self.track_name.or(self.collection_name).unwrap_or_default(),
            artist: self.artist_name.unwrap_or_default(),
            store_url: self
                .track_view_url
                .or(self.collection_view_url)
                .unwrap_or_default(),
            price: self
                .track_price
                .or(self.collection_price)
                .or(self.price)
                .unwrap_or(0.0),
            currency: self.currency.unwrap_or_default(),
            genre,
            type_label: kind_label(&kind),
            image_small: self.artwork_url60.unwrap_or_default(),
            image_large: self.artwork_url100.unwrap_or_default(),
        }
    }
}

/// Display label for a raw `kind` value; unrecognized kinds pass through
fn kind_label(kind: &str) -> String {
    match kind {
        "album" => "Album",
        "audiobook" => "AudioBook",
        "book" => "Book",
        "ebook" => "E-Book",
        "feature-movie" => "Movie",
        "music-video" => "Music Video",
        "podcast" => "Podcast",
        "software" => "App",
        "song" => "Song",
        "tv-episode" => "TV Episode",
        other => other,
    }
    .to_string()
}

/// Decode a raw search payload into normalized records
pub fn parse(data: &[u8]) -> Vec<SearchResult> {
    let payload: RawPayload = match serde_json::from_slice(data) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode search payload");
            return Vec::new();
        }
    };

    tracing::debug!(result_count = payload.result_count, "Decoded search payload");

    payload
        .results
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => Some(record.normalize()),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed search record");
                None
            }
        })
        .collect()
}
