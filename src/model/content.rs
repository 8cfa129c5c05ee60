//! The normalized search result record

use std::fmt;

/// A single normalized record from the catalog search endpoint
///
/// Field coalescing from the raw payload happens in `parser`; here every
/// field already carries its final value. An empty `artist` is a valid
/// value (the presentation layer substitutes its own "Unknown" label), and
/// `price == 0.0` means free, which is likewise a display concern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub artist: String,
    pub store_url: String,
    pub price: f64,
    pub currency: String,
    pub genre: String,
    pub type_label: String,
    pub image_small: String,
    pub image_large: String,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artist = if self.artist.is_empty() {
            "None"
        } else {
            self.artist.as_str()
        };
        write!(
            f,
            "Result - Kind: {}, Name: {}, ArtistName: {}",
            self.type_label, self.name, artist
        )
    }
}
