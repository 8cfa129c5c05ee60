//! Core type definitions for the search core

use std::time::Duration;

use super::content::SearchResult;

/// Catalog category filter applied to a search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    All,
    Music,
    Software,
    EBook,
}

impl Category {
    /// Endpoint `entity` filter token; `None` means no filter is appended
    pub fn entity_token(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            Category::Music => Some("musicTrack"),
            Category::Software => Some("software"),
            Category::EBook => Some("ebook"),
        }
    }
}

/// Phase of the single logical "current search"
///
/// Exactly one variant holds at any instant. Only the coordinator writes it;
/// observers receive read-only snapshots.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
    #[default]
    NotSearched,
    Loading,
    NoResults,
    Results(Vec<SearchResult>),
}

/// Completion outcome of a search that was not superseded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Ok,
    NetworkError,
}

/// Search endpoint configuration
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub base_url: String,
    pub result_limit: u32,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com/search".to_string(),
            result_limit: 200,
            timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tokens() {
        assert_eq!(Category::All.entity_token(), None);
        assert_eq!(Category::Music.entity_token(), Some("musicTrack"));
        assert_eq!(Category::Software.entity_token(), Some("software"));
        assert_eq!(Category::EBook.entity_token(), Some("ebook"));
    }

    #[test]
    fn test_initial_state_is_not_searched() {
        assert_eq!(SearchState::default(), SearchState::NotSearched);
    }
}
