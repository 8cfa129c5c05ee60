//! Display ordering of normalized records

use super::content::SearchResult;

/// Sort results by name, case-insensitively
///
/// The sort is stable: records with equal names keep their input order,
/// so ranking is deterministic and idempotent.
pub fn rank(mut results: Vec<SearchResult>) -> Vec<SearchResult> {
    results.sort_by_cached_key(|result| result.name.to_lowercase());
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, artist: &str) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sorts_case_insensitively() {
        let results = rank(vec![named("banana", ""), named("Apple", ""), named("cherry", "")]);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_stable_on_equal_names() {
        let results = rank(vec![
            named("Same", "first"),
            named("same", "second"),
            named("SAME", "third"),
        ]);
        let artists: Vec<&str> = results.iter().map(|r| r.artist.as_str()).collect();
        assert_eq!(artists, ["first", "second", "third"]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![named("b", "1"), named("A", "2"), named("b", "3")];
        let once = rank(input);
        let twice = rank(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
