//! Result deduplication by exact URL.
//!
//! The first occurrence of a URL wins; later duplicates are dropped even
//! if they score higher. Order of the survivors is preserved.

use std::collections::HashSet;

/// Keep the first item for every distinct URL, preserving input order.
pub fn dedup_first_by_url<T>(items: Vec<T>, url_of: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(url_of(item).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let items = vec![("https://a.com", 40), ("https://b.com", 10), ("https://a.com", 90)];
        let deduped = dedup_first_by_url(items, |(url, _)| *url);
        assert_eq!(deduped, vec![("https://a.com", 40), ("https://b.com", 10)]);
    }

    #[test]
    fn urls_are_compared_exactly() {
        // Trailing slash and scheme differences are distinct URLs.
        let items = vec!["https://a.com", "https://a.com/", "http://a.com"];
        let deduped = dedup_first_by_url(items, |url| *url);
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn empty_input() {
        let deduped = dedup_first_by_url(Vec::<&str>::new(), |url| *url);
        assert!(deduped.is_empty());
    }
}
