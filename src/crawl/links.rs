// src/crawl/links.rs
// =============================================================================
// The bounded list of collected links.
//
// Two collections travel together:
// - entries: the formatted URLs, in discovery order until sort() is called
// - seen:    the RAW absolute URLs, used for duplicate checks
//
// Dedup has to look at the raw URL: two different raw URLs never format to
// the same entry, but a formatted entry with a query string no longer looks
// like the URL it came from.
// =============================================================================

use std::collections::HashSet;
use std::io::{self, Write};

use crate::format::format_url;

#[derive(Debug, Clone)]
pub struct LinkList {
    capacity: usize,
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl LinkList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// True if this raw absolute URL was already collected
    pub fn contains(&self, raw_url: &str) -> bool {
        self.seen.contains(raw_url)
    }

    /// Formats and appends a raw absolute URL
    ///
    /// Returns false (and changes nothing) if the list is full or the URL
    /// is a duplicate.
    pub fn push(&mut self, raw_url: String) -> bool {
        if self.is_full() || self.contains(&raw_url) {
            return false;
        }

        self.entries.push(format_url(&raw_url));
        self.seen.insert(raw_url);
        true
    }

    /// Puts the formatted entries in ascending lexicographic order
    pub fn sort(&mut self) {
        self.entries.sort();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Writes one entry per line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.entries() {
            writeln!(out, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_formats_entry() {
        let mut links = LinkList::with_capacity(5);
        assert!(links.push("https://x.test/p?b=2&a=1".to_string()));
        assert_eq!(links.entries(), ["https://x.test/p\n\ta=1\n\tb=2"]);
    }

    #[test]
    fn test_dedup_uses_raw_url() {
        let mut links = LinkList::with_capacity(5);
        assert!(links.push("https://x.test/p?b=2&a=1".to_string()));
        assert!(links.contains("https://x.test/p?b=2&a=1"));
        assert!(!links.push("https://x.test/p?b=2&a=1".to_string()));
        // Same parameters, different raw order: a different URL
        assert!(links.push("https://x.test/p?a=1&b=2".to_string()));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_stops_at_capacity() {
        let mut links = LinkList::with_capacity(2);
        assert!(links.push("https://a.test/".to_string()));
        assert!(links.push("https://b.test/".to_string()));
        assert!(links.is_full());
        assert!(!links.push("https://c.test/".to_string()));
        assert_eq!(links.len(), 2);
        assert!(!links.contains("https://c.test/"));
    }

    #[test]
    fn test_zero_capacity_is_always_full() {
        let mut links = LinkList::with_capacity(0);
        assert!(links.is_full());
        assert!(!links.push("https://a.test/".to_string()));
        assert!(links.is_empty());
    }

    #[test]
    fn test_sort_orders_entries() {
        let mut links = LinkList::with_capacity(5);
        for url in ["https://c.test/", "https://a.test/", "https://b.test/"] {
            links.push(url.to_string());
        }
        links.sort();
        assert_eq!(
            links.entries(),
            ["https://a.test/", "https://b.test/", "https://c.test/"]
        );
    }

    #[test]
    fn test_write_to_prints_one_entry_per_line() {
        let mut links = LinkList::with_capacity(5);
        links.push("https://a.test/".to_string());
        links.push("https://b.test/s?q=1".to_string());

        let mut out = Vec::new();
        links.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://a.test/\nhttps://b.test/s\n\tq=1\n"
        );
    }

    #[test]
    fn test_write_empty_list() {
        let mut out = Vec::new();
        LinkList::with_capacity(3).write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
