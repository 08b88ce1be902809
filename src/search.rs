use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::Task;

/// Number of queries listed by `--top`.
pub const TOP_SEARCHES_LIMIT: usize = 10;

/// Trim and lower-case a raw query.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Query frequency counters, kept in first-seen order.
///
/// Persisted as a JSON object (`{"query": count}`). The in-memory order
/// follows the document, so ranking ties resolve to whichever query was
/// recorded first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCounters {
    entries: Vec<(String, u64)>,
}

impl SearchCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, query: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, count)| *count)
    }

    /// Count one occurrence of `query`. Returns the normalized query, or
    /// `None` when nothing is left after normalizing.
    pub fn record(&mut self, query: &str) -> Option<String> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }

        match self.entries.iter_mut().find(|(q, _)| *q == normalized) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((normalized.clone(), 1)),
        }

        Some(normalized)
    }

    /// The `n` most frequent queries, highest first. Ties keep first-seen
    /// order.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked = self.entries.clone();
        // Stable sort: equal counts stay in insertion order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl FromIterator<(String, u64)> for SearchCounters {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counters = SearchCounters::new();
        for (query, count) in iter {
            match counters.entries.iter_mut().find(|(q, _)| *q == query) {
                Some((_, existing)) => *existing = count,
                None => counters.entries.push((query, count)),
            }
        }
        counters
    }
}

impl Serialize for SearchCounters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (query, count) in &self.entries {
            map.serialize_entry(query, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SearchCounters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountersVisitor;

        impl<'de> Visitor<'de> for CountersVisitor {
            type Value = SearchCounters;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of search queries to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((query, count)) = access.next_entry::<String, u64>()? {
                    pairs.push((query, count));
                }
                Ok(pairs.into_iter().collect())
            }
        }

        deserializer.deserialize_map(CountersVisitor)
    }
}

/// Tasks whose title or description contains the normalized query,
/// ignoring case. An empty query matches everything.
pub fn matching<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let needle = normalize(query);
    tasks
        .iter()
        .filter(|task| task.haystack().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str, description: &str) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": description,
        }))
        .unwrap()
    }

    #[test]
    fn record_normalizes_and_counts() {
        let mut counters = SearchCounters::new();
        assert_eq!(counters.record("  Math "), Some("math".to_string()));
        counters.record("MATH");
        counters.record("history");

        assert_eq!(counters.get("math"), Some(2));
        assert_eq!(counters.get("history"), Some(1));
        assert_eq!(counters.len(), 2);
    }

    #[test]
    fn blank_queries_are_not_recorded() {
        let mut counters = SearchCounters::new();
        assert_eq!(counters.record(""), None);
        assert_eq!(counters.record(" \t "), None);
        assert!(counters.is_empty());
    }

    #[test]
    fn top_ranks_by_count_and_breaks_ties_by_first_seen() {
        let counters: SearchCounters = serde_json::from_str(
            r#"{"math": 5, "history": 5, "bio": 1}"#,
        )
        .unwrap();

        assert_eq!(
            counters.top(2),
            vec![("math".to_string(), 5), ("history".to_string(), 5)]
        );

        let reversed: SearchCounters = serde_json::from_str(
            r#"{"history": 5, "bio": 1, "math": 5}"#,
        )
        .unwrap();
        assert_eq!(reversed.top(2)[0].0, "history");
    }

    #[test]
    fn top_handles_short_lists() {
        let mut counters = SearchCounters::new();
        counters.record("bio");
        assert_eq!(counters.top(10), vec![("bio".to_string(), 1)]);
        assert!(SearchCounters::new().top(3).is_empty());
    }

    #[test]
    fn document_order_survives_a_round_trip() {
        let mut counters = SearchCounters::new();
        for query in ["zeta", "alpha", "mid"] {
            counters.record(query);
        }

        let json = serde_json::to_string(&counters).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":1,"mid":1}"#);
        let back: SearchCounters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counters);
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(serde_json::from_str::<SearchCounters>(r#"{"math": -1}"#).is_err());
    }

    #[test]
    fn matching_is_a_case_insensitive_substring_match() {
        let tasks = vec![task(1, "Math HW", ""), task(2, "History", "essay on Rome")];

        let ids: Vec<_> = matching(&tasks, "math").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);

        let ids: Vec<_> = matching(&tasks, "  ROME").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);

        let ids: Vec<_> = matching(&tasks, "th").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let tasks = vec![task(1, "Math HW", ""), task(2, "", "")];
        assert_eq!(matching(&tasks, "").len(), 2);
    }
}
