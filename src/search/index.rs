use super::scoring::{DEFAULT_THRESHOLD, match_score};
use crate::models::ClassifiedEntry;

/// One ranked result: position in the indexed sequence and its score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: usize,
    pub score: f64,
}

/// Fuzzy index over the folder names of a classified entry set.
///
/// The index owns the entries it was built from. It is rebuilt whenever the
/// entry set changes; there is no incremental insert or remove.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<ClassifiedEntry>,
    keys: Vec<Vec<char>>,
    threshold: f64,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::build(Vec::new())
    }
}

impl SearchIndex {
    pub fn build(entries: Vec<ClassifiedEntry>) -> Self {
        Self::with_threshold(entries, DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(entries: Vec<ClassifiedEntry>, threshold: f64) -> Self {
        let keys = entries.iter().map(|entry| normalize(&entry.folder_name)).collect();
        Self { entries, keys, threshold }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// All indexed entries in their original order
    pub fn entries(&self) -> &[ClassifiedEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&ClassifiedEntry> {
        self.entries.get(position)
    }

    /// Rank entries against `query`.
    ///
    /// A blank query returns every entry in original order with score 0.
    /// Otherwise only entries scoring within the threshold are returned, best
    /// first, ties kept in original order.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return (0..self.entries.len())
                .map(|position| SearchHit { position, score: 0.0 })
                .collect();
        }

        let pattern = normalize(query);
        let mut hits: Vec<SearchHit> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(position, key)| {
                let score = match_score(&pattern, key, self.threshold);
                (score <= self.threshold).then_some(SearchHit { position, score })
            })
            .collect();

        // stable: equal scores keep history order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }

    /// Entries matching `query`, ranked as in [`SearchIndex::search`]
    pub fn filter(&self, query: &str) -> Vec<&ClassifiedEntry> {
        self.search(query).into_iter().map(|hit| &self.entries[hit.position]).collect()
    }
}

fn normalize(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}
