use std::{cmp::Ordering, fmt};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::{math::dense::cosine_similarity, sort::TopK},
    vectorizer::corpus::CorpusModel,
};

/// A key (document identifier or word) with its similarity to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub key: String,
    /// cosine similarity, NaN when either vector is all zero
    pub score: f64,
}

impl SimilarityScore {
    pub fn new(key: impl Into<String>, score: f64) -> Self {
        Self { key: key.into(), score }
    }
}

/// Ranking order: higher score first, ties by key ascending, NaN last
pub fn ranking_order(a: &SimilarityScore, b: &SimilarityScore) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, false) => b.score.total_cmp(&a.score).then_with(|| a.key.cmp(&b.key)),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => a.key.cmp(&b.key),
    }
}

/// Structure to store ranking results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub list: Vec<SimilarityScore>,
}

impl Hits {
    pub fn new(list: Vec<SimilarityScore>) -> Self {
        Hits { list }
    }

    /// Sort by `ranking_order`
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.sort_by(ranking_order);
        self
    }

    /// Drop entries without a similarity signal
    pub fn retain_defined(&mut self) -> &mut Self {
        self.list.retain(|s| !s.score.is_nan());
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimilarityScore> {
        self.list.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|s| s.key.as_str())
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a SimilarityScore;
    type IntoIter = std::slice::Iter<'a, SimilarityScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl fmt::Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.list {
            writeln!(f, "{:.6}\t{}", s.score, s.key)?;
        }
        Ok(())
    }
}

/// Score every candidate against `query` and sort them all
/// Candidates without a similarity signal end up last.
pub fn rank_all(query: &[i64], candidates: &IndexMap<String, Vec<i64>>) -> Hits {
    let list: Vec<SimilarityScore> = candidates
        .par_iter()
        .map(|(key, vector)| SimilarityScore::new(key.as_str(), cosine_similarity(query, vector)))
        .collect();
    let mut hits = Hits::new(list);
    hits.sort_by_score();
    hits
}

/// Exact top-k selection against `query`
/// Every candidate is scored once; candidates without a similarity signal are never kept.
pub fn top_k(query: &[i64], candidates: &IndexMap<String, Vec<i64>>, k: usize) -> Hits {
    let mut best = TopK::new(k, ranking_order);
    for (key, vector) in candidates {
        let score = cosine_similarity(query, vector);
        if score.is_nan() {
            continue;
        }
        best.push(SimilarityScore::new(key.as_str(), score));
    }
    Hits::new(best.into_sorted_vec())
}

/// Ranking queries over a built corpus
impl CorpusModel {
    /// All documents ordered by similarity to document `id`, `id` itself included
    pub fn rank_documents_by_similarity(&self, id: &str) -> Result<Hits> {
        let query = self.document(id).ok_or_else(|| Error::MissingDocument(id.to_string()))?;
        Ok(rank_all(query, &self.documents))
    }

    /// The `k` words most similar to `word`, `word` itself included
    pub fn top_words_by_similarity(&self, word: &str, k: usize) -> Result<Hits> {
        let query = self.word(word).ok_or_else(|| Error::MissingWord(word.to_string()))?;
        Ok(top_k(query, &self.words, k))
    }

    /// All documents ordered by similarity to the vector of `word`
    pub fn rank_documents_by_word(&self, word: &str) -> Result<Hits> {
        let query = self.word(word).ok_or_else(|| Error::MissingWord(word.to_string()))?;
        Ok(rank_all(query, &self.documents))
    }
}
