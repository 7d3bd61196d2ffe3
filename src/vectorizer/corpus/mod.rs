use indexmap::IndexMap;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    config::{FailurePolicy, VectorizerConfig},
    error::{Error, Result},
    source::DocumentSource,
    utils::math::dense::add_assign,
    vectorizer::{process_source, DocumentVectors},
};

/// Document vectors by identifier and word vectors summed over all documents
/// Built once after every document is processed, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusModel {
    pub dimensions: usize,
    pub documents: IndexMap<String, Vec<i64>>,
    pub words: IndexMap<String, Vec<i64>>,
}

impl CorpusModel {
    /// Create an empty model
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            documents: IndexMap::new(),
            words: IndexMap::new(),
        }
    }

    /// Add one document's vectors
    /// A repeated identifier replaces the document vector, its word vectors still add up.
    /// Nothing is merged if any vector is not `dimensions` long.
    pub fn merge(&mut self, vectors: DocumentVectors) -> Result<()> {
        self.check_len(vectors.document.len())?;
        self.check_words(&vectors.words)?;
        if self.documents.insert(vectors.id.clone(), vectors.document).is_some() {
            warn!("document {} merged twice, replacing its vector", vectors.id);
        }
        self.add_words(vectors.words);
        Ok(())
    }

    /// Fold another model into this one
    /// Nothing is merged if the models differ in dimensions.
    pub fn merge_corpus(&mut self, other: CorpusModel) -> Result<()> {
        self.check_len(other.dimensions)?;
        for vector in other.documents.values() {
            self.check_len(vector.len())?;
        }
        self.check_words(&other.words)?;
        for (id, vector) in other.documents {
            if self.documents.insert(id.clone(), vector).is_some() {
                warn!("document {} merged twice, replacing its vector", id);
            }
        }
        self.add_words(other.words);
        Ok(())
    }

    fn check_len(&self, found: usize) -> Result<()> {
        if found != self.dimensions {
            return Err(Error::DimensionMismatch { expected: self.dimensions, found });
        }
        Ok(())
    }

    fn check_words(&self, words: &IndexMap<String, Vec<i64>>) -> Result<()> {
        words.values().try_for_each(|v| self.check_len(v.len()))
    }

    fn add_words(&mut self, words: IndexMap<String, Vec<i64>>) {
        for (word, vector) in words {
            match self.words.get_mut(&word) {
                Some(acc) => add_assign(acc, &vector),
                None => {
                    self.words.insert(word, vector);
                }
            }
        }
    }

    pub fn document(&self, id: &str) -> Option<&[i64]> {
        self.documents.get(id).map(Vec::as_slice)
    }

    pub fn word(&self, word: &str) -> Option<&[i64]> {
        self.words.get(word).map(Vec::as_slice)
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.words.len()
    }
}

/// Process every source in parallel, one task per document
/// Results come back in input order once all tasks are done.
pub fn vectorize_all<S>(sources: &[S], config: &VectorizerConfig) -> Vec<Result<DocumentVectors>>
where
    S: DocumentSource,
{
    sources
        .par_iter()
        .map(|source| process_source(source, config))
        .collect()
}

/// Process every source and merge the results
/// Failed documents are handled per `config.failure_policy`.
pub fn build_corpus<S>(sources: &[S], config: &VectorizerConfig) -> Result<CorpusModel>
where
    S: DocumentSource,
{
    config.validate()?;
    info!(
        "vectorizing {} documents (threads={}, dimensions={}, window={})",
        sources.len(),
        rayon::current_num_threads(),
        config.dimensions,
        config.window
    );

    let (done, failed): (Vec<_>, Vec<_>) = vectorize_all(sources, config)
        .into_iter()
        .partition(|r| r.is_ok());
    let failed: Vec<Error> = failed.into_iter().filter_map(|r| r.err()).collect();
    let skipped = failed.len();

    if skipped > 0 {
        match config.failure_policy {
            FailurePolicy::Abort => {
                if let Some(first) = failed.into_iter().next() {
                    return Err(Error::Failed { failed: skipped, first: Box::new(first) });
                }
            }
            FailurePolicy::Skip => {
                for e in &failed {
                    warn!("skipping document: {}", e);
                }
            }
        }
    }

    let mut model = CorpusModel::new(config.dimensions);
    for vectors in done.into_iter().filter_map(|r| r.ok()) {
        model.merge(vectors)?;
    }
    info!(
        "corpus built: documents={} words={} skipped={}",
        model.doc_num(),
        model.vocab_size(),
        skipped
    );
    Ok(model)
}
