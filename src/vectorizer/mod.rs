pub mod corpus;
pub mod evaluate;
pub mod projection;
pub mod token;
pub mod window;

use std::io::{BufReader, Read};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::VectorizerConfig,
    error::{Error, Result},
    source::DocumentSource,
    utils::math::dense::add_assign,
    vectorizer::{projection::Projector, token::Tokens, window::ContextWindow},
};

/// Vectors produced from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVectors {
    /// document identifier
    pub id: String,
    /// sum of the projections of every bigram in the document
    pub document: Vec<i64>,
    /// center token -> sum of the projections of its context bigrams
    pub words: IndexMap<String, Vec<i64>>,
    /// number of tokens read
    pub tokens: u64,
}

/// Per-document vector builder
///
/// Owns the projection cache, the context window and the vectors being built.
/// Nothing in here is shared, so one instance per worker needs no locking.
pub struct Accumulator {
    projector: Projector,
    window: ContextWindow,
    document: Vec<i64>,
    words: IndexMap<String, Vec<i64>>,
    /// reusable bigram key buffer
    key: String,
    tokens: u64,
}

impl Accumulator {
    /// Fails with `Error::InvalidConfig` unless `config` validates.
    pub fn new(config: &VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            projector: Projector::new(config.dimensions),
            window: ContextWindow::new(config.window),
            document: vec![0; config.dimensions],
            words: IndexMap::new(),
            key: String::new(),
            tokens: 0,
        })
    }

    /// Feed the next token of the document
    pub fn add_token(&mut self, token: String) {
        let Self { projector, window, document, words, key, tokens } = self;
        let dimensions = projector.dimensions();

        // order 1 markov model document vector
        key.clear();
        key.push_str(window.previous());
        key.push_str(&token);
        add_assign(document, projector.project(key.as_str()));

        // word vector of the token in the middle of the window
        let center = window.center();
        let idx = match words.get_index_of(center) {
            Some(idx) => idx,
            None => words.insert_full(center.to_owned(), vec![0; dimensions]).0,
        };
        let word_vector = &mut words[idx];

        // order 1 markov model over the context, occurrences of center are skipped
        let mut last = window.item(0);
        for i in 1..window.capacity() {
            let current = window.item(i);
            if current == center {
                continue;
            }
            key.clear();
            key.push_str(last);
            key.push_str(current);
            add_assign(word_vector, projector.project(key.as_str()));
            last = current;
        }

        window.push(token);
        *tokens += 1;
    }

    #[inline]
    pub fn tokens(&self) -> u64 {
        self.tokens
    }

    pub fn finish(self, id: impl Into<String>) -> DocumentVectors {
        DocumentVectors {
            id: id.into(),
            document: self.document,
            words: self.words,
            tokens: self.tokens,
        }
    }
}

/// Build the document vector and word vectors of one stream
/// Any read error aborts the document.
pub fn process_document<R: Read>(id: &str, reader: R, config: &VectorizerConfig) -> Result<DocumentVectors> {
    let mut acc = Accumulator::new(config)?;
    for token in Tokens::new(BufReader::new(reader)) {
        let token = token.map_err(|e| Error::io(id, e))?;
        acc.add_token(token);
    }
    let cached = acc.projector.cached();
    let vectors = acc.finish(id);
    debug!(
        "processed {}: tokens={} word_vectors={} projections={}",
        vectors.id,
        vectors.tokens,
        vectors.words.len(),
        cached
    );
    Ok(vectors)
}

/// Open a source and process it
pub fn process_source<S>(source: &S, config: &VectorizerConfig) -> Result<DocumentVectors>
where
    S: DocumentSource + ?Sized,
{
    let reader = source.open().map_err(|e| Error::io(source.id(), e))?;
    process_document(source.id(), reader, config)
}
