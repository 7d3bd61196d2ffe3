//! This crate builds document and word vectors with random indexing.
//! Bigram contexts are hashed into sparse ternary projections and summed.

pub mod config;
pub mod error;
pub mod source;
pub mod utils;
pub mod vectorizer;

/// Corpus Model
/// The result of a corpus build, holding:
/// - One vector per document (sum of the projections of the document's bigrams)
/// - One vector per word, summed over all documents
///   (sum of the projections of the bigrams around each occurrence of the word)
///
/// Built by `build_corpus`, read-only afterwards.
/// Ranking queries are implemented on it:
/// - `rank_documents_by_similarity`
/// - `top_words_by_similarity`
/// - `rank_documents_by_word`
///
/// # Serialization
/// Supported.
pub use vectorizer::corpus::CorpusModel;

/// Corpus build
/// `build_corpus` runs one document processor per source in parallel, waits for all of
/// them and merges the results. Failed documents are handled per `FailurePolicy`.
/// `vectorize_all` returns the per-document results without merging.
pub use vectorizer::corpus::{build_corpus, vectorize_all};

/// Document processor
/// Builds the vectors of a single stream.
/// `Accumulator` is the underlying per-document state, usable for token streams
/// produced elsewhere.
pub use vectorizer::{process_document, process_source, Accumulator, DocumentVectors};

/// Streaming tokenizer
/// Tokens are maximal runs of letters and apostrophes, lowercased.
pub use vectorizer::token::{tokenize, Tokens};

/// Projection generator
/// Deterministic sparse ternary vectors keyed by string.
/// `Projector` memoizes projections for one document.
pub use vectorizer::projection::{project, Projector};

/// Context window
/// Fixed capacity ring of the most recent tokens.
pub use vectorizer::window::ContextWindow;

/// Ranking results
/// - `Hits`: ordered list of results
/// - `SimilarityScore`: a key with its cosine similarity
pub use vectorizer::evaluate::scoring::{Hits, SimilarityScore};

/// Cosine similarity over integer or float vectors
pub use utils::math::dense::cosine_similarity;

/// Document sources
/// Anything that can be opened as a byte stream under an identifier.
pub use source::{directory_documents, DocumentSource, FileDocument, TextDocument};

pub use config::{Config, FailurePolicy, QueryConfig, VectorizerConfig};
pub use error::{Error, Result};
