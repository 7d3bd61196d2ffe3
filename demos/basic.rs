use random_index_vectorizer::{build_corpus, TextDocument, VectorizerConfig};

fn main() {
    // build corpus
    let docs = vec![
        TextDocument::new("doc1", "the ship sailed over the sea at night and the crew slept on the deck "),
        TextDocument::new("doc2", "the whale rose from the sea and the ship turned into the wind "),
        TextDocument::new("doc3", "a dog runs in the park and a cat sleeps under the old tree "),
    ];
    let config = VectorizerConfig { window: 5, ..Default::default() };
    let model = match build_corpus(&docs, &config) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("corpus build failed: {e}");
            return;
        }
    };

    // rank documents against doc1
    if let Ok(hits) = model.rank_documents_by_similarity("doc1") {
        println!("document match:\n{hits}");
    }
    // words closest to "sea"
    if let Ok(hits) = model.top_words_by_similarity("sea", 5) {
        println!("word match:\n{hits}");
    }
}
