use std::fs;

use random_index_vectorizer::{
    build_corpus, directory_documents, project, Config, Error, FailurePolicy, TextDocument,
    VectorizerConfig,
};

/// Short documents need a narrow window for any real token to reach the center.
fn config() -> VectorizerConfig {
    VectorizerConfig { dimensions: 1024, window: 3, top_k: 20, failure_policy: FailurePolicy::Abort }
}

fn corpus() -> Vec<TextDocument> {
    vec![
        TextDocument::new("A", "the sun rises the sun sets"),
        TextDocument::new("B", "the sun rises the sun sets"),
        TextDocument::new("C", "a dog runs in the park"),
    ]
}

#[test]
fn identical_documents_rank_together() {
    let model = build_corpus(&corpus(), &config()).unwrap();
    let hits = model.rank_documents_by_similarity("A").unwrap();

    assert_eq!(hits.len(), 3);
    let keys: Vec<&str> = hits.keys().collect();
    // A and B tie at 1.0, ties go by identifier
    assert_eq!(keys, vec!["A", "B", "C"]);
    assert_eq!(hits.list[0].score, 1.0);
    assert_eq!(hits.list[1].score, 1.0);
    assert!(hits.list[2].score < 1.0);
}

#[test]
fn words_rank_themselves_first() {
    let model = build_corpus(&corpus(), &config()).unwrap();
    let sun = model.word("sun").expect("sun has a word vector");
    assert!(sun.iter().any(|&x| x != 0));

    let top = model.top_words_by_similarity("sun", 1).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top.list[0].key, "sun");
    assert_eq!(top.list[0].score, 1.0);

    let top = model.top_words_by_similarity("sun", 20).unwrap();
    assert!(top.len() <= 20);
    assert!(top.list.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn sun_vector_is_the_context_bigram_of_both_copies() {
    let model = build_corpus(&corpus(), &config()).unwrap();
    let expected: Vec<i64> = project("therises", 1024).iter().map(|&x| 2 * x as i64).collect();
    assert_eq!(model.word("sun").unwrap(), expected.as_slice());
}

#[test]
fn word_to_document_ranking_covers_all_documents() {
    let model = build_corpus(&corpus(), &config()).unwrap();
    let hits = model.rank_documents_by_word("sun").unwrap();
    assert_eq!(hits.len(), 3);
    assert!(matches!(model.rank_documents_by_word("moon"), Err(Error::MissingWord(_))));
}

#[test]
fn results_are_reproducible() {
    let first = build_corpus(&corpus(), &config()).unwrap();
    let second = build_corpus(&corpus(), &config()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.rank_documents_by_similarity("C").unwrap(),
        second.rank_documents_by_similarity("C").unwrap()
    );
}

#[test]
fn builds_from_a_directory_with_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "the sun rises the sun sets\n").unwrap();
    fs::write(data.join("b.txt"), "the sun rises the sun sets\n").unwrap();
    fs::write(data.join("c.txt"), "a dog runs in the park\n").unwrap();

    let query = data.join("a.txt").display().to_string();
    let toml = format!(
        "[vectorizer]\ndimensions = 512\nwindow = 3\n\n[query]\ndocument = {query:?}\nword = \"sun\"\n\n[labels]\n{query:?} = \"Sunny\"\n"
    );
    fs::write(dir.path().join("rivec.toml"), toml).unwrap();

    let config = Config::load(dir.path().join("rivec.toml")).unwrap();
    assert_eq!(config.label(&query), "Sunny");

    let sources = directory_documents(&data).unwrap();
    let model = build_corpus(&sources, &config.vectorizer).unwrap();
    assert_eq!(model.doc_num(), 3);
    assert_eq!(model.dimensions, 512);

    let hits = model.rank_documents_by_similarity(config.query.document.as_deref().unwrap()).unwrap();
    assert!(hits.list[0].key.ends_with("a.txt"));
    assert!(hits.list[1].key.ends_with("b.txt"));
    assert!(hits.list[2].key.ends_with("c.txt"));

    let words = model.top_words_by_similarity("sun", config.vectorizer.top_k).unwrap();
    assert_eq!(words.list[0].key, "sun");
}
