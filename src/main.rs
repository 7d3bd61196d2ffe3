use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use log::{error, info};
use random_index_vectorizer::{
    build_corpus, directory_documents, Config, Error, FailurePolicy, Hits, Result,
};
use serde::Serialize;

const DEFAULT_DATA_DIR: &str = "data/";

/// Rank documents and words by random indexing similarity
#[derive(Parser, Debug)]
#[command(name = "rivec", version, about)]
struct Cli {
    /// Directory holding one text file per document
    #[arg(long)]
    data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document other documents are ranked against
    #[arg(long)]
    query_document: Option<String>,

    /// Word other words and documents are ranked against
    #[arg(long)]
    query_word: Option<String>,

    /// Number of similar words to list
    #[arg(long)]
    top_k: Option<usize>,

    /// Leave out unreadable documents instead of failing
    #[arg(long)]
    skip_failed: bool,

    /// Print rankings as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Default)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    document_match: Option<Hits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_match: Option<Hits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_to_document_match: Option<Hits>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data) = &cli.data {
        config.data_dir = Some(data.clone());
    }
    if let Some(document) = &cli.query_document {
        config.query.document = Some(document.clone());
    }
    if let Some(word) = &cli.query_word {
        config.query.word = Some(word.clone());
    }
    if let Some(k) = cli.top_k {
        config.vectorizer.top_k = k;
    }
    if cli.skip_failed {
        config.vectorizer.failure_policy = FailurePolicy::Skip;
    }
    config.vectorizer.validate()?;
    Ok(config)
}

fn print_documents(title: &str, hits: &Hits, config: &Config) {
    println!("\n{title}:");
    for hit in hits {
        println!("{:.6}\t{}, {}", hit.score, config.label(&hit.key), hit.key);
    }
}

fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Missing query keys exit with 2, every other error with 1
fn exit_status(err: &Error) -> u8 {
    match err {
        Error::MissingDocument(_) | Error::MissingWord(_) => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let started = Instant::now();
    let sources = directory_documents(&data_dir).map_err(|source| Error::Io {
        document: data_dir.display().to_string(),
        source,
    })?;
    if sources.is_empty() {
        log::warn!("no files found in {}", data_dir.display());
    }
    let model = build_corpus(&sources, &config.vectorizer)?;
    info!("built corpus in {:.2}s", started.elapsed().as_secs_f64());

    let mut report = Report::default();
    if let Some(document) = &config.query.document {
        report.document_match = Some(model.rank_documents_by_similarity(document)?);
    }
    if let Some(word) = &config.query.word {
        report.word_match = Some(model.top_words_by_similarity(word, config.vectorizer.top_k)?);
        report.word_to_document_match = Some(model.rank_documents_by_word(word)?);
    }

    if cli.json {
        println!("{}", render_json(&report)?);
        return Ok(());
    }

    if report.document_match.is_none() && report.word_match.is_none() {
        println!("documents={} words={}", model.doc_num(), model.vocab_size());
    }
    if let Some(hits) = &report.document_match {
        print_documents("document match", hits, &config);
    }
    if let Some(hits) = &report.word_match {
        println!("\nword match:");
        print!("{hits}");
    }
    if let Some(hits) = &report.word_to_document_match {
        print_documents("word to document match", hits, &config);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e {
                Error::MissingDocument(_) | Error::MissingWord(_) => error!("{e} (check the query settings)"),
                _ => error!("{e}"),
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use random_index_vectorizer::SimilarityScore;

    #[test]
    fn json_report_skips_missing_rankings() {
        let report = Report {
            word_match: Some(Hits::new(vec![SimilarityScore::new("sun", 1.0)])),
            ..Default::default()
        };
        let json = render_json(&report).unwrap();
        assert!(json.contains("word_match"));
        assert!(json.contains("\"sun\""));
        assert!(!json.contains("document_match"));
    }

    #[test]
    fn encode_failure_is_an_error_exit() {
        let source = serde_json::from_str::<u8>("not json").unwrap_err();
        let err = Error::from(source);
        assert!(matches!(err, Error::Encode(_)));
        assert!(err.to_string().starts_with("failed to encode report"));
        assert_ne!(exit_status(&err), 0);
    }

    #[test]
    fn missing_query_keys_exit_with_two() {
        assert_eq!(exit_status(&Error::MissingWord("moon".into())), 2);
        assert_eq!(exit_status(&Error::MissingDocument("x".into())), 2);
        assert_eq!(exit_status(&Error::InvalidConfig("window".into())), 1);
    }
}
