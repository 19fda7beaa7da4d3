use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tfidf_core::persist::{load_corpus_into, save_corpus, IndexPaths};
use tfidf_core::{CacheInvalidation, Corpus, Encoding, RankedDocument, Stopwords};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tfidf")]
#[command(about = "Build a TF-IDF corpus and score or rank its documents", long_about = None)]
struct Cli {
    /// Corpus state directory
    #[arg(long, global = true, default_value = "./corpus")]
    state: String,
    /// JSON file holding an array of stopwords, replacing the default list
    #[arg(long, global = true)]
    stopwords: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a text file, or every file under a directory, to the corpus
    Add {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Text encoding of the input files
        #[arg(long, default_value = "utf8")]
        encoding: String,
        /// Key stored with the document; defaults to the file path
        #[arg(long)]
        key: Option<String>,
        /// Recompute cached IDF values after each insertion instead of clearing them
        #[arg(long, default_value_t = false)]
        recompute: bool,
    },
    /// List the terms of one document by TF-IDF
    Terms {
        #[arg(long)]
        doc: usize,
    },
    /// TF-IDF of a query against every document
    Scores {
        #[arg(long)]
        query: String,
    },
    /// Rank documents by cosine similarity to a query
    Rank {
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        k: usize,
    },
    /// IDF of a single term
    Idf {
        #[arg(long)]
        term: String,
    },
}

#[derive(Serialize)]
struct ScoreRow<'a> {
    index: usize,
    key: Option<&'a str>,
    score: f64,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let paths = IndexPaths::new(&cli.state);
    let mut corpus = open_corpus(&paths, cli.stopwords.as_deref())?;

    match cli.command {
        Commands::Add { input, encoding, key, recompute } => {
            // parse before touching any input file
            let encoding: Encoding = encoding.parse()?;
            let mode = if recompute { CacheInvalidation::Recompute } else { CacheInvalidation::Clear };
            add_inputs(&mut corpus, Path::new(&input), encoding, key, mode)?;
            save_corpus(&paths, &corpus, now_rfc3339())?;
        }
        Commands::Terms { doc } => {
            print_json(&corpus.list_terms(doc)?)?;
        }
        Commands::Scores { query } => {
            let scores = corpus.all_scores(query.as_str());
            let out: Vec<ScoreRow> = scores
                .iter()
                .zip(corpus.documents())
                .enumerate()
                .map(|(index, (score, doc))| ScoreRow { index, key: doc.key(), score: *score })
                .collect();
            print_json(&out)?;
        }
        Commands::Rank { query, k } => {
            print_json(&top_ranked(&corpus, &query, k))?;
        }
        Commands::Idf { term } => {
            let idf = corpus.idf(&term.to_lowercase());
            println!("{idf}");
        }
    }
    Ok(())
}

fn open_corpus(paths: &IndexPaths, stopwords: Option<&str>) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    if let Some(file) = stopwords {
        let raw = fs::read_to_string(file).with_context(|| format!("reading stopwords from {file}"))?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        corpus.set_stopwords(Stopwords::try_from_value(&value)?);
    }
    if paths.exists() {
        load_corpus_into(paths, &mut corpus)?;
        tracing::info!(num_docs = corpus.len(), "loaded corpus");
    }
    Ok(corpus)
}

fn add_inputs(corpus: &mut Corpus, input: &Path, encoding: Encoding, key: Option<String>, mode: CacheInvalidation) -> Result<()> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            if entry.path().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        files.push(input.to_path_buf());
    }

    let single = files.len() == 1;
    for file in files {
        let doc_key = match (&key, single) {
            (Some(k), true) => k.clone(),
            _ => file.display().to_string(),
        };
        corpus
            .add_file(&file, encoding, Some(doc_key), mode)
            .with_context(|| format!("adding {}", file.display()))?;
    }
    tracing::info!(num_docs = corpus.len(), "ingested documents");
    Ok(())
}

fn top_ranked(corpus: &Corpus, query: &str, k: usize) -> Vec<RankedDocument> {
    corpus.rank_by_similarity(query).into_iter().take(k).collect()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directories_are_walked_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "dog sat").unwrap();
        fs::write(dir.path().join("a.txt"), "cat sat").unwrap();

        let mut corpus = Corpus::new();
        add_inputs(&mut corpus, dir.path(), Encoding::Utf8, Some("ignored".into()), CacheInvalidation::Clear).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.document(0).unwrap().key().unwrap().ends_with("a.txt"));
        assert_eq!(corpus.document(1).unwrap().tf("dog"), 1);
    }

    #[test]
    fn rank_honors_k() {
        let mut corpus = Corpus::new();
        for text in ["cat", "cat dog", "dog"] {
            corpus.add_document(text, None, CacheInvalidation::Clear);
        }
        assert!(top_ranked(&corpus, "cat", 0).is_empty());
        assert_eq!(top_ranked(&corpus, "cat", 2).len(), 2);
        assert_eq!(top_ranked(&corpus, "cat", 10).len(), 3);
    }

    #[test]
    fn state_round_trips_through_directory() {
        let dir = tempdir().unwrap();
        let paths = IndexPaths::new(dir.path().join("state"));
        let input = dir.path().join("one.txt");
        fs::write(&input, "cat cat hat").unwrap();

        let mut corpus = open_corpus(&paths, None).unwrap();
        add_inputs(&mut corpus, &input, Encoding::Utf8, Some("one".into()), CacheInvalidation::Clear).unwrap();
        save_corpus(&paths, &corpus, now_rfc3339()).unwrap();

        let reopened = open_corpus(&paths, None).unwrap();
        assert_eq!(reopened.documents(), corpus.documents());
        assert_eq!(reopened.document(0).unwrap().key(), Some("one"));
    }
}
