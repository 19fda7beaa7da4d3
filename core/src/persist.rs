use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::corpus::Corpus;
use crate::document::Document;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn documents(&self) -> PathBuf { self.root.join("documents.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }

    /// True when a saved corpus is present under the root.
    pub fn exists(&self) -> bool { self.documents().is_file() }
}

pub fn save_documents(paths: &IndexPaths, docs: &[Document]) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.documents())?;
    let bytes = bincode::serialize(docs)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_documents(paths: &IndexPaths) -> Result<Vec<Document>> {
    let mut f = File::open(paths.documents())
        .with_context(|| format!("opening {}", paths.documents().display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let docs = bincode::deserialize(&buf)?;
    Ok(docs)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Persist the ordered documents and a meta file. The IDF cache is never stored.
pub fn save_corpus(paths: &IndexPaths, corpus: &Corpus, created_at: String) -> Result<()> {
    save_documents(paths, corpus.documents())?;
    let meta = MetaFile { num_docs: corpus.len() as u32, created_at, version: FORMAT_VERSION };
    save_meta(paths, &meta)?;
    tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, "saved corpus");
    Ok(())
}

/// Restore the documents into `corpus`, keeping its tokenizer and stopwords.
pub fn load_corpus_into(paths: &IndexPaths, corpus: &mut Corpus) -> Result<()> {
    let meta = load_meta(paths)?;
    if meta.version != FORMAT_VERSION {
        anyhow::bail!("unsupported corpus format version {}", meta.version);
    }
    let docs = load_documents(paths)?;
    if docs.len() != meta.num_docs as usize {
        tracing::warn!(meta = meta.num_docs, found = docs.len(), "document count differs from meta");
    }
    corpus.restore_from(docs);
    Ok(())
}

pub fn load_corpus(paths: &IndexPaths) -> Result<Corpus> {
    let mut corpus = Corpus::new();
    load_corpus_into(paths, &mut corpus)?;
    Ok(corpus)
}
