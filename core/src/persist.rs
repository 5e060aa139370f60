use crate::InvertedIndex;
use anyhow::{Context, Result};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serializes the whole index (term map and document count) as one bincode blob.
pub fn write_index<W: Write>(writer: W, index: &InvertedIndex) -> Result<()> {
    bincode::serialize_into(writer, index).context("serializing index")?;
    Ok(())
}

pub fn read_index<R: Read>(reader: R) -> Result<InvertedIndex> {
    let index = bincode::deserialize_from(reader).context("deserializing index")?;
    Ok(index)
}

pub fn save_index<P: AsRef<Path>>(path: P, index: &InvertedIndex) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let f = File::create(path).with_context(|| format!("creating index file {}", path.display()))?;
    let mut w = BufWriter::new(f);
    write_index(&mut w, index)?;
    w.flush()?;
    tracing::info!(path = %path.display(), num_docs = index.num_docs(), num_terms = index.num_terms(), "index saved");
    Ok(())
}

pub fn load_index<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening index file {}", path.display()))?;
    let index = read_index(BufReader::new(f))
        .with_context(|| format!("loading index file {}", path.display()))?;
    tracing::info!(path = %path.display(), num_docs = index.num_docs(), num_terms = index.num_terms(), "index loaded");
    Ok(index)
}

impl InvertedIndex {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_index(path, self)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_index(path)
    }
}
