use crate::Record;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A single JSON array of objects.
    Array,
    /// One JSON object per line.
    Lines,
}

#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub source: PathBuf,
}

impl DatasetPaths {
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        Self { source: source.as_ref().to_path_buf() }
    }

    pub fn format(&self) -> SourceFormat {
        match self.source.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => SourceFormat::Lines,
            _ => SourceFormat::Array,
        }
    }
}

/// Read every record from the source file. Called once per snapshot; the result is never mutated.
pub fn load_dataset(paths: &DatasetPaths) -> Result<Vec<Record>> {
    let file = File::open(&paths.source)
        .with_context(|| format!("opening dataset {}", paths.source.display()))?;
    let records = match paths.format() {
        SourceFormat::Array => read_array(file, &paths.source)?,
        SourceFormat::Lines => read_lines(file, &paths.source)?,
    };
    tracing::debug!(path = %paths.source.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

fn read_array<R: Read>(reader: R, path: &Path) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_reader(BufReader::new(reader))
        .with_context(|| format!("parsing {}", path.display()))?;
    let items = match value {
        Value::Array(items) => items,
        _ => bail!("{}: expected a JSON array of objects", path.display()),
    };
    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(obj) => records.push(obj),
            _ => bail!("{}: element {idx} is not an object", path.display()),
        }
    }
    Ok(records)
}

fn read_lines<R: Read>(reader: R, path: &Path) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() { continue; }
        let record: Record = serde_json::from_str(&line)
            .with_context(|| format!("{}: line {} is not a JSON object", path.display(), idx + 1))?;
        records.push(record);
    }
    Ok(records)
}
