use crate::dataset::{load_dataset, DatasetPaths};
use crate::field::{detect_search_field, text_of};
use crate::Record;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_LIMIT: usize = 10;

/// Parse a `limit` query parameter. Takes the leading digits and falls back to
/// [`DEFAULT_LIMIT`] when there are none; never fails.
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else { return DEFAULT_LIMIT };
    let s = raw.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().unwrap_or(DEFAULT_LIMIT)
}

/// Immutable snapshot of the dataset plus the field chosen for matching.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[Record]>,
    field: Option<String>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        let field = detect_search_field(&records);
        Self { records: records.into(), field }
    }

    pub fn from_path(paths: &DatasetPaths) -> Result<Self> {
        let catalog = Self::new(load_dataset(paths)?);
        tracing::info!(
            path = %paths.source.display(),
            records = catalog.len(),
            field = catalog.field().unwrap_or("<none>"),
            "detected search column"
        );
        Ok(catalog)
    }

    pub fn field(&self) -> Option<&str> { self.field.as_deref() }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[Record] { &self.records }

    /// Prefix matches first, then substring matches, both in dataset order.
    ///
    /// The scan stops as soon as `limit` prefix matches are collected. The combined list is
    /// cut to `limit` before duplicates are dropped, so the result can be shorter than `limit`.
    pub fn suggest(&self, q: &str, limit: usize) -> Vec<String> {
        let q = q.trim().to_lowercase();
        if q.is_empty() { return Vec::new(); }
        let Some(field) = self.field.as_deref() else { return Vec::new() };

        let mut prefix: Vec<&str> = Vec::new();
        let mut substr: Vec<&str> = Vec::new();
        for record in self.records.iter() {
            let val = text_of(record.get(field));
            let low = val.to_lowercase();
            if low.starts_with(&q) {
                prefix.push(val);
            } else if low.contains(&q) {
                substr.push(val);
            }
            if prefix.len() >= limit { break; }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        prefix
            .into_iter()
            .chain(substr)
            .take(limit)
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }
}
