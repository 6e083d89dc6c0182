use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A completed checklist line that was taken out of a document, remembered
/// so it can be put back later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenEntry {
    /// Line index in the document the entry was hidden from.
    pub index: usize,
    /// The line exactly as it was written.
    pub text: String,
}

impl HiddenEntry {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Hidden lines per document id.
///
/// Entries accumulate across runs until the document is drained in one go.
/// Uses BTreeMap so the persisted form has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenStore {
    documents: BTreeMap<String, Vec<HiddenEntry>>,
}

impl HiddenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries currently hidden for a document, in the order they were added.
    pub fn get(&self, document_id: &str) -> &[HiddenEntry] {
        self.documents
            .get(document_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Concatenate entries onto a document's list, creating it if needed.
    ///
    /// No deduplication or reordering happens here. Appending nothing leaves
    /// the store untouched.
    pub fn append(&mut self, document_id: &str, entries: impl IntoIterator<Item = HiddenEntry>) {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return;
        }
        self.documents
            .entry(document_id.to_string())
            .or_default()
            .extend(entries);
    }

    /// Remove every entry for a document and return them sorted by original
    /// index. Entries sharing an index keep the order they were appended in.
    pub fn drain_all(&mut self, document_id: &str) -> Vec<HiddenEntry> {
        let mut entries = self.documents.remove(document_id).unwrap_or_default();
        entries.sort_by_key(|entry| entry.index);
        entries
    }

    pub fn has_entries(&self, document_id: &str) -> bool {
        !self.get(document_id).is_empty()
    }

    /// Document ids that currently have hidden entries, sorted.
    pub fn documents(&self) -> impl Iterator<Item = (&str, usize)> {
        self.documents
            .iter()
            .map(|(id, entries)| (id.as_str(), entries.len()))
    }

    /// Number of documents with hidden entries.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
