// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The submitted form, as the hosting framework hands it over.

use serde::{Deserialize, Serialize};

/// A file part of a multipart submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBlob {
    /// The client-side file name (may be empty).
    pub filename: String,
    /// The declared content type, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl FileBlob {
    /// Creates a file blob.
    pub fn new(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// Size of the file contents in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True for the part a browser sends when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty() && self.bytes.is_empty()
    }
}

/// One submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEntry {
    /// A plain text value.
    Text(String),
    /// An uploaded file.
    File(FileBlob),
}

impl FormEntry {
    /// Returns the text, if this is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormEntry::Text(s) => Some(s),
            FormEntry::File(_) => None,
        }
    }
}

impl From<&str> for FormEntry {
    fn from(value: &str) -> Self {
        FormEntry::Text(value.to_string())
    }
}

impl From<String> for FormEntry {
    fn from(value: String) -> Self {
        FormEntry::Text(value)
    }
}

impl From<FileBlob> for FormEntry {
    fn from(value: FileBlob) -> Self {
        FormEntry::File(value)
    }
}

/// An ordered, multi-valued list of submitted `(key, value)` entries.
///
/// Keys may repeat (checkbox groups, multi-selects) and order is kept
/// exactly as submitted.
///
/// # Example
///
/// ```rust
/// use actform::FormData;
///
/// let form = FormData::new()
///     .append("tags", "rust")
///     .append("tags", "web")
///     .append("email", "a@b.com");
///
/// assert_eq!(form.len(), 3);
/// assert_eq!(form.get_all("tags").count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormEntry)>,
}

impl FormData {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a submission from text pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), FormEntry::Text(v.into())))
                .collect(),
        }
    }

    /// Appends a value.
    pub fn append(mut self, key: impl Into<String>, value: impl Into<FormEntry>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a file value.
    pub fn append_file(self, key: impl Into<String>, file: FileBlob) -> Self {
        self.append(key, file)
    }

    /// Appends a value in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<FormEntry>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Returns the first value for a key.
    pub fn get(&self, key: &str) -> Option<&FormEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns every value for a key, in submission order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FormEntry> + 'a {
        self.entries.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates entries in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries (repeated keys count once per value).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FormEntry>> FromIterator<(K, V)> for FormData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for FormData {
    type Item = (String, FormEntry);
    type IntoIter = std::vec::IntoIter<(String, FormEntry)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order_and_repeats() {
        let form = FormData::new()
            .append("a", "1")
            .append("b", "2")
            .append("a", "3");

        let keys: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "a"]);
        assert_eq!(form.get("a").and_then(FormEntry::as_text), Some("1"));
        let all: Vec<_> = form.get_all("a").filter_map(FormEntry::as_text).collect();
        assert_eq!(all, vec!["1", "3"]);
    }

    #[test]
    fn test_empty_file_detection() {
        assert!(FileBlob::new("", None, vec![]).is_empty());
        assert!(!FileBlob::new("a.txt", None, vec![]).is_empty());
        assert_eq!(FileBlob::new("a.txt", None, b"hi".to_vec()).size(), 2);
    }

    #[test]
    fn test_collect_from_iterator() {
        let form: FormData = vec![("x", "1"), ("y", "2")].into_iter().collect();
        assert_eq!(form.len(), 2);
        assert!(!form.is_empty());
    }
}
