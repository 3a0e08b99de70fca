// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Decoded input values.
//!
//! A [`DecodedInput`] is the nested record produced by the
//! [decoder](crate::decode). Its values are [`FormValue`]s: absent, text,
//! file, a sequence of values (repeated keys) or a nested record (dotted
//! keys). Key order of first appearance is preserved at every level.
//!
//! Decoded input serializes to plain JSON: absent becomes `null`, files
//! become `{ "filename", "contentType", "size" }`.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::form_data::{FileBlob, FormEntry};

/// A single decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// The key was submitted without a value.
    Absent,
    /// A text value.
    Text(String),
    /// An uploaded file, kept as an opaque scalar.
    File(FileBlob),
    /// Values of a repeated key, in submission order.
    List(Vec<FormValue>),
    /// A nested record built from dotted keys.
    Map(DecodedInput),
}

impl FormValue {
    /// True for the absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, FormValue::Absent)
    }

    /// Returns the text of a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the file of a file value.
    pub fn as_file(&self) -> Option<&FileBlob> {
        match self {
            FormValue::File(f) => Some(f),
            _ => None,
        }
    }

    /// Returns the values of a sequence.
    pub fn as_list(&self) -> Option<&[FormValue]> {
        match self {
            FormValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the nested record.
    pub fn as_map(&self) -> Option<&DecodedInput> {
        match self {
            FormValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Converts the value to plain JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FormValue::Absent => serde_json::Value::Null,
            FormValue::Text(s) => serde_json::Value::String(s.clone()),
            FormValue::File(f) => file_json(f),
            FormValue::List(items) => serde_json::Value::Array(items.iter().map(FormValue::to_json).collect()),
            FormValue::Map(map) => map.to_json(),
        }
    }

    pub(crate) fn from_entry(entry: FormEntry) -> Self {
        match entry {
            FormEntry::Text(s) => FormValue::Text(s),
            FormEntry::File(f) => FormValue::File(f),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

fn file_json(file: &FileBlob) -> serde_json::Value {
    serde_json::json!({
        "filename": file.filename,
        "contentType": file.content_type,
        "size": file.size(),
    })
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormValue::Absent => serializer.serialize_none(),
            FormValue::Text(s) => serializer.serialize_str(s),
            FormValue::File(f) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("filename", &f.filename)?;
                map.serialize_entry("contentType", &f.content_type)?;
                map.serialize_entry("size", &f.size())?;
                map.end()
            }
            FormValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FormValue::Map(map) => map.serialize(serializer),
        }
    }
}

/// The nested, order-preserving record decoded from a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedInput {
    fields: IndexMap<String, FormValue>,
}

impl DecodedInput {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under a key at this level.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.get(key)
    }

    /// Returns the value at a path of nested keys.
    pub fn get_path<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&FormValue> {
        let mut segments = path.into_iter();
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the text stored under a key, ignoring absent and empty values.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(FormValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Returns every text value under a key: one for a scalar, all for a sequence.
    pub fn get_texts(&self, key: &str) -> Vec<&str> {
        match self.get(key) {
            Some(FormValue::Text(s)) => vec![s.as_str()],
            Some(FormValue::List(items)) => items.iter().filter_map(FormValue::as_text).collect(),
            _ => Vec::new(),
        }
    }

    /// True when a key is present with a non-absent value.
    pub fn is_provided(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_absent())
    }

    /// Inserts a value, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: FormValue) -> Option<FormValue> {
        self.fields.insert(key.into(), value)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Iterates fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts the record to a plain JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    pub(crate) fn fields_mut(&mut self) -> &mut IndexMap<String, FormValue> {
        &mut self.fields
    }
}

impl From<DecodedInput> for FormValue {
    fn from(value: DecodedInput) -> Self {
        FormValue::Map(value)
    }
}

impl Serialize for DecodedInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
