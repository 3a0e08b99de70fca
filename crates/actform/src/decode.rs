// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Decoding of flat submissions into nested records.
//!
//! Decoding runs in two passes:
//!
//! 1. **Grouping**: entries are folded in submission order. The first value
//!    of a key is stored as a scalar (empty values become
//!    [`FormValue::Absent`]); a second value promotes it to a sequence and
//!    later values are appended verbatim.
//! 2. **Nesting**: keys containing the separator are split into a path and
//!    assigned into nested records. Keys with an empty segment (`"a..b"`,
//!    `"."`) are not paths and stay flat.
//!
//! When a plain key and a dotted key share a prefix (`a` and `a.b`), the
//! configured [`CollisionPolicy`] decides the outcome. An absent value at
//! the prefix never collides.

use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::config::{CollisionPolicy, DecoderConfig};
use crate::form_data::FormEntry;
use crate::value::{DecodedInput, FormValue};

/// Converts submitted entries into a [`DecodedInput`].
///
/// # Example
///
/// ```rust
/// use actform::{FormData, FormDataDecoder, FormValue};
///
/// let form = FormData::from_pairs([
///     ("address.city", "Rome"),
///     ("address.zip", "00100"),
///     ("tags", "a"),
///     ("tags", "b"),
/// ]);
///
/// let input = FormDataDecoder::default().decode(form);
/// assert_eq!(
///     input.get_path(["address", "city"]).and_then(FormValue::as_text),
///     Some("Rome")
/// );
/// assert_eq!(input.get_texts("tags"), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormDataDecoder {
    config: DecoderConfig,
}

impl FormDataDecoder {
    /// Creates a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Returns the decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes entries into a nested record. Never fails.
    pub fn decode<I, K>(&self, entries: I) -> DecodedInput
    where
        I: IntoIterator<Item = (K, FormEntry)>,
        K: Into<String>,
    {
        let flat = self.group(entries);
        let decoded = self.nest(flat);
        tracing::debug!(fields = decoded.len(), "decoded form submission");
        decoded
    }

    fn group<I, K>(&self, entries: I) -> IndexMap<String, FormValue>
    where
        I: IntoIterator<Item = (K, FormEntry)>,
        K: Into<String>,
    {
        let mut flat: IndexMap<String, FormValue> = IndexMap::new();

        for (key, entry) in entries {
            let value = FormValue::from_entry(entry);
            match flat.entry(key.into()) {
                Entry::Vacant(slot) => {
                    let value = if self.is_empty_value(&value) {
                        FormValue::Absent
                    } else {
                        value
                    };
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    FormValue::List(items) => items.push(value),
                    existing => {
                        let first = std::mem::replace(existing, FormValue::Absent);
                        *existing = FormValue::List(vec![first, value]);
                    }
                },
            }
        }

        flat
    }

    fn nest(&self, flat: IndexMap<String, FormValue>) -> DecodedInput {
        let kept_flat = match self.config.collisions {
            CollisionPolicy::NestedWins => HashSet::new(),
            CollisionPolicy::KeepFlat => self.colliding_paths(&flat),
        };

        let mut decoded = DecodedInput::new();
        for (key, value) in flat {
            match self.split_path(&key) {
                Some(segments) if !kept_flat.contains(&key) => {
                    insert_path(decoded.fields_mut(), &segments, value);
                }
                _ => insert_path(decoded.fields_mut(), &[key.as_str()], value),
            }
        }
        decoded
    }

    /// Dotted keys with a proper prefix that was submitted with a value.
    fn colliding_paths(&self, flat: &IndexMap<String, FormValue>) -> HashSet<String> {
        let provided: HashSet<&str> = flat
            .iter()
            .filter(|(_, v)| !v.is_absent())
            .map(|(k, _)| k.as_str())
            .collect();

        flat.keys()
            .filter(|key| self.split_path(key).is_some())
            .filter(|key| {
                key.match_indices(self.config.separator)
                    .any(|(idx, _)| provided.contains(&key[..idx]))
            })
            .inspect(|key| tracing::debug!(key = %key, "dotted key collides with a scalar, kept flat"))
            .cloned()
            .collect()
    }

    fn split_path<'k>(&self, key: &'k str) -> Option<Vec<&'k str>> {
        if !key.contains(self.config.separator) {
            return None;
        }
        let segments: Vec<&str> = key.split(self.config.separator).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(segments)
    }

    fn is_empty_value(&self, value: &FormValue) -> bool {
        match value {
            FormValue::Text(s) => s.is_empty(),
            FormValue::File(f) => self.config.empty_file_is_absent && f.is_empty(),
            _ => false,
        }
    }
}

/// Decodes entries with the default configuration.
pub fn decode<I, K>(entries: I) -> DecodedInput
where
    I: IntoIterator<Item = (K, FormEntry)>,
    K: Into<String>,
{
    FormDataDecoder::default().decode(entries)
}

/// Assigns `value` at `segments`, creating nested records on the way.
///
/// A scalar standing where a record is needed is replaced; a scalar landing
/// on an existing record is dropped. Either way the nested record wins.
fn insert_path(fields: &mut IndexMap<String, FormValue>, segments: &[&str], value: FormValue) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = fields;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| FormValue::Map(DecodedInput::new()));
        if !matches!(slot, FormValue::Map(_)) {
            if !slot.is_absent() {
                tracing::debug!(key = %segment, "nested field replaces scalar value");
            }
            *slot = FormValue::Map(DecodedInput::new());
        }
        let FormValue::Map(map) = slot else {
            return;
        };
        current = map.fields_mut();
    }

    if matches!(current.get(*last), Some(FormValue::Map(_))) {
        if !value.is_absent() {
            tracing::debug!(key = %last, "scalar value dropped in favour of nested field");
        }
        return;
    }
    current.insert(last.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_data::{FileBlob, FormData};
    use serde_json::json;

    fn decode_pairs(pairs: &[(&str, &str)]) -> serde_json::Value {
        decode(FormData::from_pairs(pairs.iter().copied())).to_json()
    }

    fn decode_with(policy: CollisionPolicy, pairs: &[(&str, &str)]) -> serde_json::Value {
        let decoder = FormDataDecoder::new(DecoderConfig {
            collisions: policy,
            ..DecoderConfig::default()
        });
        decoder.decode(FormData::from_pairs(pairs.iter().copied())).to_json()
    }

    #[test]
    fn test_unique_keys_decode_flat() {
        let value = decode_pairs(&[("name", "Ada"), ("nickname", ""), ("email", "ada@example.com")]);
        assert_eq!(
            value,
            json!({ "name": "Ada", "nickname": null, "email": "ada@example.com" })
        );
    }

    #[test]
    fn test_key_order_is_first_appearance() {
        let input = decode(FormData::from_pairs([("b", "1"), ("a", "2"), ("b", "3")]));
        let keys: Vec<&str> = input.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_repeated_keys_group_into_sequence() {
        assert_eq!(decode_pairs(&[("tags", "a"), ("tags", "b")]), json!({ "tags": ["a", "b"] }));
        assert_eq!(decode_pairs(&[("tags", "a")]), json!({ "tags": "a" }));
        assert_eq!(
            decode_pairs(&[("tags", "a"), ("tags", "b"), ("tags", "c")]),
            json!({ "tags": ["a", "b", "c"] })
        );
    }

    #[test]
    fn test_only_first_value_is_normalized() {
        assert_eq!(decode_pairs(&[("x", ""), ("x", "b")]), json!({ "x": [null, "b"] }));
        assert_eq!(decode_pairs(&[("x", "a"), ("x", "")]), json!({ "x": ["a", ""] }));
    }

    #[test]
    fn test_dotted_keys_nest() {
        let value = decode_pairs(&[("address.city", "Rome"), ("address.zip", "00100")]);
        assert_eq!(value, json!({ "address": { "city": "Rome", "zip": "00100" } }));
        assert!(value.get("address.city").is_none());
    }

    #[test]
    fn test_deep_nesting_and_grouping() {
        let value = decode_pairs(&[
            ("user.address.city", "Rome"),
            ("user.name", "Ada"),
            ("user.roles", "admin"),
            ("user.roles", "dev"),
        ]);
        assert_eq!(
            value,
            json!({ "user": { "address": { "city": "Rome" }, "name": "Ada", "roles": ["admin", "dev"] } })
        );
    }

    #[test]
    fn test_nested_record_takes_position_of_first_path() {
        let input = decode(FormData::from_pairs([
            ("name", "Ada"),
            ("address.city", "Rome"),
            ("email", "a@b.com"),
        ]));
        let keys: Vec<&str> = input.keys().collect();
        assert_eq!(keys, vec!["name", "address", "email"]);
    }

    #[test]
    fn test_keys_with_empty_segments_stay_flat() {
        let value = decode_pairs(&[(".", "x"), ("a..b", "y"), (".lead", "z"), ("trail.", "w")]);
        assert_eq!(value, json!({ ".": "x", "a..b": "y", ".lead": "z", "trail.": "w" }));
    }

    #[test]
    fn test_nested_wins_over_scalar_in_any_order() {
        let expected = json!({ "a": { "b": "nested" } });
        assert_eq!(
            decode_with(CollisionPolicy::NestedWins, &[("a", "scalar"), ("a.b", "nested")]),
            expected
        );
        assert_eq!(
            decode_with(CollisionPolicy::NestedWins, &[("a.b", "nested"), ("a", "scalar")]),
            expected
        );
        assert_eq!(
            decode_with(CollisionPolicy::NestedWins, &[("a.b", "x"), ("a.b.c", "y")]),
            json!({ "a": { "b": { "c": "y" } } })
        );
    }

    #[test]
    fn test_keep_flat_preserves_scalar() {
        assert_eq!(
            decode_with(CollisionPolicy::KeepFlat, &[("a", "scalar"), ("a.b", "nested"), ("c.d", "e")]),
            json!({ "a": "scalar", "a.b": "nested", "c": { "d": "e" } })
        );
        assert_eq!(
            decode_with(CollisionPolicy::KeepFlat, &[("a.b", "x"), ("a.b.c", "y")]),
            json!({ "a": { "b": "x" }, "a.b.c": "y" })
        );
    }

    #[test]
    fn test_absent_prefix_never_collides() {
        for policy in [CollisionPolicy::NestedWins, CollisionPolicy::KeepFlat] {
            assert_eq!(
                decode_with(policy, &[("a", ""), ("a.b", "x")]),
                json!({ "a": { "b": "x" } })
            );
            assert_eq!(
                decode_with(policy, &[("a.b", "x"), ("a", "")]),
                json!({ "a": { "b": "x" } })
            );
        }
    }

    #[test]
    fn test_custom_separator() {
        let decoder = FormDataDecoder::new(DecoderConfig {
            separator: '/',
            ..DecoderConfig::default()
        });
        let value = decoder
            .decode(FormData::from_pairs([("a/b", "1"), ("c.d", "2")]))
            .to_json();
        assert_eq!(value, json!({ "a": { "b": "1" }, "c.d": "2" }));
    }

    #[test]
    fn test_files_are_opaque_scalars() {
        let photo = FileBlob::new("a.png", Some("image/png".to_string()), vec![1]);
        let form = FormData::new()
            .append_file("gallery.photos", photo.clone())
            .append_file("gallery.photos", FileBlob::new("b.png", None, vec![2, 3]))
            .append_file("cv", FileBlob::new("", None, vec![]));

        let input = decode(form);
        let photos = input
            .get_path(["gallery", "photos"])
            .and_then(FormValue::as_list)
            .unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].as_file(), Some(&photo));
        assert!(input.get("cv").unwrap().is_absent());
    }

    #[test]
    fn test_empty_file_kept_when_configured() {
        let decoder = FormDataDecoder::new(DecoderConfig {
            empty_file_is_absent: false,
            ..DecoderConfig::default()
        });
        let input = decoder.decode(FormData::new().append_file("cv", FileBlob::new("", None, vec![])));
        assert!(input.get("cv").and_then(FormValue::as_file).is_some());
    }

    #[test]
    fn test_empty_submission() {
        assert!(decode(FormData::new()).is_empty());
    }
}
