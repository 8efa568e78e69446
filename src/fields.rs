// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Field mapping and the `key=value`/JSON field loader.

use linked_hash_map::LinkedHashMap;
use serde_json::Value;

/// Insertion-ordered mapping from a field name to its value.
///
/// Values loaded from `key=value` entries are plain strings, while values
/// loaded from JSON entries keep their decoded type.
pub type FieldMap = LinkedHashMap<String, Value>;

/// Loads a [`FieldMap`] out of raw `--custom-fields`-style entries.
///
/// Every entry is tried as a JSON object first; entries failing to decode
/// fall back to a split on the first `=` into a string-valued field. Entries
/// merge left-to-right, so a later duplicate key overwrites an earlier one.
///
/// Empty entries, and entries carrying neither a JSON object nor a `=`, are
/// skipped: no input shape makes this loader fail.
pub fn load_custom_fields<I, S>(entries: I) -> FieldMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fields = FieldMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        if entry.is_empty() {
            continue;
        }
        if let Ok(Value::Object(decoded)) = serde_json::from_str(entry) {
            for (name, value) in decoded {
                fields.insert(name, value);
            }
            continue;
        }
        if let Some((name, value)) = entry.split_once('=') {
            if name.is_empty() {
                tracing::debug!("skipping field entry with empty key: {entry}");
                continue;
            }
            fields.insert(name.to_owned(), Value::String(value.to_owned()));
        } else {
            tracing::debug!("skipping malformed field entry: {entry}");
        }
    }
    fields
}

/// Renders a field value the way it should appear in XML attribute or text
/// content.
///
/// JSON strings render as their bare contents, any other decoded value keeps
/// its JSON notation (`true`, `42`, ...).
#[must_use]
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
