//! Product attributes and shopper selections.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A declared attribute and its allowed values, e.g. `Size: [S, M, L]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub name: String,
    pub values: Vec<String>,
}

impl AttributeOption {
    /// An attribute with no values cannot be picked from, but is still required.
    pub fn is_selectable(&self) -> bool {
        !self.values.is_empty()
    }
}

/// String form of an attribute value.
///
/// Strings are taken verbatim and numbers use their JSON spelling, so a
/// variant declaring `10` matches a selection of `"10"`. Booleans become
/// `"true"`/`"false"`. Null, arrays and objects have no string form.
/// An empty string counts as no value.
pub fn attribute_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Read an attribute map (`{ name: value }`) into coerced strings.
pub(crate) fn attribute_map(value: &Value) -> BTreeMap<String, String> {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| attribute_text(v).map(|t| (k.clone(), t)))
                .collect()
        })
        .unwrap_or_default()
}

/// Read a declared attribute map (`{ name: [values] }`) preserving order.
///
/// Names are kept even when their value list is empty or missing.
pub(crate) fn attribute_options(value: &Value) -> Vec<AttributeOption> {
    let Some(map) = value.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, values)| AttributeOption {
            name: name.clone(),
            values: values
                .as_array()
                .map(|vs| vs.iter().filter_map(attribute_text).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// The shopper's current choice per attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSelection(BTreeMap<String, String>);

impl AttributeSelection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Choose a value. Choosing an empty value clears the attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&name);
        } else {
            self.0.insert(name, value);
        }
    }

    /// The chosen value, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selected `(name, value)` pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay another selection on top of this one.
    pub fn merge(&mut self, other: &AttributeSelection) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// Parse `Name=Value` pairs, as given on a command line.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CommerceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| CommerceError::InvalidSelection(pair.to_string()))?;
            if name.is_empty() {
                return Err(CommerceError::InvalidSelection(pair.to_string()));
            }
            selection.set(name, value);
        }
        Ok(selection)
    }

    /// Human-readable label such as `Color: Red / Size: L`.
    pub fn label(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl FromIterator<(String, String)> for AttributeSelection {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut selection = Self::new();
        for (k, v) in iter {
            selection.set(k, v);
        }
        selection
    }
}
