//! Mutable key/value attributes carried by items and layouts.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub type AttributeValue = serde_json::Value;

/// Attribute map owned by a single entity.
///
/// Keys are unique. Lookup does not depend on insertion order, but a bulk
/// update is applied in the order given, so a later duplicate key wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeStore {
  entries: BTreeMap<String, AttributeValue>,
}

impl AttributeStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&AttributeValue> {
    self.entries.get(key)
  }

  /// Overwrite (or create) exactly one key. No validation is performed on
  /// either the key or the value.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
    self.entries.insert(key.into(), value.into());
  }

  /// Apply each pair in order, last write wins per key.
  pub fn merge_from<I, K, V>(&mut self, updates: I) -> &mut Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
  {
    for (key, value) in updates {
      self.set(key, value);
    }
    self
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeValue> {
    self.entries.iter()
  }
}

impl<'a> IntoIterator for &'a AttributeStore {
  type Item = (&'a String, &'a AttributeValue);
  type IntoIter = btree_map::Iter<'a, String, AttributeValue>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

impl<K, V> FromIterator<(K, V)> for AttributeStore
where
  K: Into<String>,
  V: Into<AttributeValue>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut store = AttributeStore::new();
    store.merge_from(iter);
    store
  }
}

/// Parse a `key=value` assignment as typed on the command line.
///
/// Numbers and booleans keep their type (`count=3`, `draft=true`); every other
/// value is stored as the literal string.
pub fn parse_assignment(input: &str) -> Result<(String, AttributeValue), Error> {
  let Some((key, raw)) = input.split_once('=') else {
    return Err(Error::trivial(format!("Attribute assignment must look like key=value: {}", input)));
  };

  let key = key.trim();
  if key.is_empty() {
    return Err(Error::trivial(format!("Attribute assignment has an empty key: {}", input)));
  }

  let value = match serde_yaml::from_str::<AttributeValue>(raw) {
    Ok(value @ (AttributeValue::Bool(_) | AttributeValue::Number(_))) => value,
    _ => AttributeValue::String(raw.to_string()),
  };

  Ok((key.to_string(), value))
}
