//! Content entities (items and layouts) and their mutable views.

use serde::Serialize;

use crate::attributes::{AttributeStore, AttributeValue};

/// Behavior shared by every entity that carries attributes.
pub trait Document {
  fn identifier(&self) -> &str;
  fn content(&self) -> &str;
  fn attributes(&self) -> &AttributeStore;
  fn attributes_mut(&mut self) -> &mut AttributeStore;
}

/// A piece of content provided by a data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
  identifier: String,
  content: String,
  attributes: AttributeStore,
}

impl Item {
  pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      identifier: identifier.into(),
      content: content.into(),
      attributes: AttributeStore::new(),
    }
  }

  pub fn with_attributes(mut self, attributes: AttributeStore) -> Self {
    self.attributes = attributes;
    self
  }
}

/// A template that items are laid out in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
  identifier: String,
  content: String,
  attributes: AttributeStore,
}

impl Layout {
  pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      identifier: identifier.into(),
      content: content.into(),
      attributes: AttributeStore::new(),
    }
  }

  pub fn with_attributes(mut self, attributes: AttributeStore) -> Self {
    self.attributes = attributes;
    self
  }
}

impl Document for Item {
  fn identifier(&self) -> &str {
    &self.identifier
  }

  fn content(&self) -> &str {
    &self.content
  }

  fn attributes(&self) -> &AttributeStore {
    &self.attributes
  }

  fn attributes_mut(&mut self) -> &mut AttributeStore {
    &mut self.attributes
  }
}

impl Document for Layout {
  fn identifier(&self) -> &str {
    &self.identifier
  }

  fn content(&self) -> &str {
    &self.content
  }

  fn attributes(&self) -> &AttributeStore {
    &self.attributes
  }

  fn attributes_mut(&mut self) -> &mut AttributeStore {
    &mut self.attributes
  }
}

/// Write access to an entity's attributes.
///
/// Commands edit entities through a view rather than reaching into the
/// entity, so the only mutations available are single-key set and bulk
/// update.
pub struct MutableDocumentView<'a, D: Document> {
  document: &'a mut D,
}

pub type MutableItemView<'a> = MutableDocumentView<'a, Item>;
pub type MutableLayoutView<'a> = MutableDocumentView<'a, Layout>;

impl<'a, D: Document> MutableDocumentView<'a, D> {
  pub fn new(document: &'a mut D) -> Self {
    Self { document }
  }

  pub fn identifier(&self) -> &str {
    self.document.identifier()
  }

  pub fn get(&self, key: &str) -> Option<&AttributeValue> {
    self.document.attributes().get(key)
  }

  pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
    self.document.attributes_mut().set(key, value);
  }

  /// Apply every pair in order and return the view for further chaining.
  pub fn update_attributes<I, K, V>(&mut self, updates: I) -> &mut Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
  {
    self.document.attributes_mut().merge_from(updates);
    self
  }
}
