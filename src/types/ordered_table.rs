//! Name-keyed table that keeps declaration order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Anything stored in an [`OrderedTable`] is keyed by its name.
pub trait Named {
  fn name(&self) -> &str;
}

/// Name-keyed table in first-declaration order.
///
/// Re-inserting an existing name replaces the entry in place, so a redeclared section keeps
/// the position of its first declaration (last write wins for the contents).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTable<T> {
  entries: Vec<T>,
  index: HashMap<String, usize>,
}

impl<T> Default for OrderedTable<T> {
  fn default() -> Self {
    Self {
      entries: Vec::new(),
      index: HashMap::new(),
    }
  }
}

impl<T: Named> OrderedTable<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `item`, returning the entry it replaced.
  pub fn insert(&mut self, item: T) -> Option<T> {
    match self.index.get(item.name()) {
      Some(&i) => Some(std::mem::replace(&mut self.entries[i], item)),
      None => {
        self.index.insert(item.name().to_string(), self.entries.len());
        self.entries.push(item);
        None
      }
    }
  }

  pub fn get(&self, name: &str) -> Option<&T> {
    self.index.get(name).map(|&i| &self.entries[i])
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
    match self.index.get(name) {
      Some(&i) => Some(&mut self.entries[i]),
      None => None,
    }
  }

  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(Named::name)
  }
}

impl<T> OrderedTable<T> {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.entries.iter()
  }

  pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
    self.entries.iter_mut()
  }
}

impl<'a, T> IntoIterator for &'a OrderedTable<T> {
  type Item = &'a T;
  type IntoIter = std::slice::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}

impl<T: Named> FromIterator<T> for OrderedTable<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut table = OrderedTable::new();
    for item in iter {
      table.insert(item);
    }
    table
  }
}

/// Serializes as a JSON object keyed by name, in declaration order.
impl<T: Named + Serialize> Serialize for OrderedTable<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for entry in &self.entries {
      map.serialize_entry(entry.name(), entry)?;
    }
    map.end()
  }
}
