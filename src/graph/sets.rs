//! Set helpers shared by the mapper and the traversal

use std::collections::HashSet;
use std::hash::Hash;

/// Elements of `b` that are also members of `a`, in `b`'s order.
///
/// Duplicate-free as long as `b` is.
pub fn intersect<'b, T>(a: &[T], b: &'b [T]) -> Vec<&'b T>
where
  T: Eq + Hash,
{
  let members: HashSet<&T> = a.iter().collect();
  b.iter().filter(|item| members.contains(item)).collect()
}

/// Insertion-ordered set of unit identifiers.
///
/// Used for every run-level accumulator so output order follows discovery
/// order and no identifier is ever reported twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitSet {
  order: Vec<String>,
  members: HashSet<String>,
}

impl UnitSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an identifier; returns false if it was already present
  pub fn insert(&mut self, id: impl Into<String>) -> bool {
    let id = id.into();
    if self.contains(&id) {
      return false;
    }
    self.members.insert(id.clone());
    self.order.push(id);
    true
  }

  pub fn contains(&self, id: &str) -> bool {
    self.members.contains(id)
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &String> {
    self.order.iter()
  }

  pub fn as_slice(&self) -> &[String] {
    &self.order
  }

  pub fn into_vec(self) -> Vec<String> {
    self.order
  }
}

impl<S: Into<String>> Extend<S> for UnitSet {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    for id in iter {
      self.insert(id);
    }
  }
}

impl<S: Into<String>> FromIterator<S> for UnitSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    let mut set = UnitSet::new();
    set.extend(iter);
    set
  }
}
