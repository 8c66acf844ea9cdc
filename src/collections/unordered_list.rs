use std::fmt;

use super::{write_sequence, CollectionError};

/// Insertion-ordered list; callers choose which end (or which neighbour) an
/// element goes next to.
#[derive(Debug, Clone, PartialEq)]
pub struct UnorderedList<T> {
    items: Vec<T>,
}

impl<T> UnorderedList<T> {
    pub fn new() -> Self {
        UnorderedList { items: Vec::new() }
    }

    pub fn add_to_front(&mut self, element: T) {
        self.items.insert(0, element);
    }

    pub fn add_to_rear(&mut self, element: T) {
        self.items.push(element);
    }

    pub fn remove_first(&mut self) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::empty("list"));
        }
        Ok(self.items.remove(0))
    }

    pub fn remove_last(&mut self) -> Result<T, CollectionError> {
        self.items.pop().ok_or(CollectionError::empty("list"))
    }

    pub fn first(&self) -> Result<&T, CollectionError> {
        self.items.first().ok_or(CollectionError::empty("list"))
    }

    pub fn last(&self) -> Result<&T, CollectionError> {
        self.items.last().ok_or(CollectionError::empty("list"))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<T: PartialEq> UnorderedList<T> {
    pub fn contains(&self, target: &T) -> bool {
        self.items.contains(target)
    }

    /// Inserts `element` right after the first occurrence of `target`.
    pub fn add_after(&mut self, element: T, target: &T) -> Result<(), CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::empty("list"));
        }
        let position = self
            .items
            .iter()
            .position(|item| item == target)
            .ok_or(CollectionError::not_found("list"))?;
        self.items.insert(position + 1, element);
        Ok(())
    }

    /// Removes and returns the first occurrence of `target`.
    pub fn remove(&mut self, target: &T) -> Result<T, CollectionError> {
        if self.items.is_empty() {
            return Err(CollectionError::empty("list"));
        }
        let position = self
            .items
            .iter()
            .position(|item| item == target)
            .ok_or(CollectionError::not_found("list"))?;
        Ok(self.items.remove(position))
    }
}

impl<T> Default for UnorderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for UnorderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        UnorderedList {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for UnorderedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a UnorderedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for UnorderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_sequence(f, self.iter())
    }
}
