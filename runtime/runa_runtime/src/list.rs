// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use crate::error::{RuntimeError, RuntimeResult};

/// Capacity reserved by a freshly created list.
pub const INITIAL_CAPACITY: usize = 8;

/// Value returned across the ABI when `find` has no match.
pub const NOT_FOUND: i64 = -1;

/// Growable sequence of 64-bit integers backing Runa's list value.
///
/// Indices are 0-based. Every indexed access is bounds checked and
/// reports `RuntimeError::IndexOutOfRange` instead of touching memory
/// outside the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunaList {
    items: Vec<i64>
}

impl Default for RunaList {
    fn default() -> Self {
        Self::new()
    }
}

impl RunaList {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(INITIAL_CAPACITY)
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.items
    }

    pub fn append(&mut self, value: i64) {
        self.items.push(value);
    }

    pub fn get(&self, index: i64) -> RuntimeResult<i64> {
        let idx = self.checked_index(index, self.len())?;
        Ok(self.items[idx])
    }

    pub fn set(&mut self, index: i64, value: i64) -> RuntimeResult<()> {
        let idx = self.checked_index(index, self.len())?;
        self.items[idx] = value;
        Ok(())
    }

    /// Inserts `value` before position `index`. `index == len` appends.
    pub fn insert(&mut self, index: i64, value: i64) -> RuntimeResult<()> {
        let idx = self.checked_index(index, self.len() + 1)?;
        self.items.insert(idx, value);
        Ok(())
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: i64) -> RuntimeResult<i64> {
        let idx = self.checked_index(index, self.len())?;
        Ok(self.items.remove(idx))
    }

    /// Drops every element but keeps the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Position of the first element equal to `value`.
    pub fn find(&self, value: i64) -> Option<usize> {
        self.items.iter().position(|&item| item == value)
    }

    pub fn sort(&mut self) {
        self.items.sort_unstable();
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// New list with the same contents. Storage is never shared.
    pub fn copy(&self) -> Self {
        let mut items = Vec::with_capacity(self.len().max(INITIAL_CAPACITY));
        items.extend_from_slice(&self.items);
        Self { items }
    }

    /// New list holding `self`'s elements followed by `other`'s.
    pub fn merge(&self, other: &RunaList) -> Self {
        let mut items = Vec::with_capacity((self.len() + other.len()).max(INITIAL_CAPACITY));
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Self { items }
    }

    /// `bound` is exclusive.
    fn checked_index(&self, index: i64, bound: usize) -> RuntimeResult<usize> {
        match usize::try_from(index) {
            Ok(idx) if idx < bound => Ok(idx),
            _ => Err(RuntimeError::IndexOutOfRange { index, length: self.len() })
        }
    }
}

impl From<Vec<i64>> for RunaList {
    fn from(items: Vec<i64>) -> Self {
        Self { items }
    }
}

impl FromIterator<i64> for RunaList {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut list = RunaList::new();
        list.items.extend(iter);
        list
    }
}
