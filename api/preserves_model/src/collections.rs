// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::{btree_map, btree_set, BTreeMap, BTreeSet};

use crate::Value;


/// An unordered collection of unique values. Membership is decided by structural equality and
/// iteration always yields the members in canonical order.
///
/// A set is a plain owned value; sharing one between threads for mutation requires external
/// synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Set(BTreeSet<Value>);

impl Set {
    pub fn new() -> Self {
        Set::default()
    }

    /// Add a value to the set, returning `false` if an equal value was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        self.0.insert(value)
    }

    pub fn remove(&mut self, value: &Value) -> bool {
        self.0.remove(value)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the members in ascending canonical order.
    pub fn iter(&self) -> btree_set::Iter<'_, Value> {
        self.0.iter()
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Set(iter.into_iter().collect())
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = btree_set::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = btree_set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A mapping from values to values. Keys are unique under structural equality and iteration
/// yields the entries in canonical key order.
///
/// As with [`Set`], concurrent mutation needs to be synchronized by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dictionary(BTreeMap<Value, Value>);

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Associate a value with a key, returning the value previously held for an equal key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &Value) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in ascending canonical key order.
    pub fn iter(&self) -> btree_map::Iter<'_, Value, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, Value, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, Value, Value> {
        self.0.values()
    }
}

impl FromIterator<(Value, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Dictionary(iter.into_iter().collect())
    }
}

impl IntoIterator for Dictionary {
    type Item = (Value, Value);
    type IntoIter = btree_map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Value, &'a Value);
    type IntoIter = btree_map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
