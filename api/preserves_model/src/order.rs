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

//! The canonical total order over [`Value`]s.
//!
//! Values of different kinds are ordered by the rank of their [`ValueKind`]. Within a kind:
//!
//! - booleans order `false` before `true`;
//! - doubles use the IEEE-754 total order, so `NaN` is equal to itself and `-0.0 < 0.0`;
//! - integers order numerically;
//! - strings, symbols and byte strings order lexicographically by their bytes;
//! - records order by label and then by their fields;
//! - sequences, sets and dictionaries order element-wise, sets and dictionaries using their
//! canonical (sorted) iteration order.
//!
//! Annotations and comments are stripped before comparing so that the order agrees with
//! equality. Both codecs use this order to write sets and dictionaries canonically.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::{ToPreserves, Value, ValueKind};


/// Compare two kinds by their rank.
pub fn compare_kinds(left: ValueKind, right: ValueKind) -> Ordering {
    left.cmp(&right)
}

/// Sort a slice into canonical order, comparing the neutral form of each item. The neutral form
/// of each item is computed once.
pub fn canonical_sort<T: ToPreserves>(items: &mut [T]) {
    items.sort_by_cached_key(ToPreserves::to_preserves);
}

/// Produce references to the items of a slice in canonical order of the keys extracted from
/// them. Where several items have equal keys only the first is kept.
pub fn canonical_order_by<T, F>(items: &[T], key: F) -> Vec<&T>
where
    F: Fn(&T) -> Value,
{
    let mut keyed = items
        .iter()
        .map(|item| (key(item), item))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
    keyed.dedup_by(|(later, _), (earlier, _)| later == earlier);
    keyed.into_iter().map(|(_, item)| item).collect()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.strip(), other.strip()) {
            (Value::Boolean(left), Value::Boolean(right)) => left.cmp(right),
            (Value::Double(left), Value::Double(right)) => left.total_cmp(right),
            (Value::SignedInteger(left), Value::SignedInteger(right)) => left.cmp(right),
            (Value::String(left), Value::String(right)) => left.cmp(right),
            (Value::ByteString(left), Value::ByteString(right)) => left.cmp(right),
            (Value::Symbol(left), Value::Symbol(right)) => left.cmp(right),
            (Value::Record(left), Value::Record(right)) => left.cmp(right),
            (Value::Sequence(left), Value::Sequence(right)) => left.cmp(right),
            (Value::Set(left), Value::Set(right)) => left.cmp(right),
            (Value::Dictionary(left), Value::Dictionary(right)) => left.cmp(right),
            (Value::Embedded(left), Value::Embedded(right)) => left.cmp(right),
            (left, right) => compare_kinds(left.kind(), right.kind()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let stripped = self.strip();
        stripped.kind().hash(state);
        match stripped {
            Value::Boolean(b) => b.hash(state),
            Value::Double(d) => d.to_bits().hash(state),
            Value::SignedInteger(n) => n.hash(state),
            Value::String(s) | Value::Symbol(s) => s.hash(state),
            Value::ByteString(bytes) => bytes.hash(state),
            Value::Record(record) => record.hash(state),
            Value::Sequence(items) => items.hash(state),
            Value::Set(set) => set.hash(state),
            Value::Dictionary(dict) => dict.hash(state),
            Value::Embedded(inner) => inner.hash(state),
            Value::Annotation(_) | Value::Comment(_) => {}
        }
    }
}
