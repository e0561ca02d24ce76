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

use std::collections::{BTreeMap, BTreeSet};

use num_bigint::BigInt;

use super::{ConversionError, FromPreserves, Symbol, ToPreserves};
use crate::{Value, ValueKind};

#[test]
fn primitives_to_preserves() {
    assert_eq!(true.to_preserves(), Value::Boolean(true));
    assert_eq!(2.5f64.to_preserves(), Value::Double(2.5));
    assert_eq!(12i64.to_preserves(), Value::from(12));
    assert_eq!("s".to_string().to_preserves(), Value::from("s"));
    assert_eq!(Symbol::from("s").to_preserves(), Value::symbol("s"));
}

#[test]
fn primitives_from_preserves() {
    assert_eq!(bool::from_preserves(Value::from(false)), Ok(false));
    assert_eq!(f64::from_preserves(Value::from(0.5)), Ok(0.5));
    assert_eq!(u32::from_preserves(Value::from(7)), Ok(7));
    assert_eq!(
        String::from_preserves(Value::from("text")),
        Ok("text".to_string())
    );
    assert_eq!(
        Symbol::from_preserves(Value::symbol("sym")),
        Ok(Symbol::from("sym"))
    );
}

#[test]
fn annotations_are_ignored() {
    let value = Value::annotated(Value::symbol("doc"), Value::from(3));
    assert_eq!(i64::from_preserves(value), Ok(3));
}

#[test]
fn kind_mismatch() {
    assert_eq!(
        String::from_preserves(Value::symbol("sym")),
        Err(ConversionError::Mismatch {
            expected: ValueKind::String,
            found: ValueKind::Symbol
        })
    );
    let err = bool::from_preserves(Value::from(1)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected a value of kind Boolean, found SignedInteger."
    );
}

#[test]
fn integer_out_of_range() {
    assert_eq!(
        u32::from_preserves(Value::from(-1)),
        Err(ConversionError::OutOfRange(BigInt::from(-1)))
    );
    assert!(i32::from_preserves(Value::from(i64::MAX)).is_err());
    assert_eq!(i64::from_preserves(Value::from(i64::MAX)), Ok(i64::MAX));
}

#[test]
fn collections_round_trip() {
    let items = vec![1i64, 2, 3];
    let value = items.to_preserves();
    assert_eq!(value, Value::sequence(vec![1, 2, 3]));
    assert_eq!(Vec::<i64>::from_preserves(value), Ok(items));

    let set: BTreeSet<String> = vec!["b".to_string(), "a".to_string()]
        .into_iter()
        .collect();
    let value = set.to_preserves();
    assert_eq!(value, Value::set(vec!["a", "b"]));
    assert_eq!(BTreeSet::<String>::from_preserves(value), Ok(set));

    let mut map = BTreeMap::new();
    map.insert(Symbol::from("key"), 1u64);
    let value = map.to_preserves();
    assert_eq!(
        value,
        Value::dictionary(vec![(Value::symbol("key"), Value::from(1))])
    );
    assert_eq!(BTreeMap::<Symbol, u64>::from_preserves(value), Ok(map));
}

#[test]
fn nested_failure_is_reported() {
    let value = Value::sequence(vec![Value::from(1), Value::from("two")]);
    assert_eq!(
        Vec::<i64>::from_preserves(value),
        Err(ConversionError::Mismatch {
            expected: ValueKind::SignedInteger,
            found: ValueKind::String
        })
    );
}
