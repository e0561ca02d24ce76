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

/// Creates a record with a symbol label from the provided fields.
///
/// ## A record without fields:
/// ```
/// use preserves_model::{Value, record};
///
/// let value = record!("none");
/// assert_eq!(value, Value::record(Value::symbol("none"), vec![]));
/// ```
///
/// ## A record with fields:
/// ```
/// use preserves_model::{Value, record};
///
/// let value = record!("date", 2024, 1, 1);
/// assert_eq!(
///     value,
///     Value::record(Value::symbol("date"), vec![Value::from(2024), Value::from(1), Value::from(1)])
/// );
/// ```
#[macro_export]
macro_rules! record {
    ($label:expr) => {
        $crate::Value::record($crate::Value::symbol($label), vec![])
    };
    ($label:expr, $($fields:expr),+ $(,)?) => {
        $crate::Value::record(
            $crate::Value::symbol($label),
            vec![$($crate::Value::from($fields)),+],
        )
    };
}

/// Creates a sequence from the provided items.
///
/// ```
/// use preserves_model::{Value, sequence};
///
/// let value = sequence![1, "two", Value::symbol("three")];
/// assert_eq!(value.as_sequence().map(|items| items.len()), Some(3));
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::Value::Sequence(vec![])
    };
    ($($items:expr),+ $(,)?) => {
        $crate::Value::Sequence(vec![$($crate::Value::from($items)),+])
    };
}

/// Creates a set from the provided members. Repeated members are dropped.
///
/// ```
/// use preserves_model::set;
///
/// let value = set![1, 2, 2];
/// assert_eq!(value.as_set().map(|s| s.len()), Some(2));
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Value::Set($crate::Set::new())
    };
    ($($items:expr),+ $(,)?) => {
        $crate::Value::Set(vec![$($crate::Value::from($items)),+].into_iter().collect())
    };
}

/// Creates a dictionary from the provided entries.
///
/// ```
/// use preserves_model::{Value, dictionary};
///
/// let value = dictionary! { Value::symbol("a") => 1, Value::symbol("b") => 2 };
/// let dict = value.as_dictionary().unwrap();
/// assert_eq!(dict.get(&Value::symbol("b")), Some(&Value::from(2)));
/// ```
#[macro_export]
macro_rules! dictionary {
    () => {
        $crate::Value::Dictionary($crate::Dictionary::new())
    };
    ($($keys:expr => $values:expr),+ $(,)?) => {
        $crate::Value::Dictionary(
            vec![$(($crate::Value::from($keys), $crate::Value::from($values))),+]
                .into_iter()
                .collect(),
        )
    };
}
