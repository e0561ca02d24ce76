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

//! Conversions between the neutral [`Value`] tree and other representations.
//!
//! Codecs with their own trees (such as the text codec, which remembers the syntax each atom was
//! written in) implement both traits. Downstream consumers, such as generated schema types,
//! implement them to move to and from the neutral tree.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::{Dictionary, Set, Value, ValueKind};

#[cfg(test)]
mod tests;

/// Types that can produce a neutral [`Value`] tree.
pub trait ToPreserves {
    fn to_preserves(&self) -> Value;
}

/// Types that can be reconstructed from a neutral [`Value`] tree. Annotations on the input are
/// ignored.
pub trait FromPreserves: Sized {
    fn from_preserves(value: Value) -> Result<Self, ConversionError>;
}

/// A [`Value`] did not have the shape required by the target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The value was of the wrong kind.
    Mismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    /// An integer did not fit into the target type.
    OutOfRange(BigInt),
}

impl ConversionError {
    fn mismatch(expected: ValueKind, found: &Value) -> Self {
        ConversionError::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Mismatch { expected, found } => {
                write!(f, "Expected a value of kind {}, found {}.", expected, found)
            }
            ConversionError::OutOfRange(n) => {
                write!(f, "{} is out of range for the target type.", n)
            }
        }
    }
}

impl Error for ConversionError {}

/// A symbol-typed value, to distinguish symbols from strings in typed conversions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

impl ToPreserves for Value {
    fn to_preserves(&self) -> Value {
        self.clone()
    }
}

impl FromPreserves for Value {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl ToPreserves for bool {
    fn to_preserves(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl FromPreserves for bool {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Boolean(b) => Ok(b),
            ow => Err(ConversionError::mismatch(ValueKind::Boolean, &ow)),
        }
    }
}

impl ToPreserves for f64 {
    fn to_preserves(&self) -> Value {
        Value::Double(*self)
    }
}

impl FromPreserves for f64 {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Double(d) => Ok(d),
            ow => Err(ConversionError::mismatch(ValueKind::Double, &ow)),
        }
    }
}

macro_rules! integer_impls {
    ($($t:ty => $to:ident),*) => {
        $(
            impl ToPreserves for $t {
                fn to_preserves(&self) -> Value {
                    Value::SignedInteger(BigInt::from(*self))
                }
            }

            impl FromPreserves for $t {
                fn from_preserves(value: Value) -> Result<Self, ConversionError> {
                    match value.into_stripped() {
                        Value::SignedInteger(n) => n.$to().ok_or(ConversionError::OutOfRange(n)),
                        ow => Err(ConversionError::mismatch(ValueKind::SignedInteger, &ow)),
                    }
                }
            }
        )*
    };
}

integer_impls!(i32 => to_i32, i64 => to_i64, u32 => to_u32, u64 => to_u64, usize => to_usize);

impl ToPreserves for BigInt {
    fn to_preserves(&self) -> Value {
        Value::SignedInteger(self.clone())
    }
}

impl FromPreserves for BigInt {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::SignedInteger(n) => Ok(n),
            ow => Err(ConversionError::mismatch(ValueKind::SignedInteger, &ow)),
        }
    }
}

impl ToPreserves for String {
    fn to_preserves(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromPreserves for String {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::String(s) => Ok(s),
            ow => Err(ConversionError::mismatch(ValueKind::String, &ow)),
        }
    }
}

impl ToPreserves for Symbol {
    fn to_preserves(&self) -> Value {
        Value::Symbol(self.0.clone())
    }
}

impl FromPreserves for Symbol {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Symbol(s) => Ok(Symbol(s)),
            ow => Err(ConversionError::mismatch(ValueKind::Symbol, &ow)),
        }
    }
}

impl<T: ToPreserves> ToPreserves for Vec<T> {
    fn to_preserves(&self) -> Value {
        Value::Sequence(self.iter().map(ToPreserves::to_preserves).collect())
    }
}

impl<T: FromPreserves> FromPreserves for Vec<T> {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Sequence(items) => items.into_iter().map(T::from_preserves).collect(),
            ow => Err(ConversionError::mismatch(ValueKind::Sequence, &ow)),
        }
    }
}

impl<T: ToPreserves> ToPreserves for BTreeSet<T> {
    fn to_preserves(&self) -> Value {
        Value::Set(self.iter().map(ToPreserves::to_preserves).collect::<Set>())
    }
}

impl<T: FromPreserves + Ord> FromPreserves for BTreeSet<T> {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Set(set) => set.into_iter().map(T::from_preserves).collect(),
            ow => Err(ConversionError::mismatch(ValueKind::Set, &ow)),
        }
    }
}

impl<K: ToPreserves, V: ToPreserves> ToPreserves for BTreeMap<K, V> {
    fn to_preserves(&self) -> Value {
        Value::Dictionary(
            self.iter()
                .map(|(k, v)| (k.to_preserves(), v.to_preserves()))
                .collect::<Dictionary>(),
        )
    }
}

impl<K: FromPreserves + Ord, V: FromPreserves> FromPreserves for BTreeMap<K, V> {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        match value.into_stripped() {
            Value::Dictionary(dict) => dict
                .into_iter()
                .map(|(k, v)| Ok((K::from_preserves(k)?, V::from_preserves(v)?)))
                .collect(),
            ow => Err(ConversionError::mismatch(ValueKind::Dictionary, &ow)),
        }
    }
}
