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

use std::fmt::{Display, Formatter};

use num_bigint::BigInt;

use crate::{Dictionary, Set, Value};

/// The kinds of [`Value`]. The declaration order is the rank used to order values of different
/// kinds so the derived [`Ord`] implementation must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Boolean,
    Double,
    SignedInteger,
    String,
    ByteString,
    Symbol,
    Record,
    Sequence,
    Set,
    Dictionary,
    Annotation,
    Embedded,
    Comment,
}

impl ValueKind {
    /// Whether values of this kind are atoms (they have no child values).
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ValueKind::Boolean
                | ValueKind::Double
                | ValueKind::SignedInteger
                | ValueKind::String
                | ValueKind::ByteString
                | ValueKind::Symbol
        )
    }

    pub fn is_compound(&self) -> bool {
        !self.is_atom()
    }

    /// Create a fresh, empty instance of this kind.
    ///
    /// Records, annotations, embedded values and comments cannot exist without their children so
    /// there is no empty instance for them.
    ///
    /// # Examples
    /// ```
    /// use preserves_model::{Value, ValueKind};
    ///
    /// assert_eq!(ValueKind::Sequence.empty_value(), Some(Value::Sequence(vec![])));
    /// assert_eq!(ValueKind::Record.empty_value(), None);
    /// ```
    pub fn empty_value(self) -> Option<Value> {
        match self {
            ValueKind::Boolean => Some(Value::Boolean(false)),
            ValueKind::Double => Some(Value::Double(0.0)),
            ValueKind::SignedInteger => Some(Value::SignedInteger(BigInt::default())),
            ValueKind::String => Some(Value::String(String::new())),
            ValueKind::ByteString => Some(Value::ByteString(Vec::new())),
            ValueKind::Symbol => Some(Value::Symbol(String::new())),
            ValueKind::Sequence => Some(Value::Sequence(Vec::new())),
            ValueKind::Set => Some(Value::Set(Set::new())),
            ValueKind::Dictionary => Some(Value::Dictionary(Dictionary::new())),
            ValueKind::Record | ValueKind::Annotation | ValueKind::Embedded | ValueKind::Comment => {
                None
            }
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Boolean => "Boolean",
            ValueKind::Double => "Double",
            ValueKind::SignedInteger => "SignedInteger",
            ValueKind::String => "String",
            ValueKind::ByteString => "ByteString",
            ValueKind::Symbol => "Symbol",
            ValueKind::Record => "Record",
            ValueKind::Sequence => "Sequence",
            ValueKind::Set => "Set",
            ValueKind::Dictionary => "Dictionary",
            ValueKind::Annotation => "Annotation",
            ValueKind::Embedded => "Embedded",
            ValueKind::Comment => "Comment",
        };
        f.write_str(name)
    }
}
