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

use num_bigint::{BigInt, BigUint};

use crate::{Annotated, Comment, CommentKind, Dictionary, Record, Set, ValueKind};


/// The universe of Preserves values.
///
/// Atoms hold their payload directly; compounds exclusively own their children. Equality,
/// ordering and hashing are structural and ignore annotations and comments, see
/// [`crate::order`].
///
/// # Examples
/// ```
/// use preserves_model::Value;
///
/// let date = Value::record(
///     Value::symbol("date"),
///     vec![Value::from(2024), Value::from(1), Value::from(1)],
/// );
/// assert_eq!(date.to_string(), "<date 2024 1 1>");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Double(f64),
    /// An integer of unbounded magnitude.
    SignedInteger(BigInt),
    /// UTF-8 text.
    String(String),
    ByteString(Vec<u8>),
    /// Text used as an identifier, typically as a record label.
    Symbol(String),
    Record(Record),
    Sequence(Vec<Value>),
    Set(Set),
    Dictionary(Dictionary),
    Annotation(Annotated),
    /// A reference to something outside of the data model.
    Embedded(Box<Value>),
    Comment(Comment),
}

impl Value {
    pub fn symbol<S: Into<String>>(name: S) -> Value {
        Value::Symbol(name.into())
    }

    pub fn string<S: Into<String>>(text: S) -> Value {
        Value::String(text.into())
    }

    pub fn byte_string<B: Into<Vec<u8>>>(bytes: B) -> Value {
        Value::ByteString(bytes.into())
    }

    pub fn record(label: Value, fields: Vec<Value>) -> Value {
        Value::Record(Record::new(label, fields))
    }

    pub fn sequence<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Create a set, dropping any members that are structurally equal to an earlier one.
    pub fn set<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Create a dictionary. Where keys are repeated the last entry wins.
    pub fn dictionary<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Dictionary(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn annotated(annotation: Value, value: Value) -> Value {
        Value::Annotation(Annotated::new(annotation, value))
    }

    pub fn embedded(value: Value) -> Value {
        Value::Embedded(Box::new(value))
    }

    pub fn comment<S: Into<String>>(kind: CommentKind, text: S, value: Value) -> Value {
        Value::Comment(Comment::new(kind, text, value))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Double(_) => ValueKind::Double,
            Value::SignedInteger(_) => ValueKind::SignedInteger,
            Value::String(_) => ValueKind::String,
            Value::ByteString(_) => ValueKind::ByteString,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Record(_) => ValueKind::Record,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Set(_) => ValueKind::Set,
            Value::Dictionary(_) => ValueKind::Dictionary,
            Value::Annotation(_) => ValueKind::Annotation,
            Value::Embedded(_) => ValueKind::Embedded,
            Value::Comment(_) => ValueKind::Comment,
        }
    }

    /// The value with any outer annotations and comments removed.
    pub fn strip(&self) -> &Value {
        let mut current = self;
        loop {
            match current {
                Value::Annotation(annotated) => current = annotated.value(),
                Value::Comment(comment) => current = comment.value(),
                _ => break current,
            }
        }
    }

    /// Consume the value, removing any outer annotations and comments.
    pub fn into_stripped(self) -> Value {
        let mut current = self;
        loop {
            match current {
                Value::Annotation(annotated) => current = annotated.into_parts().1,
                Value::Comment(comment) => current = comment.into_parts().2,
                ow => break ow,
            }
        }
    }

    /// The outer annotations of the value, outermost first. Comments are skipped.
    pub fn annotations(&self) -> Vec<&Value> {
        let mut annotations = vec![];
        let mut current = self;
        loop {
            match current {
                Value::Annotation(annotated) => {
                    annotations.push(annotated.annotation());
                    current = annotated.value();
                }
                Value::Comment(comment) => current = comment.value(),
                _ => break annotations,
            }
        }
    }

    pub fn is_annotated(&self) -> bool {
        matches!(self, Value::Annotation(_) | Value::Comment(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.strip() {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.strip() {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self.strip() {
            Value::SignedInteger(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.strip() {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self.strip() {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.strip() {
            Value::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self.strip() {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self.strip() {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Set> {
        match self.strip() {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self.strip() {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

macro_rules! integer_conversion {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::SignedInteger(BigInt::from(n))
                }
            }
        )*
    };
}

integer_conversion!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::SignedInteger(n)
    }
}

impl From<BigUint> for Value {
    fn from(n: BigUint) -> Self {
        Value::SignedInteger(BigInt::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::ByteString(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::ByteString(bytes.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Value::Set(set)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

// A compact, single line rendition for diagnostics. The text codec owns the canonical form.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(true) => f.write_str("#t"),
            Value::Boolean(false) => f.write_str("#f"),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::SignedInteger(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::ByteString(bytes) => {
                f.write_str("#x\"")?;
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{:02x}", b)?;
                }
                f.write_str("\"")
            }
            Value::Symbol(s) => f.write_str(s),
            Value::Record(record) => {
                write!(f, "<{}", record.label())?;
                for field in record.fields() {
                    write!(f, " {}", field)?;
                }
                f.write_str(">")
            }
            Value::Sequence(items) => write_items(f, "[", items.iter(), "]"),
            Value::Set(set) => write_items(f, "#{", set.iter(), "}"),
            Value::Dictionary(dict) => {
                f.write_str("{")?;
                for (i, (k, v)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Annotation(annotated) => {
                write!(f, "@{} {}", annotated.annotation(), annotated.value())
            }
            Value::Embedded(inner) => write!(f, "#:{}", inner),
            Value::Comment(comment) => comment.value().fmt(f),
        }
    }
}

fn write_items<'a, I>(f: &mut Formatter<'_>, open: &str, items: I, close: &str) -> std::fmt::Result
where
    I: Iterator<Item = &'a Value>,
{
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}
