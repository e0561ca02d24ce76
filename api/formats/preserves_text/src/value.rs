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
use preserves_model::{
    CommentKind, ConversionError, Dictionary, FromPreserves, Set, ToPreserves, Value,
};

use crate::parser::is_bare_symbol;
use crate::print_text_compact;
use crate::printer::BARE_DOUBLE_PRECISION;


/// A value as it appears in text. Each variant records the syntax that was used to write it
/// so that it can be printed back in the same form.
#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    Boolean(bool),
    /// A double written in decimal, such as `1.5` or `2e10`.
    BareDouble(f64),
    /// A double written as its eight big-endian bytes: `#xd"3ff0000000000000"`.
    HexDouble(f64),
    SignedInteger(BigInt),
    String(String),
    BareSymbol(String),
    /// A symbol written between vertical bars, for symbols that are not valid bare atoms.
    QuotedSymbol(String),
    /// `#x"..."`
    HexByteString(Vec<u8>),
    /// `#[...]`
    Base64ByteString(Vec<u8>),
    /// `#"..."`
    BinaryByteString(Vec<u8>),
    Record {
        label: Box<TextValue>,
        fields: Vec<TextValue>,
    },
    Sequence(Vec<TextValue>),
    /// Members in the order they were read. Repeated members are removed by the reader.
    Set(Vec<TextValue>),
    /// Entries in the order they were read. Repeated keys are removed by the reader.
    Dictionary(Vec<(TextValue, TextValue)>),
    Annotation {
        annotation: Box<TextValue>,
        value: Box<TextValue>,
    },
    Embedded(Box<TextValue>),
    /// A line comment preceding a value. The text excludes the leading `#` and the newline.
    Comment {
        text: String,
        value: Box<TextValue>,
    },
    /// A `#!` line preceding a value.
    Shebang {
        text: String,
        value: Box<TextValue>,
    },
}

impl TextValue {
    pub fn record(label: TextValue, fields: Vec<TextValue>) -> Self {
        TextValue::Record {
            label: Box::new(label),
            fields,
        }
    }

    pub fn annotated(annotation: TextValue, value: TextValue) -> Self {
        TextValue::Annotation {
            annotation: Box::new(annotation),
            value: Box::new(value),
        }
    }

    pub fn comment<S: Into<String>>(text: S, value: TextValue) -> Self {
        TextValue::Comment {
            text: text.into(),
            value: Box::new(value),
        }
    }

    pub fn shebang<S: Into<String>>(text: S, value: TextValue) -> Self {
        TextValue::Shebang {
            text: text.into(),
            value: Box::new(value),
        }
    }

    /// Choose a text representation of a neutral value. Symbols are bare where they can be read
    /// back as symbols; doubles are bare where the six digit decimal form reads back exactly;
    /// byte strings use base64.
    pub fn from_value(value: &Value) -> TextValue {
        match value {
            Value::Boolean(b) => TextValue::Boolean(*b),
            Value::Double(d) => {
                if bare_double_is_exact(*d) {
                    TextValue::BareDouble(*d)
                } else {
                    TextValue::HexDouble(*d)
                }
            }
            Value::SignedInteger(n) => TextValue::SignedInteger(n.clone()),
            Value::String(s) => TextValue::String(s.clone()),
            Value::ByteString(bytes) => TextValue::Base64ByteString(bytes.clone()),
            Value::Symbol(name) => {
                if is_bare_symbol(name) {
                    TextValue::BareSymbol(name.clone())
                } else {
                    TextValue::QuotedSymbol(name.clone())
                }
            }
            Value::Record(record) => TextValue::record(
                TextValue::from_value(record.label()),
                record.fields().iter().map(TextValue::from_value).collect(),
            ),
            Value::Sequence(items) => {
                TextValue::Sequence(items.iter().map(TextValue::from_value).collect())
            }
            Value::Set(set) => TextValue::Set(set.iter().map(TextValue::from_value).collect()),
            Value::Dictionary(dict) => TextValue::Dictionary(
                dict.iter()
                    .map(|(k, v)| (TextValue::from_value(k), TextValue::from_value(v)))
                    .collect(),
            ),
            Value::Annotation(annotated) => TextValue::annotated(
                TextValue::from_value(annotated.annotation()),
                TextValue::from_value(annotated.value()),
            ),
            Value::Embedded(inner) => TextValue::Embedded(Box::new(TextValue::from_value(inner))),
            Value::Comment(comment) => {
                let value = TextValue::from_value(comment.value());
                match comment.kind() {
                    CommentKind::Line => TextValue::comment(comment.text(), value),
                    CommentKind::Shebang => TextValue::shebang(comment.text(), value),
                }
            }
        }
    }
}

fn bare_double_is_exact(d: f64) -> bool {
    d.is_finite()
        && format!("{:.*}", BARE_DOUBLE_PRECISION, d)
            .parse::<f64>()
            .map(|reparsed| reparsed.to_bits() == d.to_bits())
            .unwrap_or(false)
}

impl ToPreserves for TextValue {
    fn to_preserves(&self) -> Value {
        match self {
            TextValue::Boolean(b) => Value::Boolean(*b),
            TextValue::BareDouble(d) | TextValue::HexDouble(d) => Value::Double(*d),
            TextValue::SignedInteger(n) => Value::SignedInteger(n.clone()),
            TextValue::String(s) => Value::String(s.clone()),
            TextValue::BareSymbol(name) | TextValue::QuotedSymbol(name) => {
                Value::Symbol(name.clone())
            }
            TextValue::HexByteString(bytes)
            | TextValue::Base64ByteString(bytes)
            | TextValue::BinaryByteString(bytes) => Value::ByteString(bytes.clone()),
            TextValue::Record { label, fields } => Value::record(
                label.to_preserves(),
                fields.iter().map(ToPreserves::to_preserves).collect(),
            ),
            TextValue::Sequence(items) => {
                Value::Sequence(items.iter().map(ToPreserves::to_preserves).collect())
            }
            TextValue::Set(members) => Value::Set(
                members
                    .iter()
                    .map(ToPreserves::to_preserves)
                    .collect::<Set>(),
            ),
            TextValue::Dictionary(entries) => Value::Dictionary(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_preserves(), v.to_preserves()))
                    .collect::<Dictionary>(),
            ),
            TextValue::Annotation { annotation, value } => {
                Value::annotated(annotation.to_preserves(), value.to_preserves())
            }
            TextValue::Embedded(inner) => Value::embedded(inner.to_preserves()),
            TextValue::Comment { text, value } => {
                Value::comment(CommentKind::Line, text.as_str(), value.to_preserves())
            }
            TextValue::Shebang { text, value } => {
                Value::comment(CommentKind::Shebang, text.as_str(), value.to_preserves())
            }
        }
    }
}

impl FromPreserves for TextValue {
    fn from_preserves(value: Value) -> Result<Self, ConversionError> {
        Ok(TextValue::from_value(&value))
    }
}

impl From<&Value> for TextValue {
    fn from(value: &Value) -> Self {
        TextValue::from_value(value)
    }
}

impl Display for TextValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print_text_compact(self))
    }
}
