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

use std::io;

use bytes::{BufMut, Bytes, BytesMut};
use num_bigint::BigInt;
use num_traits::Zero;
use thiserror::Error;

use preserves_model::Value;

use crate::varint::write_varint;
use crate::{
    ANNOTATION, BYTE_STRING, DICTIONARY, DOUBLE, DOUBLE_LEN, EMBEDDED, END, FALSE, RECORD,
    SEQUENCE, SET, SIGNED_INTEGER, STRING, SYMBOL, TRUE,
};


/// Writing to a buffer cannot fail but writing through [`io::Write`] can.
#[derive(Debug, Error)]
pub enum BinaryWriteError {
    #[error("Writing the encoded value failed: {0}")]
    Io(#[from] io::Error),
}

/// Write the canonical binary encoding of a [`Value`] into a buffer, returning the number of
/// bytes written. Sets and dictionaries are written in canonical order. A comment is written as
/// an annotation carrying the comment text as a string.
///
/// # Arguments
/// * `dst` - The buffer to write into.
/// * `value` - The value to encode.
pub fn encode_value<B: BufMut>(dst: &mut B, value: &Value) -> usize {
    let before = dst.remaining_mut();
    put_value(dst, value);
    before - dst.remaining_mut()
}

/// Encode a [`Value`] into a fresh buffer.
pub fn to_bytes(value: &Value) -> Bytes {
    let mut buffer = BytesMut::new();
    put_value(&mut buffer, value);
    buffer.freeze()
}

/// Encode a [`Value`] to an [`io::Write`] implementation, returning the number of bytes written.
pub fn write_value<W: io::Write>(
    writer: &mut W,
    value: &Value,
) -> Result<usize, BinaryWriteError> {
    let bytes = to_bytes(value);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

fn put_value<B: BufMut>(dst: &mut B, value: &Value) {
    match value {
        Value::Boolean(false) => dst.put_u8(FALSE),
        Value::Boolean(true) => dst.put_u8(TRUE),
        Value::Double(d) => {
            dst.put_u8(DOUBLE);
            dst.put_u8(DOUBLE_LEN);
            dst.put_f64(*d);
        }
        Value::SignedInteger(n) => put_integer(dst, n),
        Value::String(s) => put_payload(dst, STRING, s.as_bytes()),
        Value::ByteString(b) => put_payload(dst, BYTE_STRING, b),
        Value::Symbol(s) => put_payload(dst, SYMBOL, s.as_bytes()),
        Value::Record(record) => {
            dst.put_u8(RECORD);
            put_value(dst, record.label());
            for field in record.fields() {
                put_value(dst, field);
            }
            dst.put_u8(END);
        }
        Value::Sequence(items) => {
            dst.put_u8(SEQUENCE);
            for item in items {
                put_value(dst, item);
            }
            dst.put_u8(END);
        }
        Value::Set(set) => {
            dst.put_u8(SET);
            for member in set {
                put_value(dst, member);
            }
            dst.put_u8(END);
        }
        Value::Dictionary(dict) => {
            dst.put_u8(DICTIONARY);
            for (key, value) in dict {
                put_value(dst, key);
                put_value(dst, value);
            }
            dst.put_u8(END);
        }
        Value::Annotation(annotated) => {
            dst.put_u8(ANNOTATION);
            put_value(dst, annotated.annotation());
            put_value(dst, annotated.value());
        }
        Value::Embedded(inner) => {
            dst.put_u8(EMBEDDED);
            put_value(dst, inner);
        }
        Value::Comment(comment) => {
            dst.put_u8(ANNOTATION);
            put_payload(dst, STRING, comment.text().as_bytes());
            put_value(dst, comment.value());
        }
    }
}

/// Integers are written as minimal big-endian two's complement. Zero has an empty payload.
fn put_integer<B: BufMut>(dst: &mut B, n: &BigInt) {
    if n.is_zero() {
        dst.put_u8(SIGNED_INTEGER);
        dst.put_u8(0);
    } else {
        put_payload(dst, SIGNED_INTEGER, &n.to_signed_bytes_be());
    }
}

fn put_payload<B: BufMut>(dst: &mut B, tag: u8, payload: &[u8]) {
    dst.put_u8(tag);
    write_varint(dst, payload.len() as u64);
    dst.put_slice(payload);
}
