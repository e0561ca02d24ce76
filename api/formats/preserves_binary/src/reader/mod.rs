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

use std::convert::TryFrom;
use std::str::Utf8Error;

use bytes::Buf;
use num_bigint::BigInt;
use thiserror::Error;
use tracing::debug;

use preserves_model::{Dictionary, Set, Value};

use crate::varint::read_varint;
use crate::{BinaryReadConfig, Tag, DOUBLE_LEN, END};

#[cfg(test)]
mod tests;

/// Reading binary data can fail if the bytes are not a valid encoding or if the buffer ends part
/// way through a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinaryReadError {
    /// The buffer ended before the value was complete. More data may complete it.
    #[error("The input ended part way through a value ({needed} more bytes required at least).")]
    ShortPacket { needed: usize },
    /// An unknown tag byte was encountered.
    #[error("Invalid tag byte: {0:#04x}.")]
    InvalidTag(u8),
    /// An end marker occurred where a value was required.
    #[error("An end marker occurred where a value was expected.")]
    UnexpectedEnd,
    /// A record was closed before its label.
    #[error("A record must have a label.")]
    MissingLabel,
    /// A double did not have a length of 8.
    #[error("Invalid length for a double: {0}.")]
    InvalidDoubleLength(u8),
    /// A length was encoded with more bytes than necessary.
    #[error("A length was not minimally encoded.")]
    NonCanonicalVarint,
    /// A length did not fit into 64 bits.
    #[error("A length was too large to represent.")]
    VarintOverflow,
    /// A string or symbol contained invalid UTF-8.
    #[error("Invalid UTF-8 in a string or symbol: {0}")]
    StringDecode(#[from] Utf8Error),
    /// A declared length exceeded the configured limit.
    #[error("A declared length of {declared} exceeds the limit of {limit} bytes.")]
    LengthLimit { declared: u64, limit: usize },
    /// Compound values were nested deeper than the configured limit.
    #[error("Values were nested more than {0} levels deep.")]
    DepthLimit(usize),
    /// Data remained in the input after a complete value.
    #[error("{remaining} bytes remained after a value of {consumed} bytes.")]
    TrailingBytes { consumed: usize, remaining: usize },
}

impl BinaryReadError {
    /// Whether the error indicates that more data is required rather than that the data is
    /// invalid. A streaming caller may buffer more input and retry.
    pub fn is_short_packet(&self) -> bool {
        matches!(self, BinaryReadError::ShortPacket { .. })
    }
}

/// Attempt to read a single [`Value`] from binary data in a buffer, with the default
/// configuration. On success the buffer is advanced past the value.
///
/// # Arguments
/// * `input` - The buffer containing the binary data.
pub fn read_value<B: Buf>(input: &mut B) -> Result<Value, BinaryReadError> {
    BinaryReader::default().read(input)
}

/// Read exactly one [`Value`] from a slice. Any bytes left after the value are an error.
pub fn from_bytes(bytes: &[u8]) -> Result<Value, BinaryReadError> {
    let mut input = bytes;
    let value = read_value(&mut input)?;
    if input.is_empty() {
        Ok(value)
    } else {
        Err(BinaryReadError::TrailingBytes {
            consumed: bytes.len() - input.len(),
            remaining: input.len(),
        })
    }
}

/// A configured binary reader. The reader holds no state between values so a single instance
/// may be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryReader {
    config: BinaryReadConfig,
}

impl BinaryReader {
    pub fn new(config: BinaryReadConfig) -> Self {
        BinaryReader { config }
    }

    pub fn config(&self) -> &BinaryReadConfig {
        &self.config
    }

    /// Read a single value, advancing the buffer past it. The number of bytes consumed is the
    /// difference in [`Buf::remaining`]. After an error the buffer position is unspecified.
    pub fn read<B: Buf>(&self, input: &mut B) -> Result<Value, BinaryReadError> {
        self.read_at(input, 0)
    }

    fn read_at<B: Buf>(&self, input: &mut B, depth: usize) -> Result<Value, BinaryReadError> {
        let tag = Tag::try_from(read_byte(input)?)?;
        match tag {
            Tag::False => Ok(Value::Boolean(false)),
            Tag::True => Ok(Value::Boolean(true)),
            Tag::End => Err(BinaryReadError::UnexpectedEnd),
            Tag::Double => read_double(input),
            Tag::SignedInteger => {
                let payload = self.read_payload(input)?;
                Ok(Value::SignedInteger(BigInt::from_signed_bytes_be(&payload)))
            }
            Tag::String => {
                let payload = self.read_payload(input)?;
                Ok(Value::String(into_string(payload)?))
            }
            Tag::ByteString => Ok(Value::ByteString(self.read_payload(input)?)),
            Tag::Symbol => {
                let payload = self.read_payload(input)?;
                Ok(Value::Symbol(into_string(payload)?))
            }
            Tag::Annotation => {
                let depth = self.descend(depth)?;
                let annotation = self.read_at(input, depth)?;
                let value = self.read_at(input, depth)?;
                Ok(Value::annotated(annotation, value))
            }
            Tag::Embedded => {
                let depth = self.descend(depth)?;
                Ok(Value::embedded(self.read_at(input, depth)?))
            }
            Tag::Record => {
                let depth = self.descend(depth)?;
                if read_end(input)? {
                    return Err(BinaryReadError::MissingLabel);
                }
                let label = self.read_at(input, depth)?;
                let fields = self.read_elements(input, depth)?;
                Ok(Value::record(label, fields))
            }
            Tag::Sequence => {
                let depth = self.descend(depth)?;
                Ok(Value::Sequence(self.read_elements(input, depth)?))
            }
            Tag::Set => {
                let depth = self.descend(depth)?;
                let members = self.read_elements(input, depth)?;
                Ok(Value::Set(members.into_iter().collect::<Set>()))
            }
            Tag::Dictionary => {
                let depth = self.descend(depth)?;
                let mut dict = Dictionary::new();
                while !read_end(input)? {
                    let key = self.read_at(input, depth)?;
                    let value = self.read_at(input, depth)?;
                    dict.insert(key, value);
                }
                Ok(Value::Dictionary(dict))
            }
        }
    }

    fn descend(&self, depth: usize) -> Result<usize, BinaryReadError> {
        if depth >= self.config.max_depth {
            Err(BinaryReadError::DepthLimit(self.config.max_depth))
        } else {
            Ok(depth + 1)
        }
    }

    fn read_elements<B: Buf>(
        &self,
        input: &mut B,
        depth: usize,
    ) -> Result<Vec<Value>, BinaryReadError> {
        let mut elements = vec![];
        while !read_end(input)? {
            elements.push(self.read_at(input, depth)?);
        }
        Ok(elements)
    }

    fn read_payload<B: Buf>(&self, input: &mut B) -> Result<Vec<u8>, BinaryReadError> {
        let declared = read_varint(input)?;
        let len = match usize::try_from(declared) {
            Ok(len) if len <= self.config.max_length => len,
            _ => {
                return Err(BinaryReadError::LengthLimit {
                    declared,
                    limit: self.config.max_length,
                })
            }
        };
        let remaining = input.remaining();
        if remaining < len {
            return Err(BinaryReadError::ShortPacket {
                needed: len - remaining,
            });
        }
        let mut payload = vec![0; len];
        input.copy_to_slice(&mut payload);
        Ok(payload)
    }
}

fn read_byte<B: Buf>(input: &mut B) -> Result<u8, BinaryReadError> {
    if input.has_remaining() {
        Ok(input.get_u8())
    } else {
        Err(BinaryReadError::ShortPacket { needed: 1 })
    }
}

/// Consume an end marker if one is next in the buffer. Running out of input immediately after
/// the marker is not an error.
fn read_end<B: Buf>(input: &mut B) -> Result<bool, BinaryReadError> {
    match input.chunk().first() {
        Some(&END) => {
            input.advance(1);
            if !input.has_remaining() {
                debug!("End marker coincided with the end of the input.");
            }
            Ok(true)
        }
        Some(_) => Ok(false),
        None => Err(BinaryReadError::ShortPacket { needed: 1 }),
    }
}

fn read_double<B: Buf>(input: &mut B) -> Result<Value, BinaryReadError> {
    let len = read_byte(input)?;
    if len != DOUBLE_LEN {
        return Err(BinaryReadError::InvalidDoubleLength(len));
    }
    let size = std::mem::size_of::<f64>();
    if input.remaining() < size {
        return Err(BinaryReadError::ShortPacket {
            needed: size - input.remaining(),
        });
    }
    Ok(Value::Double(input.get_f64()))
}

fn into_string(payload: Vec<u8>) -> Result<String, BinaryReadError> {
    String::from_utf8(payload).map_err(|err| err.utf8_error().into())
}
