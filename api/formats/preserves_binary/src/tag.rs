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

use crate::{
    BinaryReadError, ANNOTATION, BYTE_STRING, DICTIONARY, DOUBLE, EMBEDDED, END, FALSE, RECORD,
    SEQUENCE, SET, SIGNED_INTEGER, STRING, SYMBOL, TRUE,
};

/// The recognised tag bytes. Every other byte value is reserved and rejected by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    False,
    True,
    End,
    Annotation,
    Embedded,
    Double,
    SignedInteger,
    String,
    ByteString,
    Symbol,
    Record,
    Sequence,
    Set,
    Dictionary,
}

impl Tag {
    pub const fn byte(self) -> u8 {
        match self {
            Tag::False => FALSE,
            Tag::True => TRUE,
            Tag::End => END,
            Tag::Annotation => ANNOTATION,
            Tag::Embedded => EMBEDDED,
            Tag::Double => DOUBLE,
            Tag::SignedInteger => SIGNED_INTEGER,
            Tag::String => STRING,
            Tag::ByteString => BYTE_STRING,
            Tag::Symbol => SYMBOL,
            Tag::Record => RECORD,
            Tag::Sequence => SEQUENCE,
            Tag::Set => SET,
            Tag::Dictionary => DICTIONARY,
        }
    }

    /// Whether the tag is followed by a varint length and a payload of that many bytes.
    pub fn has_length(self) -> bool {
        matches!(
            self,
            Tag::SignedInteger | Tag::String | Tag::ByteString | Tag::Symbol
        )
    }
}

impl TryFrom<u8> for Tag {
    type Error = BinaryReadError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            FALSE => Ok(Tag::False),
            TRUE => Ok(Tag::True),
            END => Ok(Tag::End),
            ANNOTATION => Ok(Tag::Annotation),
            EMBEDDED => Ok(Tag::Embedded),
            DOUBLE => Ok(Tag::Double),
            SIGNED_INTEGER => Ok(Tag::SignedInteger),
            STRING => Ok(Tag::String),
            BYTE_STRING => Ok(Tag::ByteString),
            SYMBOL => Ok(Tag::Symbol),
            RECORD => Ok(Tag::Record),
            SEQUENCE => Ok(Tag::Sequence),
            SET => Ok(Tag::Set),
            DICTIONARY => Ok(Tag::Dictionary),
            ow => Err(BinaryReadError::InvalidTag(ow)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::Tag;
    use crate::BinaryReadError;

    #[test]
    fn tags_round_trip() {
        for byte in 0..=u8::MAX {
            if let Ok(tag) = Tag::try_from(byte) {
                assert_eq!(tag.byte(), byte);
            }
        }
    }

    #[test]
    fn reserved_tags() {
        for byte in [0x00, 0x7f, 0x82, 0x83, 0x88, 0xaf, 0xb8, 0xbf, 0xff] {
            assert_eq!(Tag::try_from(byte), Err(BinaryReadError::InvalidTag(byte)));
        }
    }
}
