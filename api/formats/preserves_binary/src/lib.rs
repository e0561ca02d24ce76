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

//! The canonical binary encoding of Preserves values.
//!
//! Each value starts with a single tag byte. Atoms with a variable length payload follow the tag
//! with an unsigned LEB128 length; open ended compounds are terminated by an end marker. Sets and
//! dictionaries are always written in canonical order so that equal values produce identical
//! bytes.

mod codec;
mod config;
mod reader;
mod tag;
pub mod varint;
mod writer;

pub use codec::{CodecError, PreservesCodec};
pub use config::BinaryReadConfig;
pub use reader::{from_bytes, read_value, BinaryReadError, BinaryReader};
pub use tag::Tag;
pub use writer::{encode_value, to_bytes, write_value, BinaryWriteError};

pub const FALSE: u8 = 0x80;
pub const TRUE: u8 = 0x81;
pub const END: u8 = 0x84;
pub const ANNOTATION: u8 = 0x85;
pub const EMBEDDED: u8 = 0x86;
pub const DOUBLE: u8 = 0x87;
pub const SIGNED_INTEGER: u8 = 0xB0;
pub const STRING: u8 = 0xB1;
pub const BYTE_STRING: u8 = 0xB2;
pub const SYMBOL: u8 = 0xB3;
pub const RECORD: u8 = 0xB4;
pub const SEQUENCE: u8 = 0xB5;
pub const SET: u8 = 0xB6;
pub const DICTIONARY: u8 = 0xB7;

/// The length byte that follows the double tag.
pub const DOUBLE_LEN: u8 = 0x08;
