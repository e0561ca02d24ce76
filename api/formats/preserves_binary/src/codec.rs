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

use bytes::{Buf, BytesMut};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use preserves_model::Value;

use crate::{encode_value, BinaryReadConfig, BinaryReadError, BinaryReader};


#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid binary value: {0}")]
    Read(#[from] BinaryReadError),
}

/// Frames a stream of concatenated binary values. The values are self delimiting so no
/// additional framing is added. A partial value at the end of the buffer is left in place until
/// more data arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreservesCodec {
    reader: BinaryReader,
}

impl PreservesCodec {
    pub fn new(config: BinaryReadConfig) -> Self {
        PreservesCodec {
            reader: BinaryReader::new(config),
        }
    }
}

impl Decoder for PreservesCodec {
    type Item = Value;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let mut view = &src[..];
        match self.reader.read(&mut view) {
            Ok(value) => {
                let consumed = src.remaining() - view.len();
                src.advance(consumed);
                Ok(Some(value))
            }
            Err(BinaryReadError::ShortPacket { needed }) => {
                trace!(needed, buffered = src.len(), "Waiting for more data.");
                src.reserve(needed);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Encoder<Value> for PreservesCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&Value>::encode(self, &item, dst)
    }
}

impl<'a> Encoder<&'a Value> for PreservesCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &'a Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        encode_value(dst, item);
        Ok(())
    }
}
