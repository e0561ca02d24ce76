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

//! Unsigned LEB128 lengths: seven bits per byte, least significant group first, with the high
//! bit set on every byte except the last.

use bytes::{Buf, BufMut};

use crate::BinaryReadError;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;
const LAST_SHIFT: u32 = 63;

/// Read a varint, rejecting encodings that are longer than necessary or that overflow a `u64`.
pub fn read_varint<B: Buf>(input: &mut B) -> Result<u64, BinaryReadError> {
    let mut result = 0u64;
    let mut shift = 0u32;
    loop {
        if !input.has_remaining() {
            return Err(BinaryReadError::ShortPacket { needed: 1 });
        }
        let byte = input.get_u8();
        if shift == LAST_SHIFT && byte > 1 {
            return Err(BinaryReadError::VarintOverflow);
        }
        result |= u64::from(byte & PAYLOAD) << shift;
        if byte & CONTINUATION == 0 {
            return if byte == 0 && shift > 0 {
                Err(BinaryReadError::NonCanonicalVarint)
            } else {
                Ok(result)
            };
        }
        shift += 7;
    }
}

/// Write a varint, returning the number of bytes written.
pub fn write_varint<B: BufMut>(dst: &mut B, mut n: u64) -> usize {
    let mut written = 1;
    while n >= u64::from(CONTINUATION) {
        dst.put_u8((n as u8 & PAYLOAD) | CONTINUATION);
        n >>= 7;
        written += 1;
    }
    dst.put_u8(n as u8);
    written
}

/// The number of bytes [`write_varint`] will use for `n`.
pub fn varint_len(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

#[cfg(test)]
mod tests {
    use super::{read_varint, varint_len, write_varint};
    use crate::BinaryReadError;

    fn encode(n: u64) -> Vec<u8> {
        let mut buf = vec![];
        let written = write_varint(&mut buf, n);
        assert_eq!(written, buf.len());
        assert_eq!(varint_len(n), buf.len());
        buf
    }

    #[test]
    fn small_values() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(10), vec![0x0a]);
        assert_eq!(encode(127), vec![0x7f]);
    }

    #[test]
    fn multi_byte_values() {
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xac, 0x02]);
        assert_eq!(encode(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode(u64::MAX).len(), 10);
    }

    #[test]
    fn read_back() {
        for n in [0, 1, 127, 128, 255, 300, 16383, 16384, u32::MAX as u64, u64::MAX] {
            let bytes = encode(n);
            let mut input = bytes.as_slice();
            assert_eq!(read_varint(&mut input), Ok(n));
            assert!(input.is_empty());
        }
    }

    #[test]
    fn over_long_encoding_rejected() {
        let mut input: &[u8] = &[0x81, 0x00];
        assert_eq!(
            read_varint(&mut input),
            Err(BinaryReadError::NonCanonicalVarint)
        );
        let mut input: &[u8] = &[0x80, 0x80, 0x00];
        assert_eq!(
            read_varint(&mut input),
            Err(BinaryReadError::NonCanonicalVarint)
        );
    }

    #[test]
    fn overflow_rejected() {
        let mut input: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert_eq!(read_varint(&mut input), Err(BinaryReadError::VarintOverflow));
    }

    #[test]
    fn truncated_varint() {
        let mut input: &[u8] = &[0x80];
        assert_eq!(
            read_varint(&mut input),
            Err(BinaryReadError::ShortPacket { needed: 1 })
        );
    }
}
