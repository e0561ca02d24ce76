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

use bytes::Buf;
use num_bigint::BigInt;
use preserves_model::{dictionary, record, sequence, set, Value};

use crate::{from_bytes, read_value, to_bytes, BinaryReadConfig, BinaryReadError, BinaryReader};

#[test]
fn read_atoms() {
    assert_eq!(from_bytes(&[0x80]), Ok(Value::Boolean(false)));
    assert_eq!(from_bytes(&[0x81]), Ok(Value::Boolean(true)));
    assert_eq!(from_bytes(&[0xB0, 0x00]), Ok(Value::from(0)));
    assert_eq!(from_bytes(&[0xB0, 0x01, 0xFF]), Ok(Value::from(-1)));
    assert_eq!(from_bytes(&[0xB0, 0x02, 0x00, 0xFF]), Ok(Value::from(255)));
    assert_eq!(
        from_bytes(&[0xB3, 0x06, 0x74, 0x69, 0x74, 0x6C, 0x65, 0x64]),
        Ok(Value::symbol("titled"))
    );
    assert_eq!(
        from_bytes(&[0xB2, 0x02, 0xCA, 0xFE]),
        Ok(Value::byte_string(vec![0xCA, 0xFE]))
    );
    assert_eq!(
        from_bytes(&[0x87, 0x08, 0xFE, 0x3C, 0xB7, 0xB7, 0x59, 0xBF, 0x04, 0x26]),
        Ok(Value::Double(-1.202e300))
    );
}

#[test]
fn read_big_integer() {
    let mut bytes = vec![0xB0, 0x12, 0x01];
    bytes.extend(std::iter::repeat(0x00).take(17));
    let expected: BigInt = "87112285931760246646623899502532662132736"
        .parse()
        .expect("Invalid integer.");
    assert_eq!(from_bytes(&bytes), Ok(Value::SignedInteger(expected)));
}

#[test]
fn non_minimal_integers_accepted() {
    assert_eq!(from_bytes(&[0xB0, 0x02, 0x00, 0x01]), Ok(Value::from(1)));
    assert_eq!(from_bytes(&[0xB0, 0x02, 0xFF, 0xFF]), Ok(Value::from(-1)));
}

#[test]
fn read_nested_annotations() {
    let bytes = [0x85, 0xB3, 0x01, 0x61, 0x85, 0xB3, 0x01, 0x62, 0xB5, 0x84];
    let value = from_bytes(&bytes).expect("Decoding failed.");
    assert_eq!(
        value.annotations(),
        vec![&Value::symbol("a"), &Value::symbol("b")]
    );
    assert_eq!(value.strip(), &sequence![]);
}

#[test]
fn read_record_and_embedded() {
    assert_eq!(
        from_bytes(&[0xB4, 0xB3, 0x01, 0x61, 0xB3, 0x01, 0x62, 0x84]),
        Ok(Value::record(Value::symbol("a"), vec![Value::symbol("b")]))
    );
    assert_eq!(
        from_bytes(&[0x86, 0xB3, 0x01, 0x61]),
        Ok(Value::embedded(Value::symbol("a")))
    );
}

#[test]
fn read_empty_compounds() {
    assert_eq!(from_bytes(&[0xB5, 0x84]), Ok(sequence![]));
    assert_eq!(from_bytes(&[0xB6, 0x84]), Ok(set![]));
    assert_eq!(from_bytes(&[0xB7, 0x84]), Ok(dictionary! {}));
}

#[test]
fn duplicate_set_members_collapse() {
    let bytes = [0xB6, 0xB0, 0x01, 0x01, 0xB0, 0x01, 0x01, 0x84];
    assert_eq!(from_bytes(&bytes), Ok(set![1]));
}

#[test]
fn duplicate_dictionary_keys_keep_last() {
    let bytes = [
        0xB7, 0xB3, 0x01, 0x6B, 0xB0, 0x01, 0x01, 0xB3, 0x01, 0x6B, 0xB0, 0x01, 0x02, 0x84,
    ];
    assert_eq!(
        from_bytes(&bytes),
        Ok(dictionary! { Value::symbol("k") => 2 })
    );
}

#[test]
fn record_without_label() {
    assert_eq!(
        from_bytes(&[0xB4, 0x84]),
        Err(BinaryReadError::MissingLabel)
    );
}

#[test]
fn invalid_tags() {
    assert_eq!(from_bytes(&[0x82]), Err(BinaryReadError::InvalidTag(0x82)));
    assert_eq!(
        from_bytes(&[0xB5, 0xFF, 0x84]),
        Err(BinaryReadError::InvalidTag(0xFF))
    );
}

#[test]
fn unexpected_end() {
    assert_eq!(from_bytes(&[0x84]), Err(BinaryReadError::UnexpectedEnd));
    assert_eq!(
        from_bytes(&[0x85, 0x84, 0x81]),
        Err(BinaryReadError::UnexpectedEnd)
    );
}

#[test]
fn invalid_double_length() {
    assert_eq!(
        from_bytes(&[0x87, 0x04, 0x00, 0x00, 0x00, 0x00]),
        Err(BinaryReadError::InvalidDoubleLength(0x04))
    );
}

#[test]
fn invalid_utf8() {
    let result = from_bytes(&[0xB1, 0x02, 0xC3, 0x28]);
    assert!(matches!(result, Err(BinaryReadError::StringDecode(_))));
}

#[test]
fn non_canonical_length() {
    assert_eq!(
        from_bytes(&[0xB1, 0x81, 0x00, 0x61]),
        Err(BinaryReadError::NonCanonicalVarint)
    );
}

#[test]
fn truncated_input_is_short_packet() {
    let bytes = to_bytes(&record!("date", 2024, 1, 1, sequence!["a", "b"]));
    for end in 0..bytes.len() {
        let result = from_bytes(&bytes[..end]);
        match result {
            Err(err) => assert!(err.is_short_packet(), "{:?} at {}", err, end),
            Ok(v) => panic!("Unexpected value {} from {} bytes.", v, end),
        }
    }
}

#[test]
fn short_payload_reports_missing_bytes() {
    assert_eq!(
        from_bytes(&[0xB1, 0x05, 0x61, 0x62]),
        Err(BinaryReadError::ShortPacket { needed: 3 })
    );
}

#[test]
fn end_marker_at_end_of_input() {
    assert_eq!(
        from_bytes(&[0xB5, 0x81, 0x84]),
        Ok(Value::Sequence(vec![Value::Boolean(true)]))
    );
}

#[test]
fn trailing_bytes() {
    assert_eq!(
        from_bytes(&[0x81, 0x80, 0x80]),
        Err(BinaryReadError::TrailingBytes {
            consumed: 1,
            remaining: 2
        })
    );
}

#[test]
fn read_value_advances_buffer() {
    let mut bytes = to_bytes(&Value::from(7)).to_vec();
    bytes.extend_from_slice(&to_bytes(&Value::string("next")));
    let mut input = bytes.as_slice();
    assert_eq!(read_value(&mut input), Ok(Value::from(7)));
    assert_eq!(input.remaining(), 6);
    assert_eq!(read_value(&mut input), Ok(Value::string("next")));
    assert!(!input.has_remaining());
}

#[test]
fn depth_limit() {
    let reader = BinaryReader::new(BinaryReadConfig {
        max_depth: 2,
        ..Default::default()
    });
    let mut ok: &[u8] = &[0xB5, 0xB5, 0x84, 0x84];
    assert_eq!(reader.read(&mut ok), Ok(sequence![sequence![]]));
    let mut too_deep: &[u8] = &[0xB5, 0xB5, 0xB5, 0x84, 0x84, 0x84];
    assert_eq!(
        reader.read(&mut too_deep),
        Err(BinaryReadError::DepthLimit(2))
    );
}

fn nested_sequences(depth: usize) -> Vec<u8> {
    let mut bytes = vec![0xB5; depth];
    bytes.extend(std::iter::repeat(0x84).take(depth));
    bytes
}

#[test]
fn default_depth_limit() {
    let max_depth = BinaryReadConfig::default().max_depth;
    let deepest = from_bytes(&nested_sequences(max_depth)).expect("Decoding failed.");
    let mut levels = 0;
    let mut current = &deepest;
    while let Value::Sequence(items) = current {
        levels += 1;
        match items.first() {
            Some(inner) => current = inner,
            None => break,
        }
    }
    assert_eq!(levels, max_depth);
    assert_eq!(
        from_bytes(&nested_sequences(max_depth + 1)),
        Err(BinaryReadError::DepthLimit(max_depth))
    );
}

#[test]
fn length_limit() {
    let reader = BinaryReader::new(BinaryReadConfig {
        max_length: 4,
        ..Default::default()
    });
    let mut input: &[u8] = &[0xB2, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(
        reader.read(&mut input),
        Err(BinaryReadError::LengthLimit {
            declared: 5,
            limit: 4
        })
    );
}
