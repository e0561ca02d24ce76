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

mod common;

use bytes::BytesMut;
use futures::{SinkExt, StreamExt};
use preserves::binary::codec::PreservesCodec;
use preserves::binary::errors::{BinaryReadError, CodecError};
use preserves::text::TextReader;
use preserves::{ToPreserves, Value};
use tokio_util::codec::{Decoder, FramedRead, FramedWrite};

use common::init_trace;

const DOCUMENT: &str = r#"
    <login "ada" #[c2VjcmV0]>
    <move 1.5 -2.5>
    # final message
    <logout>
"#;

fn read_document() -> Vec<Value> {
    TextReader::new(DOCUMENT)
        .map(|result| result.expect("Invalid text.").to_preserves())
        .collect()
}

#[tokio::test]
async fn text_document_over_binary_frames() {
    init_trace(&["preserves_binary=trace"]);

    let values = read_document();
    assert_eq!(values.len(), 3);

    let mut writer = FramedWrite::new(vec![], PreservesCodec::default());
    for value in &values {
        writer.send(value).await.expect("Encoding failed.");
    }
    let bytes = writer.into_inner();

    let reader = FramedRead::new(bytes.as_slice(), PreservesCodec::default());
    let received = reader
        .map(|result| result.expect("Decoding failed."))
        .collect::<Vec<_>>()
        .await;
    assert_eq!(received, values);
}

#[test]
fn frames_split_at_every_byte() {
    init_trace(&["preserves_binary=trace"]);

    let values = read_document();
    let mut encoded = BytesMut::new();
    let mut codec = PreservesCodec::default();
    for value in &values {
        tokio_util::codec::Encoder::encode(&mut codec, value, &mut encoded)
            .expect("Encoding failed.");
    }

    let mut buffer = BytesMut::new();
    let mut received = vec![];
    for byte in encoded.iter() {
        buffer.extend_from_slice(&[*byte]);
        while let Some(value) = codec.decode(&mut buffer).expect("Decoding failed.") {
            received.push(value);
        }
    }
    assert!(buffer.is_empty());
    assert_eq!(received, values);
}

#[test]
fn invalid_frame_is_reported() {
    let mut codec = PreservesCodec::default();
    let mut buffer = BytesMut::from(&[0xB4, 0x84][..]);
    match codec.decode(&mut buffer) {
        Err(CodecError::Read(err)) => assert_eq!(err, BinaryReadError::MissingLabel),
        ow => panic!("Unexpected result: {:?}", ow),
    }
}
