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

use num_bigint::BigInt;
use preserves_model::{record, set, Value};

use crate::{
    parse_text, print_text, print_text_compact, print_text_with, print_value,
    print_value_compact, write_text, PrintStyle, TextValue,
};

fn reprint(input: &str) -> String {
    let value = parse_text(input).expect("Invalid text.");
    let s = print_text(&value).to_string();
    s
}

fn reprint_compact(input: &str) -> String {
    let value = parse_text(input).expect("Invalid text.");
    let s = print_text_compact(&value).to_string();
    s
}

fn sym(name: &str) -> TextValue {
    TextValue::BareSymbol(name.to_string())
}

#[test]
fn print_atoms() {
    assert_eq!(reprint("538"), "538");
    assert_eq!(reprint("-12"), "-12");
    assert_eq!(reprint("0.5"), "0.500000");
    assert_eq!(reprint("#t"), "#t");
    assert_eq!(reprint("#f"), "#f");
    assert_eq!(reprint("symbol"), "symbol");
    assert_eq!(reprint(r#""say \"hi\"\n""#), r#""say \"hi\"\n""#);
    assert_eq!(reprint(r"|str\|in\ng|"), r"|str\|in\ng|");
}

#[test]
fn print_control_characters() {
    let value = TextValue::String("a\u{01}\u{08}".to_string());
    assert_eq!(print_text(&value).to_string(), r#""a\u0001\b""#);
}

#[test]
fn print_byte_strings() {
    assert_eq!(reprint("#[ Y29 yeW 1i ]"), "#[Y29yeW1i]");
    assert_eq!(reprint(r#"#x" 00 00 00 ""#), r#"#x"00 00 00""#);
    assert_eq!(reprint(r#"#"hello""#), r#"#"hello""#);
    assert_eq!(
        print_text(&TextValue::BinaryByteString(vec![0x22, 0x00, 0xfe, 0x41])).to_string(),
        r#"#"\"\x00\xfeA""#
    );
    assert_eq!(
        print_text(&TextValue::Base64ByteString(vec![])).to_string(),
        "#[]"
    );
}

#[test]
fn print_doubles() {
    assert_eq!(
        print_text(&TextValue::HexDouble(1.0)).to_string(),
        r#"#xd"3f f0 00 00 00 00 00 00""#
    );
    assert_eq!(
        print_text(&TextValue::BareDouble(f64::INFINITY)).to_string(),
        r#"#xd"7f f0 00 00 00 00 00 00""#
    );
    assert_eq!(print_text(&TextValue::BareDouble(-2.25)).to_string(), "-2.250000");
}

#[test]
fn print_comments() {
    assert_eq!(reprint("# string   \ncommented"), "# string   \ncommented");
    assert_eq!(reprint("#!/bin/bash\nstart"), "#!/bin/bash\nstart");
    assert_eq!(reprint("[a # note\n b]"), "[\n  a\n  # note\n  b\n]");
    assert_eq!(reprint_compact("[a # note\n b]"), "[a, # note\nb]");
}

#[test]
fn print_records() {
    assert_eq!(reprint("<symbol <#f #t>>"), "<symbol <#f #t>>");
    assert_eq!(reprint("<empty>"), "<empty>");
    assert_eq!(reprint("<date 2024 1 1>"), "<date\n  2024\n  1\n  1>");
    assert_eq!(reprint_compact("<date 2024 1 1>"), "<date 2024 1 1>");
    assert_eq!(
        reprint("<outer <inner 1 2 3> 4>"),
        "<outer <inner\n  1\n  2\n  3> 4>"
    );
}

#[test]
fn print_sequences() {
    assert_eq!(reprint("[symbol1 symbol2]"), "[\n  symbol1\n  symbol2\n]");
    assert_eq!(reprint_compact("[symbol1 symbol2]"), "[symbol1, symbol2]");
    assert_eq!(reprint("[[1] []]"), "[\n  [\n    1\n  ]\n  []\n]");
}

#[test]
fn print_empty_collections() {
    assert_eq!(reprint("[]"), "[]");
    assert_eq!(reprint("#{}"), "#{}");
    assert_eq!(reprint("{}"), "{}");
}

#[test]
fn print_sets_in_canonical_order() {
    assert_eq!(reprint("#{3 1 2}"), "#{\n  1\n  2\n  3\n}");
    assert_eq!(reprint_compact("#{b \"b\" 1 #f}"), "#{#f, 1, \"b\", b}");
}

#[test]
fn print_dictionaries() {
    assert_eq!(
        reprint("{key: symbol key1: symbol}"),
        "{\n  key: symbol\n  key1: symbol\n}"
    );
    assert_eq!(reprint_compact("{b: 2, a: 1}"), "{a: 1, b: 2}");
    assert_eq!(reprint_compact("{<k>: 1 a: 2}"), "{a: 2, <k>: 1}");
}

#[test]
fn print_annotations_and_embedded() {
    assert_eq!(reprint("@a @b []"), "@a @b []");
    assert_eq!(reprint("#:<ref 1>"), "#:<ref 1>");
}

#[test]
fn print_with_style() {
    let value = TextValue::Sequence(vec![sym("a"), sym("b")]);
    assert_eq!(
        print_text_with(&value, PrintStyle::Pretty).to_string(),
        "[\n  a\n  b\n]"
    );
    assert_eq!(
        print_text_with(&value, PrintStyle::Compact).to_string(),
        "[a, b]"
    );
    assert_eq!(value.to_string(), "[a, b]");
}

#[test]
fn print_neutral_values() {
    let value = record!(
        "entry",
        Value::symbol("two words"),
        b"ab".to_vec(),
        1.5,
        f64::INFINITY
    );
    assert_eq!(
        print_value_compact(&value).to_string(),
        r#"<entry |two words| #[YWI] 1.500000 #xd"7f f0 00 00 00 00 00 00">"#
    );
    assert_eq!(print_value(&set![2, 1]).to_string(), "#{\n  1\n  2\n}");
}

#[test]
fn write_to_stream() {
    let value = TextValue::record(
        sym("point"),
        vec![
            TextValue::SignedInteger(BigInt::from(1)),
            TextValue::SignedInteger(BigInt::from(2)),
        ],
    );
    let mut out = vec![];
    let written = write_text(&mut out, &value).expect("Write failed.");
    assert_eq!(out, b"<point 1 2>".to_vec());
    assert_eq!(written, out.len());
}

#[test]
fn printed_text_reads_back() {
    let input = "@note {b: [1 2.5 |x y|], a: #{#t}, c: <r #x\"0102\" #[AQI]>}";
    let value = parse_text(input).expect("Invalid text.");
    let pretty = print_text(&value).to_string();
    let compact = print_text_compact(&value).to_string();
    assert_eq!(
        parse_text(&pretty).map(|v| print_text_compact(&v).to_string()),
        Ok(compact.clone())
    );
    assert_eq!(parse_text(&compact), Ok(parse_text(&pretty).expect("Invalid text.")));
}
