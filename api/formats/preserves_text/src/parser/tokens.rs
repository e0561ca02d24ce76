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

use std::borrow::Cow;
use std::convert::TryInto;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use lazy_static::lazy_static;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_while, take_while1};
use nom::character::complete::{anychar, char, satisfy};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::many0_count;
use nom::sequence::{pair, terminated};
use num_bigint::BigInt;
use regex::Regex;

use super::Span;
use crate::error::{PResult, ParseFailure};
use crate::{TextErrorKind, TextValue};

lazy_static! {
    static ref INTEGER: Regex =
        Regex::new(r"^[-+]?\d+$").expect("Failed to compile integer pattern");
    static ref DOUBLE: Regex =
        Regex::new(r"^([-+]?\d+)((\.\d+([eE][-+]?\d+)?)|([eE][-+]?\d+))$")
            .expect("Failed to compile double pattern");
}

const BARE_PUNCTUATION: &str = "-~!$%^&*?_=+/.";

/// Characters that may appear in a bare symbol or number.
pub fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || BARE_PUNCTUATION.contains(c)
}

fn is_numeric(text: &str) -> bool {
    INTEGER.is_match(text) || DOUBLE.is_match(text)
}

/// Whether a symbol can be written without quotes and read back as the same symbol.
pub fn is_bare_symbol(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_bare_char) && !is_numeric(name)
}

fn unwrap_span(span: Span<'_>) -> &str {
    *span.fragment()
}

fn failure(input: Span<'_>, kind: TextErrorKind) -> nom::Err<ParseFailure<'_>> {
    nom::Err::Failure(ParseFailure::new(input, kind))
}

pub fn whitespace(input: Span<'_>) -> PResult<'_, Span<'_>> {
    take_while(char::is_whitespace)(input)
}

/// Whitespace and the optional commas between the items of a collection.
pub fn separators(input: Span<'_>) -> PResult<'_, Span<'_>> {
    take_while(|c: char| c.is_whitespace() || c == ',')(input)
}

/// A run of bare characters, classified as an integer, a double or a symbol.
pub fn bare_atom(input: Span<'_>) -> PResult<'_, TextValue> {
    let (rest, run) = take_while1(is_bare_char)(input)?;
    let text = unwrap_span(run);
    if INTEGER.is_match(text) {
        let digits = text.strip_prefix('+').unwrap_or(text);
        match digits.parse::<BigInt>() {
            Ok(n) => Ok((rest, TextValue::SignedInteger(n))),
            Err(_) => Err(failure(input, TextErrorKind::InvalidInteger)),
        }
    } else if DOUBLE.is_match(text) {
        match text.parse::<f64>() {
            Ok(d) if d.is_finite() => Ok((rest, TextValue::BareDouble(d))),
            _ => Err(failure(input, TextErrorKind::InvalidDouble)),
        }
    } else {
        Ok((rest, TextValue::BareSymbol(text.to_string())))
    }
}

/// The body of a delimited literal, up to and including the closing delimiter. A backslash
/// escapes the following character, including the delimiter.
fn escaped_body<'a>(delimiter: char) -> impl FnMut(Span<'a>) -> PResult<'a, Span<'a>> {
    move |input: Span<'a>| {
        terminated(
            recognize(many0_count(alt((
                recognize(satisfy(move |c| c != '\\' && c != delimiter)),
                recognize(pair(char('\\'), anychar)),
            )))),
            char(delimiter),
        )(input)
    }
}

/// States for the automaton that resolves backslash escapes.
enum EscapeState {
    None,
    Escape,
    Unicode { code: u32, digits: u8 },
    Hex { code: u8, digits: u8 },
}

fn simple_escape(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        ow => ow,
    }
}

/// Resolve the escapes in a string or quoted symbol. Unknown escapes stand for the escaped
/// character itself.
fn unescape(literal: &str) -> Result<Cow<'_, str>, TextErrorKind> {
    if !literal.contains('\\') {
        return Ok(Cow::Borrowed(literal));
    }
    let mut output = String::with_capacity(literal.len());
    let mut state = EscapeState::None;
    for c in literal.chars() {
        state = match state {
            EscapeState::None if c == '\\' => EscapeState::Escape,
            EscapeState::None => {
                output.push(c);
                EscapeState::None
            }
            EscapeState::Escape if c == 'u' => EscapeState::Unicode { code: 0, digits: 0 },
            EscapeState::Escape => {
                output.push(simple_escape(c));
                EscapeState::None
            }
            EscapeState::Unicode { code, digits } => {
                let d = c.to_digit(16).ok_or(TextErrorKind::InvalidEscape)?;
                let code = (code << 4) | d;
                if digits == 3 {
                    output.push(char::from_u32(code).ok_or(TextErrorKind::InvalidEscape)?);
                    EscapeState::None
                } else {
                    EscapeState::Unicode {
                        code,
                        digits: digits + 1,
                    }
                }
            }
            EscapeState::Hex { .. } => return Err(TextErrorKind::InvalidEscape),
        }
    }
    match state {
        EscapeState::None => Ok(Cow::Owned(output)),
        _ => Err(TextErrorKind::InvalidEscape),
    }
}

/// Resolve the escapes in a binary byte string. As well as the string escapes, `\xHH` stands for
/// a single byte. Other characters contribute their UTF-8 encoding.
fn unescape_bytes(literal: &str) -> Result<Vec<u8>, TextErrorKind> {
    let mut output = Vec::with_capacity(literal.len());
    let mut state = EscapeState::None;
    let mut utf8 = [0; 4];
    for c in literal.chars() {
        state = match state {
            EscapeState::None if c == '\\' => EscapeState::Escape,
            EscapeState::None => {
                output.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                EscapeState::None
            }
            EscapeState::Escape if c == 'x' => EscapeState::Hex { code: 0, digits: 0 },
            EscapeState::Escape => {
                output.extend_from_slice(simple_escape(c).encode_utf8(&mut utf8).as_bytes());
                EscapeState::None
            }
            EscapeState::Hex { code, digits } => {
                let d = c.to_digit(16).ok_or(TextErrorKind::InvalidEscape)? as u8;
                let code = (code << 4) | d;
                if digits == 1 {
                    output.push(code);
                    EscapeState::None
                } else {
                    EscapeState::Hex {
                        code,
                        digits: digits + 1,
                    }
                }
            }
            EscapeState::Unicode { .. } => return Err(TextErrorKind::InvalidEscape),
        }
    }
    match state {
        EscapeState::None => Ok(output),
        _ => Err(TextErrorKind::InvalidEscape),
    }
}

/// The remainder of a string literal, after the opening quote.
pub fn string_literal(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(escaped_body('"'), |body| {
        unescape(unwrap_span(body)).map(|text| TextValue::String(text.into_owned()))
    })(input)
}

/// The remainder of a quoted symbol, after the opening bar.
pub fn quoted_symbol(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(escaped_body('|'), |body| {
        unescape(unwrap_span(body)).map(|text| TextValue::QuotedSymbol(text.into_owned()))
    })(input)
}

/// The remainder of a binary byte string, after `#"`.
pub fn binary_byte_string(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(escaped_body('"'), |body| {
        unescape_bytes(unwrap_span(body)).map(TextValue::BinaryByteString)
    })(input)
}

fn decode_hex(text: &str) -> Result<Vec<u8>, TextErrorKind> {
    let digits = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(16).ok_or(TextErrorKind::InvalidHex))
        .collect::<Result<Vec<_>, _>>()?;
    if digits.len() % 2 != 0 {
        return Err(TextErrorKind::InvalidHex);
    }
    Ok(digits
        .chunks(2)
        .map(|pair| ((pair[0] << 4) | pair[1]) as u8)
        .collect())
}

fn until_quote(input: Span<'_>) -> PResult<'_, Span<'_>> {
    terminated(take_till(|c: char| c == '"'), char('"'))(input)
}

/// The remainder of a hex byte string, after `#x"`.
pub fn hex_byte_string(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(until_quote, |body| {
        decode_hex(unwrap_span(body)).map(TextValue::HexByteString)
    })(input)
}

/// The remainder of a hex double, after `#xd"`.
pub fn hex_double(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(until_quote, |body| -> Result<TextValue, TextErrorKind> {
        let bytes = decode_hex(unwrap_span(body))?;
        let len = bytes.len();
        let bits: [u8; 8] = bytes
            .try_into()
            .map_err(|_| TextErrorKind::HexDoubleLength(len))?;
        Ok(TextValue::HexDouble(f64::from_be_bytes(bits)))
    })(input)
}

fn decode_base64(text: &str) -> Result<Vec<u8>, TextErrorKind> {
    let normalized = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            ow => ow,
        })
        .collect::<String>();
    URL_SAFE_NO_PAD
        .decode(normalized)
        .map_err(|_| TextErrorKind::InvalidBase64)
}

/// The remainder of a base64 byte string, after `#[`. Both the standard and URL safe alphabets
/// are accepted, with or without padding.
pub fn base64_byte_string(input: Span<'_>) -> PResult<'_, TextValue> {
    map_res(
        terminated(take_till(|c: char| c == ']'), char(']')),
        |body| decode_base64(unwrap_span(body)).map(TextValue::Base64ByteString),
    )(input)
}

/// The text of a comment, up to the end of the line. The line ending (`\n`, `\r` or `\r\n`) is
/// consumed but not included.
pub fn line_text(input: Span<'_>) -> PResult<'_, String> {
    map(
        terminated(
            take_till(|c: char| c == '\n' || c == '\r'),
            opt(alt((tag("\r\n"), tag("\n"), tag("\r")))),
        ),
        |text: Span<'_>| unwrap_span(text).to_string(),
    )(input)
}
