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

mod tokens;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::io;

use nom::bytes::complete::take;
use nom::character::complete::char;
use nom::Slice;
use nom_locate::LocatedSpan;
use preserves_model::{ToPreserves, Value};
use tracing::{debug, trace};

use crate::error::{PResult, ParseFailure};
use crate::maze::{Route, MAZE};
use crate::{TextErrorKind, TextReadConfig, TextReadError, TextValue};

pub(crate) use tokens::is_bare_symbol;
use tokens::{
    bare_atom, base64_byte_string, binary_byte_string, hex_byte_string, hex_double, line_text,
    quoted_symbol, separators, string_literal, whitespace,
};

pub(crate) type Span<'a> = LocatedSpan<&'a str>;

/// Parse a single value from a string. Whitespace is permitted before and after the value but
/// any other trailing input is an error.
///
/// # Arguments
/// * `input` - The text to parse.
pub fn parse_text(input: &str) -> Result<TextValue, TextReadError> {
    parse_text_with(input, TextReadConfig::default())
}

/// Parse a single value from a string with the provided configuration.
pub fn parse_text_with(input: &str, config: TextReadConfig) -> Result<TextValue, TextReadError> {
    let span = Span::new(input);
    let parser = ValueParser::new(config);
    let (rest, value) = parser
        .value(span, 0)
        .map_err(|err| read_error(err, span))?;
    let rest = skip(whitespace, rest);
    if rest.fragment().is_empty() {
        Ok(value)
    } else {
        Err(ParseFailure::new(rest, TextErrorKind::TrailingInput).into())
    }
}

/// Parse a single value and convert it to a neutral [`Value`].
pub fn parse_value(input: &str) -> Result<Value, TextReadError> {
    parse_text(input).map(|value| value.to_preserves())
}

/// Read the entirety of a UTF-8 stream and parse a single value from it.
pub fn read_text<R: io::Read>(mut reader: R) -> Result<TextValue, TextReadError> {
    let mut bytes = vec![];
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| TextReadError::at_start(TextErrorKind::Io(err.kind())))?;
    match String::from_utf8(bytes) {
        Ok(text) => parse_text(&text),
        Err(err) => {
            let valid_up_to = err.utf8_error().valid_up_to();
            let bytes = err.into_bytes();
            let prefix = String::from_utf8_lossy(&bytes[..valid_up_to]);
            let span = Span::new(prefix.as_ref());
            let at = span.slice(valid_up_to..);
            Err(ParseFailure::new(at, TextErrorKind::InvalidUtf8).into())
        }
    }
}

/// Reads successive values from a string.
///
/// Iteration stops after the first error. [`TextReader::consumed`] reports the number of bytes
/// consumed by the values successfully read so far.
#[derive(Debug)]
pub struct TextReader<'a> {
    parser: ValueParser,
    remaining: Span<'a>,
    failed: bool,
}

impl<'a> TextReader<'a> {
    pub fn new(input: &'a str) -> Self {
        TextReader::with_config(input, TextReadConfig::default())
    }

    pub fn with_config(input: &'a str, config: TextReadConfig) -> Self {
        TextReader {
            parser: ValueParser::new(config),
            remaining: Span::new(input),
            failed: false,
        }
    }

    pub fn consumed(&self) -> usize {
        self.remaining.location_offset()
    }
}

impl<'a> Iterator for TextReader<'a> {
    type Item = Result<TextValue, TextReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let TextReader {
            parser,
            remaining,
            failed,
        } = self;
        if *failed {
            return None;
        }
        let input = skip(whitespace, *remaining);
        if input.fragment().is_empty() {
            *remaining = input;
            return None;
        }
        match parser.value(input, 0) {
            Ok((rest, value)) => {
                *remaining = skip(whitespace, rest);
                Some(Ok(value))
            }
            Err(err) => {
                *failed = true;
                Some(Err(read_error(err, input)))
            }
        }
    }
}

fn skip<'a, F>(mut parser: F, input: Span<'a>) -> Span<'a>
where
    F: FnMut(Span<'a>) -> PResult<'a, Span<'a>>,
{
    parser(input).map(|(rest, _)| rest).unwrap_or(input)
}

fn read_error(err: nom::Err<ParseFailure<'_>>, input: Span<'_>) -> TextReadError {
    match err {
        nom::Err::Error(failure) | nom::Err::Failure(failure) => failure.into(),
        nom::Err::Incomplete(_) => {
            let end = input.slice(input.fragment().len()..);
            ParseFailure::new(end, TextErrorKind::UnexpectedEof).into()
        }
    }
}

fn fail<T>(input: Span<'_>, kind: TextErrorKind) -> PResult<'_, T> {
    Err(nom::Err::Failure(ParseFailure::new(input, kind)))
}

/// Recursive descent over the text, dispatching on the prefix of each value.
#[derive(Debug, Clone, Copy)]
struct ValueParser {
    config: TextReadConfig,
}

impl ValueParser {
    fn new(config: TextReadConfig) -> Self {
        ValueParser { config }
    }

    fn descend<'a>(
        &self,
        input: Span<'a>,
        depth: usize,
    ) -> Result<usize, nom::Err<ParseFailure<'a>>> {
        if depth >= self.config.max_depth {
            Err(nom::Err::Failure(ParseFailure::new(
                input,
                TextErrorKind::DepthLimit(self.config.max_depth),
            )))
        } else {
            Ok(depth + 1)
        }
    }

    fn value<'a>(&self, input: Span<'a>, depth: usize) -> PResult<'a, TextValue> {
        let (input, _) = whitespace(input)?;
        match MAZE.route(input.fragment()) {
            Some((route, len)) => {
                trace!(?route, offset = input.location_offset(), "Dispatching on prefix.");
                let (input, _) = take::<_, _, ParseFailure<'a>>(len)(input)?;
                self.routed(route, input, depth)
            }
            None => bare_atom(input),
        }
    }

    fn routed<'a>(&self, route: Route, input: Span<'a>, depth: usize) -> PResult<'a, TextValue> {
        match route {
            Route::True => Ok((input, TextValue::Boolean(true))),
            Route::False => Ok((input, TextValue::Boolean(false))),
            Route::String => string_literal(input),
            Route::QuotedSymbol => quoted_symbol(input),
            Route::BinaryByteString => binary_byte_string(input),
            Route::Base64ByteString => base64_byte_string(input),
            Route::HexByteString => hex_byte_string(input),
            Route::HexDouble => hex_double(input),
            Route::Comment | Route::Shebang => {
                let (input, text) = line_text(input)?;
                let depth = self.descend(input, depth)?;
                let (input, value) = self.value(input, depth)?;
                debug!(shebang = route == Route::Shebang, "Attaching comment to the next value.");
                let value = Box::new(value);
                if route == Route::Shebang {
                    Ok((input, TextValue::Shebang { text, value }))
                } else {
                    Ok((input, TextValue::Comment { text, value }))
                }
            }
            Route::Embedded => {
                let depth = self.descend(input, depth)?;
                let (input, value) = self.value(input, depth)?;
                Ok((input, TextValue::Embedded(Box::new(value))))
            }
            Route::Annotation => {
                let depth = self.descend(input, depth)?;
                let (input, annotation) = self.value(input, depth)?;
                let (input, value) = self.value(input, depth)?;
                Ok((input, TextValue::annotated(annotation, value)))
            }
            Route::Record => {
                let depth = self.descend(input, depth)?;
                self.record(input, depth)
            }
            Route::Sequence => {
                let depth = self.descend(input, depth)?;
                let (input, items) = self.elements(input, ']', depth)?;
                Ok((input, TextValue::Sequence(items)))
            }
            Route::Set => {
                let depth = self.descend(input, depth)?;
                let (input, members) = self.elements(input, '}', depth)?;
                Ok((input, TextValue::Set(distinct_members(members))))
            }
            Route::Dictionary => {
                let depth = self.descend(input, depth)?;
                self.dictionary(input, depth)
            }
        }
    }

    fn record<'a>(&self, input: Span<'a>, depth: usize) -> PResult<'a, TextValue> {
        let (input, _) = whitespace(input)?;
        if input.fragment().starts_with('>') {
            return fail(input, TextErrorKind::MissingLabel);
        }
        let (mut input, label) = self.value(input, depth)?;
        let mut fields = vec![];
        loop {
            let (rest, _) = whitespace(input)?;
            if let Ok((rest, _)) = char::<_, ParseFailure<'a>>('>')(rest) {
                return Ok((rest, TextValue::record(label, fields)));
            }
            let (rest, field) = self.value(rest, depth)?;
            fields.push(field);
            input = rest;
        }
    }

    fn elements<'a>(
        &self,
        mut input: Span<'a>,
        close: char,
        depth: usize,
    ) -> PResult<'a, Vec<TextValue>> {
        let mut items = vec![];
        loop {
            let (rest, _) = separators(input)?;
            if let Ok((rest, _)) = char::<_, ParseFailure<'a>>(close)(rest) {
                return Ok((rest, items));
            }
            let (rest, item) = self.value(rest, depth)?;
            items.push(item);
            input = rest;
        }
    }

    fn dictionary<'a>(&self, mut input: Span<'a>, depth: usize) -> PResult<'a, TextValue> {
        let mut entries: Vec<(TextValue, TextValue)> = vec![];
        let mut positions = BTreeMap::new();
        loop {
            let (rest, _) = separators(input)?;
            if let Ok((rest, _)) = char::<_, ParseFailure<'a>>('}')(rest) {
                return Ok((rest, TextValue::Dictionary(entries)));
            }
            let (rest, key) = self.value(rest, depth)?;
            let (rest, _) = whitespace(rest)?;
            let (rest, _) = colon(rest)?;
            let (rest, value) = self.value(rest, depth)?;
            match positions.entry(key.to_preserves()) {
                Entry::Occupied(entry) => entries[*entry.get()] = (key, value),
                Entry::Vacant(entry) => {
                    entry.insert(entries.len());
                    entries.push((key, value));
                }
            }
            input = rest;
        }
    }
}

fn colon(input: Span<'_>) -> PResult<'_, char> {
    char(':')(input).map_err(|err: nom::Err<ParseFailure<'_>>| {
        err.map(|failure| {
            if failure.kind == TextErrorKind::UnexpectedEof {
                failure
            } else {
                ParseFailure::new(input, TextErrorKind::MissingColon)
            }
        })
    })
}

/// Drop members that are equal to an earlier member, keeping the order of the rest.
fn distinct_members(members: Vec<TextValue>) -> Vec<TextValue> {
    let mut seen = BTreeSet::new();
    members
        .into_iter()
        .filter(|member| seen.insert(member.to_preserves()))
        .collect()
}
