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

use nom::error::{ErrorKind, FromExternalError, ParseError};
use thiserror::Error;

use crate::parser::Span;

/// The reasons that reading text can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TextErrorKind {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Expected '{0}'")]
    Expected(char),
    #[error("Unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("Expected ':' between a dictionary key and its value")]
    MissingColon,
    #[error("Invalid hexadecimal digits")]
    InvalidHex,
    #[error("Invalid base64 data")]
    InvalidBase64,
    #[error("A hex double must have 8 bytes but had {0}")]
    HexDoubleLength(usize),
    #[error("Invalid integer")]
    InvalidInteger,
    #[error("Double out of range")]
    InvalidDouble,
    #[error("Invalid escape sequence")]
    InvalidEscape,
    #[error("A record must have a label")]
    MissingLabel,
    #[error("Values were nested more than {0} levels deep")]
    DepthLimit(usize),
    #[error("Unconsumed input after the value")]
    TrailingInput,
    #[error("IO error: {0:?}")]
    Io(io::ErrorKind),
    #[error("Invalid UTF-8")]
    InvalidUtf8,
}

/// Reading text failed. The location is that of the character at which the failure was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at ({line}:{column}).")]
pub struct TextReadError {
    pub kind: TextErrorKind,
    /// Byte offset into the input.
    pub offset: usize,
    pub line: u32,
    /// Column in characters, starting from 1.
    pub column: usize,
}

impl TextReadError {
    pub(crate) fn at_start(kind: TextErrorKind) -> Self {
        TextReadError {
            kind,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Whether the input ended part way through a value.
    pub fn is_eof(&self) -> bool {
        self.kind == TextErrorKind::UnexpectedEof
    }
}

impl<'a> From<ParseFailure<'a>> for TextReadError {
    fn from(err: ParseFailure<'a>) -> Self {
        let ParseFailure { input, kind } = err;
        TextReadError {
            kind,
            offset: input.location_offset(),
            line: input.location_line(),
            column: input.get_utf8_column(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TextWriteError {
    #[error("Writing the text failed: {0}")]
    Io(#[from] io::Error),
}

/// Error type threaded through the `nom` parsers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParseFailure<'a> {
    pub input: Span<'a>,
    pub kind: TextErrorKind,
}

impl<'a> ParseFailure<'a> {
    pub fn new(input: Span<'a>, kind: TextErrorKind) -> Self {
        ParseFailure { input, kind }
    }

    /// Fail on the next character of the input or at the end of the input.
    pub fn unexpected(input: Span<'a>) -> Self {
        let kind = match input.fragment().chars().next() {
            Some(c) => TextErrorKind::UnexpectedChar(c),
            None => TextErrorKind::UnexpectedEof,
        };
        ParseFailure { input, kind }
    }
}

impl<'a> ParseError<Span<'a>> for ParseFailure<'a> {
    fn from_error_kind(input: Span<'a>, _kind: ErrorKind) -> Self {
        ParseFailure::unexpected(input)
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: Span<'a>, c: char) -> Self {
        if input.fragment().is_empty() {
            ParseFailure::new(input, TextErrorKind::UnexpectedEof)
        } else {
            ParseFailure::new(input, TextErrorKind::Expected(c))
        }
    }
}

impl<'a> FromExternalError<Span<'a>, TextErrorKind> for ParseFailure<'a> {
    fn from_external_error(input: Span<'a>, _kind: ErrorKind, e: TextErrorKind) -> Self {
        ParseFailure::new(input, e)
    }
}

pub(crate) type PResult<'a, T> = nom::IResult<Span<'a>, T, ParseFailure<'a>>;
