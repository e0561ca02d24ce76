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

#[cfg(test)]
mod tests;

use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Write};
use std::io;

use base64::display::Base64Display;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use preserves_model::order::canonical_order_by;
use preserves_model::{ToPreserves, Value};

use crate::{PrintStyle, TextValue, TextWriteError};

/// Number of fractional digits used for bare doubles.
pub(crate) const BARE_DOUBLE_PRECISION: usize = 6;

/// Print the canonical, multi-line text representation of a [`TextValue`].
pub fn print_text(value: &TextValue) -> impl Display + '_ {
    TextPrint(value, PrettyPrint::new())
}

/// Print a single line text representation of a [`TextValue`].
pub fn print_text_compact(value: &TextValue) -> impl Display + '_ {
    TextPrint(value, CompactPrint)
}

pub fn print_text_with(value: &TextValue, style: PrintStyle) -> impl Display + '_ {
    StyledPrint(value, style)
}

/// Print the canonical text representation of a neutral [`Value`], choosing the syntax for each
/// atom as [`TextValue::from_value`] does.
pub fn print_value(value: &Value) -> impl Display {
    TextPrint(TextValue::from_value(value), PrettyPrint::new())
}

pub fn print_value_compact(value: &Value) -> impl Display {
    TextPrint(TextValue::from_value(value), CompactPrint)
}

/// Write the canonical text representation of a [`TextValue`], returning the number of bytes
/// written.
pub fn write_text<W: io::Write>(
    writer: &mut W,
    value: &TextValue,
) -> Result<usize, TextWriteError> {
    let text = print_text(value).to_string();
    writer.write_all(text.as_bytes())?;
    Ok(text.len())
}

struct TextPrint<T, S>(T, S);

impl<T, S> Display for TextPrint<T, S>
where
    T: Borrow<TextValue>,
    S: PrintStrategy + Copy,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let TextPrint(value, strategy) = self;
        let mut strategy = *strategy;
        print_node(f, Borrow::<TextValue>::borrow(value), &mut strategy)
    }
}

struct StyledPrint<'a>(&'a TextValue, PrintStyle);

impl<'a> Display for StyledPrint<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let StyledPrint(value, style) = self;
        match style {
            PrintStyle::Pretty => TextPrint(*value, PrettyPrint::new()).fmt(f),
            PrintStyle::Compact => TextPrint(*value, CompactPrint).fmt(f),
        }
    }
}

fn print_node<S: PrintStrategy>(
    f: &mut Formatter<'_>,
    value: &TextValue,
    strategy: &mut S,
) -> std::fmt::Result {
    match value {
        TextValue::Boolean(true) => f.write_str("#t"),
        TextValue::Boolean(false) => f.write_str("#f"),
        TextValue::BareDouble(d) if d.is_finite() => {
            write!(f, "{:.*}", BARE_DOUBLE_PRECISION, d)
        }
        TextValue::BareDouble(d) | TextValue::HexDouble(d) => {
            write_hex("#xd\"", &d.to_be_bytes(), f)
        }
        TextValue::SignedInteger(n) => write!(f, "{}", n),
        TextValue::String(text) => write_string_literal(text, f),
        TextValue::BareSymbol(name) => f.write_str(name),
        TextValue::QuotedSymbol(name) => write_quoted_symbol(name, f),
        TextValue::HexByteString(bytes) => write_hex("#x\"", bytes, f),
        TextValue::Base64ByteString(bytes) => write!(
            f,
            "#[{}]",
            Base64Display::new(bytes.as_slice(), &URL_SAFE_NO_PAD)
        ),
        TextValue::BinaryByteString(bytes) => write_binary_literal(bytes, f),
        TextValue::Record { label, fields } => {
            f.write_str("<")?;
            print_node(f, label, strategy)?;
            for (index, field) in fields.iter().enumerate() {
                strategy.field_padding(index, fields.len()).fmt(f)?;
                print_node(f, field, strategy)?;
            }
            strategy.record_end(fields.len());
            f.write_str(">")
        }
        TextValue::Sequence(items) => {
            print_block(f, ("[", "]"), items.iter(), strategy, print_node)
        }
        TextValue::Set(members) => {
            let ordered = canonical_order_by(members, ToPreserves::to_preserves);
            print_block(f, ("#{", "}"), ordered.into_iter(), strategy, print_node)
        }
        TextValue::Dictionary(entries) => {
            let ordered = canonical_order_by(entries, |(key, _)| key.to_preserves());
            print_block(
                f,
                ("{", "}"),
                ordered.into_iter(),
                strategy,
                |f, (key, value), strategy| {
                    print_node(f, key, strategy)?;
                    f.write_str(": ")?;
                    print_node(f, value, strategy)
                },
            )
        }
        TextValue::Annotation { annotation, value } => {
            f.write_str("@")?;
            print_node(f, annotation, strategy)?;
            f.write_str(" ")?;
            print_node(f, value, strategy)
        }
        TextValue::Embedded(inner) => {
            f.write_str("#:")?;
            print_node(f, inner, strategy)
        }
        TextValue::Comment { text, value } => {
            write!(f, "#{}", text)?;
            strategy.line_break().fmt(f)?;
            print_node(f, value, strategy)
        }
        TextValue::Shebang { text, value } => {
            write!(f, "#!{}", text)?;
            strategy.line_break().fmt(f)?;
            print_node(f, value, strategy)
        }
    }
}

fn print_block<'v, T, I, S, F>(
    f: &mut Formatter<'_>,
    (open, close): (&str, &str),
    items: I,
    strategy: &mut S,
    mut print_item: F,
) -> std::fmt::Result
where
    T: 'v,
    I: ExactSizeIterator<Item = &'v T>,
    S: PrintStrategy,
    F: FnMut(&mut Formatter<'_>, &'v T, &mut S) -> std::fmt::Result,
{
    let len = items.len();
    f.write_str(open)?;
    strategy.block_start_padding(len).fmt(f)?;
    for (index, item) in items.enumerate() {
        if index > 0 {
            strategy.item_padding().fmt(f)?;
        }
        print_item(f, item, strategy)?;
    }
    strategy.block_end_padding(len).fmt(f)?;
    f.write_str(close)
}

static DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

fn write_hex(prefix: &str, bytes: &[u8], f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(prefix)?;
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            f.write_char(' ')?;
        }
        f.write_char(DIGITS[usize::from(byte >> 4)])?;
        f.write_char(DIGITS[usize::from(byte & 0xf)])?;
    }
    f.write_char('"')
}

fn write_unicode_escape(c: char, f: &mut Formatter<'_>) -> std::fmt::Result {
    let n = c as usize;
    f.write_str("\\u")?;
    for shift in [12, 8, 4, 0] {
        f.write_char(DIGITS[(n >> shift) & 0xf])?;
    }
    Ok(())
}

fn write_string_literal(text: &str, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0c}' => f.write_str("\\f")?,
            c if c < '\u{20}' => write_unicode_escape(c, f)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

fn write_quoted_symbol(name: &str, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_char('|')?;
    for c in name.chars() {
        match c {
            '|' => f.write_str("\\|")?,
            '\\' => f.write_str("\\\\")?,
            '\r' => f.write_str("\\r")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('|')
}

fn write_binary_literal(bytes: &[u8], f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str("#\"")?;
    for byte in bytes {
        match byte {
            b'"' => f.write_str("\\\"")?,
            b'\\' => f.write_str("\\\\")?,
            b'\r' => f.write_str("\\r")?,
            b'\n' => f.write_str("\\n")?,
            b'\t' => f.write_str("\\t")?,
            0x08 => f.write_str("\\b")?,
            0x0c => f.write_str("\\f")?,
            32..=126 => f.write_char(char::from(*byte))?,
            _ => {
                f.write_str("\\x")?;
                f.write_char(DIGITS[usize::from(byte >> 4)])?;
                f.write_char(DIGITS[usize::from(byte & 0xf)])?;
            }
        }
    }
    f.write_char('"')
}

/// Padding used by the print strategies to lay out compound values.
enum Padding<'a> {
    /// Simple padding that writes only a string slice.
    Simple(&'a str),
    /// A string slice as a prefix followed by `repeats` copies of another.
    Complex {
        prefix: &'a str,
        block: &'a str,
        repeats: usize,
    },
}

const NO_SPACE: Padding = Padding::Simple("");
const SINGLE_SPACE: Padding = Padding::Simple(" ");
const COMMA_SPACE: Padding = Padding::Simple(", ");
const PRETTY_INDENT: &str = "  ";
const NEW_LINE: &str = "\n";

/// Records with more fields than this are broken over multiple lines by the pretty printer.
const INLINE_FIELDS: usize = 2;

impl<'a> Display for Padding<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Padding::Simple(padding) => f.write_str(padding)?,
            Padding::Complex {
                prefix,
                block,
                repeats,
            } => {
                f.write_str(prefix)?;
                for _ in 0..*repeats {
                    f.write_str(block)?;
                }
            }
        }

        Ok(())
    }
}

trait PrintStrategy {
    /// Written after the opening delimiter of a sequence, set or dictionary.
    fn block_start_padding(&mut self, items: usize) -> Padding<'static>;

    /// Written before the closing delimiter of a sequence, set or dictionary.
    fn block_end_padding(&mut self, items: usize) -> Padding<'static>;

    /// Written between the items of a sequence, set or dictionary.
    fn item_padding(&self) -> Padding<'static>;

    /// Written before each field of a record.
    fn field_padding(&mut self, index: usize, fields: usize) -> Padding<'static>;

    fn record_end(&mut self, fields: usize);

    /// Written after a comment, which always runs to the end of the line.
    fn line_break(&self) -> Padding<'static>;
}

#[derive(Clone, Copy)]
struct CompactPrint;

impl PrintStrategy for CompactPrint {
    fn block_start_padding(&mut self, _items: usize) -> Padding<'static> {
        NO_SPACE
    }

    fn block_end_padding(&mut self, _items: usize) -> Padding<'static> {
        NO_SPACE
    }

    fn item_padding(&self) -> Padding<'static> {
        COMMA_SPACE
    }

    fn field_padding(&mut self, _index: usize, _fields: usize) -> Padding<'static> {
        SINGLE_SPACE
    }

    fn record_end(&mut self, _fields: usize) {}

    fn line_break(&self) -> Padding<'static> {
        Padding::Simple(NEW_LINE)
    }
}

#[derive(Clone, Copy)]
struct PrettyPrint {
    indent_level: usize,
}

impl PrettyPrint {
    fn new() -> Self {
        PrettyPrint { indent_level: 0 }
    }

    fn write_new_line(&self) -> Padding<'static> {
        Padding::Complex {
            prefix: NEW_LINE,
            block: PRETTY_INDENT,
            repeats: self.indent_level,
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1
    }

    fn decrease_indent(&mut self) {
        self.indent_level -= 1
    }
}

impl PrintStrategy for PrettyPrint {
    fn block_start_padding(&mut self, items: usize) -> Padding<'static> {
        if items == 0 {
            NO_SPACE
        } else {
            self.increase_indent();
            self.write_new_line()
        }
    }

    fn block_end_padding(&mut self, items: usize) -> Padding<'static> {
        if items == 0 {
            NO_SPACE
        } else {
            self.decrease_indent();
            self.write_new_line()
        }
    }

    fn item_padding(&self) -> Padding<'static> {
        self.write_new_line()
    }

    fn field_padding(&mut self, index: usize, fields: usize) -> Padding<'static> {
        if fields > INLINE_FIELDS {
            if index == 0 {
                self.increase_indent();
            }
            self.write_new_line()
        } else {
            SINGLE_SPACE
        }
    }

    fn record_end(&mut self, fields: usize) {
        if fields > INLINE_FIELDS {
            self.decrease_indent();
        }
    }

    fn line_break(&self) -> Padding<'static> {
        self.write_new_line()
    }
}
