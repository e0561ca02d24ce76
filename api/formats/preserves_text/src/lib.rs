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

//! The text syntax for Preserves values.
//!
//! Text is read into a [`TextValue`] tree that remembers which surface syntax was used for each
//! node (bare or quoted symbols, the different byte string forms, comments) so that a document
//! can be printed back as it was written. [`TextValue`] converts to and from the neutral
//! [`preserves_model::Value`], forgetting or choosing the syntax respectively.

mod config;
mod error;
mod maze;
mod parser;
mod printer;
mod value;

pub use config::{PrintStyle, TextReadConfig};
pub use error::{TextErrorKind, TextReadError, TextWriteError};
pub use parser::{parse_text, parse_text_with, parse_value, read_text, TextReader};
pub use printer::{
    print_text, print_text_compact, print_text_with, print_value, print_value_compact, write_text,
};
pub use value::TextValue;
