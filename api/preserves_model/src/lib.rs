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

//! The codec independent Preserves data model.
//!
//! Every codec reads into and writes out of the [`Value`] tree defined here. The tree carries a
//! total order (see [`order`]) that both codecs rely on to produce canonical output for sets and
//! dictionaries.

pub use num_bigint as bigint;

mod collections;
mod compound;
pub mod convert;
mod kind;
#[macro_use]
pub mod macros;
pub mod order;
mod value;

pub use collections::{Dictionary, Set};
pub use compound::{Annotated, Comment, CommentKind, Record};
pub use convert::{ConversionError, FromPreserves, Symbol, ToPreserves};
pub use kind::ValueKind;
pub use value::Value;
