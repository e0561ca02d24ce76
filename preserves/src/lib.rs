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

#[doc(inline)]
pub use preserves_model as model;

pub use preserves_model::{
    dictionary, record, sequence, set, Annotated, Comment, CommentKind, ConversionError,
    Dictionary, FromPreserves, Record, Set, Symbol, ToPreserves, Value, ValueKind,
};

/// The canonical binary encoding.
#[cfg(feature = "binary")]
pub mod binary {
    pub use preserves_binary::{
        encode_value, from_bytes, read_value, to_bytes, write_value, BinaryReadConfig,
        BinaryReader, Tag,
    };

    pub mod codec {
        pub use preserves_binary::PreservesCodec;
    }

    pub mod varint {
        pub use preserves_binary::varint::*;
    }

    pub mod errors {
        pub use preserves_binary::{BinaryReadError, BinaryWriteError, CodecError};
    }
}

/// The human readable text syntax.
#[cfg(feature = "text")]
pub mod text {
    pub use preserves_text::{
        parse_text, parse_text_with, parse_value, print_text, print_text_compact,
        print_text_with, print_value, print_value_compact, read_text, write_text, PrintStyle,
        TextReadConfig, TextReader, TextValue,
    };

    pub mod errors {
        pub use preserves_text::{TextErrorKind, TextReadError, TextWriteError};
    }
}
