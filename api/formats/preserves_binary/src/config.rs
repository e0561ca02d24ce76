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

const DEFAULT_MAX_DEPTH: usize = 128;
const DEFAULT_MAX_LENGTH: usize = 64 * 1024 * 1024;

/// Configuration for the binary reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryReadConfig {
    /// The maximum nesting depth of compound values (default: 128).
    pub max_depth: usize,
    /// The maximum declared length, in bytes, of a single integer, string, byte string or symbol
    /// (default: 64MiB).
    pub max_length: usize,
}

impl Default for BinaryReadConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}
