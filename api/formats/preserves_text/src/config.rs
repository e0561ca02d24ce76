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

/// Configuration for the text reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextReadConfig {
    /// The maximum nesting depth of compound values, annotations and comments (default: 128).
    pub max_depth: usize,
}

impl Default for TextReadConfig {
    fn default() -> Self {
        TextReadConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Layout used when printing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintStyle {
    /// Compound values are broken over multiple lines with two spaces of indentation per level.
    #[default]
    Pretty,
    /// Everything is printed on a single line.
    Compact,
}
