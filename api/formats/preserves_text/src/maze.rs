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

use lazy_static::lazy_static;
use smallvec::SmallVec;

/// The readers that can be selected by the prefix of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    QuotedSymbol,
    String,
    Comment,
    Shebang,
    True,
    False,
    BinaryByteString,
    Base64ByteString,
    Set,
    Embedded,
    HexByteString,
    HexDouble,
    Record,
    Sequence,
    Dictionary,
    Annotation,
}

const ROUTES: &[(&str, Route)] = &[
    ("|", Route::QuotedSymbol),
    ("\"", Route::String),
    ("#", Route::Comment),
    ("#!", Route::Shebang),
    ("#t", Route::True),
    ("#f", Route::False),
    ("#\"", Route::BinaryByteString),
    ("#[", Route::Base64ByteString),
    ("#{", Route::Set),
    ("#:", Route::Embedded),
    ("#x\"", Route::HexByteString),
    ("#xd\"", Route::HexDouble),
    ("<", Route::Record),
    ("[", Route::Sequence),
    ("{", Route::Dictionary),
    ("@", Route::Annotation),
];

#[derive(Debug, Default)]
struct Node {
    route: Option<Route>,
    branches: SmallVec<[(char, usize); 4]>,
}

/// A prefix trie over the opening characters of each delimited syntax.
#[derive(Debug)]
pub struct Maze {
    nodes: Vec<Node>,
}

lazy_static! {
    pub static ref MAZE: Maze = Maze::new(ROUTES);
}

impl Maze {
    fn new(routes: &[(&str, Route)]) -> Self {
        let mut maze = Maze {
            nodes: vec![Node::default()],
        };
        for (prefix, route) in routes {
            let mut current = 0;
            for c in prefix.chars() {
                current = maze.child(current, c);
            }
            maze.nodes[current].route = Some(*route);
        }
        maze
    }

    fn child(&mut self, parent: usize, c: char) -> usize {
        let existing = self.nodes[parent]
            .branches
            .iter()
            .find(|(branch, _)| *branch == c)
            .map(|(_, index)| *index);
        match existing {
            Some(index) => index,
            None => {
                let index = self.nodes.len();
                self.nodes.push(Node::default());
                self.nodes[parent].branches.push((c, index));
                index
            }
        }
    }

    /// Follow the input through the trie for as long as it matches and select the deepest node
    /// that has a reader. Returns the reader and the length, in bytes, of the matched prefix.
    pub fn route(&self, input: &str) -> Option<(Route, usize)> {
        let mut current = 0;
        let mut selected = None;
        for (offset, c) in input.char_indices() {
            let next = self.nodes[current]
                .branches
                .iter()
                .find(|(branch, _)| *branch == c)
                .map(|(_, index)| *index);
            match next {
                Some(index) => {
                    current = index;
                    if let Some(route) = self.nodes[current].route {
                        selected = Some((route, offset + c.len_utf8()));
                    }
                }
                None => break,
            }
        }
        selected
    }
}
