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

use crate::Value;

/// A labelled tuple: a label value followed by an ordered list of fields.
///
/// Records order by label and then lexicographically by their fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record {
    label: Box<Value>,
    fields: Vec<Value>,
}

impl Record {
    pub fn new(label: Value, fields: Vec<Value>) -> Self {
        Record {
            label: Box::new(label),
            fields,
        }
    }

    pub fn label(&self) -> &Value {
        &self.label
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Vec<Value> {
        &mut self.fields
    }

    /// The number of fields (the label is not counted).
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn into_parts(self) -> (Value, Vec<Value>) {
        let Record { label, fields } = self;
        (*label, fields)
    }
}

/// A value decorated with an annotation. The annotation takes no part in equality or ordering.
#[derive(Debug, Clone)]
pub struct Annotated {
    annotation: Box<Value>,
    value: Box<Value>,
}

impl Annotated {
    pub fn new(annotation: Value, value: Value) -> Self {
        Annotated {
            annotation: Box::new(annotation),
            value: Box::new(value),
        }
    }

    pub fn annotation(&self) -> &Value {
        &self.annotation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Value, Value) {
        let Annotated { annotation, value } = self;
        (*annotation, *value)
    }
}

/// The surface form of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `# text`
    Line,
    /// `#!text`, only meaningful at the start of a document.
    Shebang,
}

/// A comment attached to the value that follows it. Like annotations, comments are transparent
/// to equality and ordering.
#[derive(Debug, Clone)]
pub struct Comment {
    kind: CommentKind,
    text: String,
    value: Box<Value>,
}

impl Comment {
    pub fn new<S: Into<String>>(kind: CommentKind, text: S, value: Value) -> Self {
        Comment {
            kind,
            text: text.into(),
            value: Box::new(value),
        }
    }

    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (CommentKind, String, Value) {
        let Comment { kind, text, value } = self;
        (kind, text, *value)
    }
}
