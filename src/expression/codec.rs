use std::fmt;
use std::str::FromStr;

use crate::expression::ast::Node;
use crate::expression::deserialize::{deserialize, deserialize_with};
use crate::expression::serialize::{serialize, serialize_with};
use crate::foundation::config::CodecOptions;
use crate::foundation::error::{AstError, AstResult};

/// Tree -> text encoding.
pub fn ast_to_text(tree: &Node) -> AstResult<String> {
    serialize(tree)
}

/// Text encoding -> tree.
pub fn text_to_ast(text: &str) -> AstResult<Node> {
    deserialize(text)
}

/// Rewrite `text` in canonical form (one deserialize/serialize pass).
pub fn normalize(text: &str) -> AstResult<String> {
    normalize_with(text, &CodecOptions::default())
}

pub fn normalize_with(text: &str, opts: &CodecOptions) -> AstResult<String> {
    serialize_with(&deserialize_with(text, opts)?, opts)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serialize(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "<unrepresentable {}>", self.kind()),
        }
    }
}

impl FromStr for Node {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        deserialize(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/codec.rs"]
mod tests;
