//! Grammar engine glue: the text encoding is described in `syntax.pest` and parsed by pest.

use pest::Parser as _;
use pest::error::LineColLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::foundation::error::{AstError, AstResult};

#[derive(Parser)]
#[grammar = "expression/syntax.pest"]
pub(crate) struct SyntaxParser;

/// Parse `text` into the `record` pair. Any lexical or structural violation is `MalformedText`.
pub(crate) fn parse_record(text: &str) -> AstResult<Pair<'_, Rule>> {
    let mut pairs = SyntaxParser::parse(Rule::record, text).map_err(|e| {
        let (line, col) = match e.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        AstError::malformed_text(format!("{line}:{col}: {}", e.variant.message()))
    })?;
    pairs
        .next()
        .ok_or_else(|| AstError::malformed_text("input produced no record"))
}

/// Deepest parenthesis nesting of `text`, ignoring parentheses inside string literals.
///
/// Runs before the grammar engine so pathological nesting is rejected without recursing.
pub(crate) fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' => {
                    depth += 1;
                    max = max.max(depth);
                }
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }
    max
}

#[cfg(test)]
#[path = "../../tests/unit/expression/grammar.rs"]
mod tests;
