//! Text -> tree. The grammar engine produces a parse tree; this module reduces it bottom-up.

use std::collections::HashMap;
use std::sync::LazyLock;

use pest::iterators::Pair;

use crate::expression::ast::{Lambda, Literal, Node};
use crate::expression::atom::{check_identifier, parse_numeric, reserved_constant, unquote};
use crate::expression::grammar::{Rule, nesting_depth, parse_record};
use crate::expression::ops::{ATTR, CALL, LAMBDA, LIST, Operator, SELECT};
use crate::foundation::config::CodecOptions;
use crate::foundation::error::{Arity, AstError, AstResult};

/// How a composite keyword turns its fields into a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconstruct {
    List,
    Attr,
    Call,
    Lambda,
    Select,
    Op(Operator),
}

/// Keyword -> reconstruction rule. Every registry token gets an entry automatically.
static KEYWORDS: LazyLock<HashMap<&'static str, Reconstruct>> = LazyLock::new(|| {
    let mut table = HashMap::from([
        (LIST, Reconstruct::List),
        (ATTR, Reconstruct::Attr),
        (CALL, Reconstruct::Call),
        (LAMBDA, Reconstruct::Lambda),
        (SELECT, Reconstruct::Select),
    ]);
    for op in Operator::all() {
        table.insert(op.token(), Reconstruct::Op(op));
    }
    table
});

/// Parse one record with default options. An empty record yields [`Node::Empty`].
pub fn deserialize(text: &str) -> AstResult<Node> {
    deserialize_with(text, &CodecOptions::default())
}

#[tracing::instrument(level = "trace", skip(text, opts), fields(len = text.len()))]
pub fn deserialize_with(text: &str, opts: &CodecOptions) -> AstResult<Node> {
    let depth = nesting_depth(text);
    if depth > opts.max_depth {
        tracing::debug!(depth, limit = opts.max_depth, "rejecting deeply nested record");
        return Err(AstError::NestingTooDeep {
            limit: opts.max_depth,
        });
    }

    let record = parse_record(text)?;
    let mut exprs: Vec<_> = record
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .collect();
    match exprs.pop() {
        None => Ok(Node::Empty),
        Some(only) if exprs.is_empty() => build(only),
        Some(_) => Err(AstError::MalformedRecord(exprs.len() + 1)),
    }
}

fn build(pair: Pair<'_, Rule>) -> AstResult<Node> {
    match pair.as_rule() {
        Rule::identifier => {
            let text = pair.as_str();
            Ok(match reserved_constant(text) {
                Some(lit) => Node::Literal(lit),
                None => Node::Identifier(text.to_owned()),
            })
        }
        Rule::string_literal => Ok(Node::Literal(Literal::Str(unquote(pair.as_str())?))),
        Rule::numeric_literal => Ok(Node::Literal(parse_numeric(pair.as_str())?)),
        Rule::composite => {
            let mut inner = pair.into_inner();
            let keyword = inner
                .next()
                .filter(|p| p.as_rule() == Rule::node_type)
                .ok_or_else(|| AstError::malformed_text("composite node without a type"))?
                .as_str();
            let mut fields = Vec::new();
            if keyword == LAMBDA {
                if let Some(params) = inner.next() {
                    fields.push(build_params(params)?);
                }
            }
            for field in inner {
                fields.push(build(field)?);
            }
            reconstruct(keyword, fields)
        }
        other => Err(AstError::malformed_text(format!(
            "unexpected grammar production {other:?}"
        ))),
    }
}

/// Lambda parameters are canonically `(list x y)`; the bare form `(x y)` reads as the same list.
fn build_params(pair: Pair<'_, Rule>) -> AstResult<Node> {
    if pair.as_rule() == Rule::composite {
        let mut inner = pair.clone().into_inner();
        if let Some(head) = inner.next().map(|p| p.as_str()) {
            let is_name = |s: &str| check_identifier(s).is_ok() && !KEYWORDS.contains_key(s);
            if is_name(head)
                && inner
                    .clone()
                    .all(|p| p.as_rule() == Rule::identifier && is_name(p.as_str()))
            {
                let names = std::iter::once(head).chain(inner.map(|p| p.as_str()));
                return Ok(Node::List(names.map(Node::ident).collect()));
            }
        }
    }
    build(pair)
}

fn reconstruct(keyword: &str, fields: Vec<Node>) -> AstResult<Node> {
    let rule = KEYWORDS
        .get(keyword)
        .copied()
        .ok_or_else(|| AstError::unknown_operator(keyword))?;

    match rule {
        Reconstruct::List => Ok(Node::List(fields)),
        Reconstruct::Attr => {
            let [base, name] = exactly::<2>(keyword, fields)?;
            match name {
                Node::Literal(Literal::Str(name)) => Ok(Node::Attribute {
                    base: Box::new(base),
                    name,
                }),
                other => Err(AstError::type_mismatch(format!(
                    "attribute name must be a string literal; found {}",
                    other.kind()
                ))),
            }
        }
        Reconstruct::Call => {
            Arity::AtLeast(1).check(keyword, fields.len())?;
            let mut args = fields;
            let callee = args.remove(0);
            Ok(Node::Call {
                callee: Box::new(callee),
                args,
            })
        }
        Reconstruct::Op(Operator::Unary(op)) => {
            let [operand] = exactly::<1>(keyword, fields)?;
            Ok(Node::UnaryOp {
                op,
                operand: Box::new(operand),
            })
        }
        Reconstruct::Op(Operator::Binary(op)) => {
            let [left, right] = exactly::<2>(keyword, fields)?;
            Ok(Node::BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        Reconstruct::Op(Operator::Bool(op)) => {
            let operands = exactly::<2>(keyword, fields)?;
            Ok(Node::BoolOp {
                op,
                operands: operands.into(),
            })
        }
        Reconstruct::Op(Operator::Compare(op)) => {
            let [left, right] = exactly::<2>(keyword, fields)?;
            Ok(Node::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        Reconstruct::Lambda => {
            let [params, body] = exactly::<2>(keyword, fields)?;
            Ok(Node::Lambda(Lambda {
                params: lambda_params(params)?,
                body: Box::new(body),
            }))
        }
        Reconstruct::Select => {
            let [source, selector] = exactly::<2>(keyword, fields)?;
            match selector {
                Node::Lambda(selector) if selector.params.len() == 1 => Ok(Node::Select {
                    source: Box::new(source),
                    selector,
                }),
                Node::Lambda(selector) => Err(AstError::type_mismatch(format!(
                    "Select selector must have exactly one parameter; found {}",
                    selector.params.len()
                ))),
                other => Err(AstError::type_mismatch(format!(
                    "Select selector must be a lambda; found {}",
                    other.kind()
                ))),
            }
        }
    }
}

fn exactly<const N: usize>(keyword: &str, fields: Vec<Node>) -> AstResult<[Node; N]> {
    let arity = Arity::Exactly(N);
    arity.check(keyword, fields.len())?;
    <[Node; N]>::try_from(fields).map_err(|rest| AstError::arity(keyword, arity, rest.len()))
}

fn lambda_params(params: Node) -> AstResult<Vec<String>> {
    let elements = match params {
        Node::List(elements) => elements,
        other => {
            return Err(AstError::type_mismatch(format!(
                "lambda parameters must be in a list; found {}",
                other.kind()
            )));
        }
    };
    elements
        .into_iter()
        .map(|p| match p {
            Node::Identifier(name) => Ok(name),
            other => Err(AstError::type_mismatch(format!(
                "lambda parameters must be variable names; found {}",
                other.kind()
            ))),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/expression/deserialize.rs"]
mod tests;
