//! Tree -> text. Pre-order emission into a single buffer.

use crate::expression::ast::{Lambda, Node};
use crate::expression::atom::{check_identifier, write_literal, write_quoted};
use crate::expression::ops::{ATTR, CALL, LAMBDA, LIST, SELECT};
use crate::foundation::config::CodecOptions;
use crate::foundation::error::{Arity, AstError, AstResult};

/// Render `node` with default options. [`Node::Empty`] renders as the empty record `""`.
pub fn serialize(node: &Node) -> AstResult<String> {
    serialize_with(node, &CodecOptions::default())
}

#[tracing::instrument(level = "trace", skip(node, opts), fields(kind = node.kind()))]
pub fn serialize_with(node: &Node, opts: &CodecOptions) -> AstResult<String> {
    if node.is_empty() {
        return Ok(String::new());
    }
    let mut emitter = Emitter {
        out: String::new(),
        max_depth: opts.max_depth,
    };
    match emitter.node(node, 0) {
        Ok(()) => Ok(emitter.out),
        Err(e) => {
            tracing::debug!(error = %e, "tree cannot be serialized");
            Err(e)
        }
    }
}

struct Emitter {
    out: String,
    max_depth: usize,
}

impl Emitter {
    /// `depth` counts the composites already open around `node`.
    fn node(&mut self, node: &Node, depth: usize) -> AstResult<()> {
        match node {
            Node::Empty => Err(AstError::UnsupportedNodeType(node.kind().to_owned())),
            Node::Literal(lit) => write_literal(&mut self.out, lit),
            Node::Identifier(name) => {
                check_identifier(name)?;
                self.out.push_str(name);
                Ok(())
            }
            Node::List(elements) => {
                let inner = self.open(LIST, depth)?;
                self.fields(elements, inner)?;
                self.close();
                Ok(())
            }
            Node::Attribute { base, name } => {
                let inner = self.open(ATTR, depth)?;
                self.field(base, inner)?;
                self.out.push(' ');
                write_quoted(&mut self.out, name);
                self.close();
                Ok(())
            }
            Node::Call { callee, args } => {
                let inner = self.open(CALL, depth)?;
                self.field(callee, inner)?;
                self.fields(args, inner)?;
                self.close();
                Ok(())
            }
            Node::UnaryOp { op, operand } => {
                let inner = self.open(op.token(), depth)?;
                self.field(operand, inner)?;
                self.close();
                Ok(())
            }
            Node::BinOp { op, left, right } => self.binary(op.token(), left, right, depth),
            Node::Compare { op, left, right } => self.binary(op.token(), left, right, depth),
            Node::BoolOp { op, operands } => self.bool_chain(op.token(), operands, depth),
            Node::Lambda(lambda) => self.lambda(lambda, depth),
            Node::Select { source, selector } => {
                if selector.params.len() != 1 {
                    return Err(AstError::type_mismatch(format!(
                        "Select selector must have exactly one parameter; found {}",
                        selector.params.len()
                    )));
                }
                let inner = self.open(SELECT, depth)?;
                self.field(source, inner)?;
                self.out.push(' ');
                self.lambda(selector, inner)?;
                self.close();
                Ok(())
            }
        }
    }

    fn open(&mut self, keyword: &str, depth: usize) -> AstResult<usize> {
        let inner = depth + 1;
        if inner > self.max_depth {
            return Err(AstError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.out.push('(');
        self.out.push_str(keyword);
        Ok(inner)
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn field(&mut self, node: &Node, depth: usize) -> AstResult<()> {
        self.out.push(' ');
        self.node(node, depth)
    }

    fn fields(&mut self, nodes: &[Node], depth: usize) -> AstResult<()> {
        for n in nodes {
            self.field(n, depth)?;
        }
        Ok(())
    }

    fn binary(&mut self, token: &str, left: &Node, right: &Node, depth: usize) -> AstResult<()> {
        let inner = self.open(token, depth)?;
        self.field(left, inner)?;
        self.field(right, inner)?;
        self.close();
        Ok(())
    }

    /// `a and b and c` becomes `(and (and a b) c)`.
    fn bool_chain(&mut self, token: &str, operands: &[Node], depth: usize) -> AstResult<()> {
        let [first, rest @ ..] = operands else {
            return Err(AstError::arity(token, Arity::AtLeast(2), 0));
        };
        if rest.is_empty() {
            return Err(AstError::arity(token, Arity::AtLeast(2), 1));
        }

        // Innermost composite is opened last; its first operand sits under all of them.
        let mut inner = depth;
        for i in 0..rest.len() {
            if i > 0 {
                self.out.push(' ');
            }
            inner = self.open(token, inner)?;
        }
        self.field(first, inner)?;
        for operand in rest {
            self.field(operand, inner)?;
            self.close();
            inner -= 1;
        }
        Ok(())
    }

    fn lambda(&mut self, lambda: &Lambda, depth: usize) -> AstResult<()> {
        let inner = self.open(LAMBDA, depth)?;
        self.out.push(' ');
        self.open(LIST, inner)?;
        for p in &lambda.params {
            check_identifier(p)?;
            self.out.push(' ');
            self.out.push_str(p);
        }
        self.close();
        self.field(&lambda.body, inner)?;
        self.close();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/serialize.rs"]
mod tests;
