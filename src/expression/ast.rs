use serde::{Deserialize, Serialize};

use crate::expression::ops::{BinaryOperator, BoolOperator, CompareOperator, UnaryOperator};

/// One expression tree node.
///
/// Trees are plain owned values: no sharing, no back-references. `Empty` stands for the absent
/// expression of an empty record and is only valid at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Empty,
    Literal(Literal),
    Identifier(String),
    List(Vec<Node>),
    Attribute {
        base: Box<Node>,
        name: String,
    },
    Call {
        callee: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Node>,
    },
    BinOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Two or more operands joined by the same connective.
    BoolOp {
        op: BoolOperator,
        operands: Vec<Node>,
    },
    Compare {
        op: CompareOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    Lambda(Lambda),
    /// Projection of `source` through a one-parameter `selector`.
    Select {
        source: Box<Node>,
        selector: Lambda,
    },
}

/// Leaf values. Arithmetic negation lives in the sign of `Int`/`Float`.
///
/// In JSON, integers above `i64::MAX` are rejected rather than widened to `Float`. Integers too
/// large even for `u64` already arrive from `serde_json` as floats and read as `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Wide(u64),
            Float(f64),
            Str(String),
            Bool(bool),
            Null,
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Self::Int(v)),
            Repr::Wide(v) => Err(serde::de::Error::custom(format!(
                "integer literal {v} is outside the 64-bit signed range"
            ))),
            Repr::Float(v) => Ok(Self::Float(v)),
            Repr::Str(v) => Ok(Self::Str(v)),
            Repr::Bool(v) => Ok(Self::Bool(v)),
            Repr::Null => Ok(Self::Null),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Box<Node>,
}

impl Lambda {
    pub fn new<I, S>(params: I, body: Node) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }
}

impl Node {
    /// Stable kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Empty => "Empty",
            Node::Literal(_) => "Literal",
            Node::Identifier(_) => "Identifier",
            Node::List(_) => "List",
            Node::Attribute { .. } => "Attribute",
            Node::Call { .. } => "Call",
            Node::UnaryOp { .. } => "UnaryOp",
            Node::BinOp { .. } => "BinOp",
            Node::BoolOp { .. } => "BoolOp",
            Node::Compare { .. } => "Compare",
            Node::Lambda(_) => "Lambda",
            Node::Select { .. } => "Select",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn int(v: i64) -> Self {
        Node::Literal(Literal::Int(v))
    }

    pub fn float(v: f64) -> Self {
        Node::Literal(Literal::Float(v))
    }

    pub fn str(v: impl Into<String>) -> Self {
        Node::Literal(Literal::Str(v.into()))
    }

    pub fn bool(v: bool) -> Self {
        Node::Literal(Literal::Bool(v))
    }

    pub fn null() -> Self {
        Node::Literal(Literal::Null)
    }

    pub fn list(elements: impl IntoIterator<Item = Node>) -> Self {
        Node::List(elements.into_iter().collect())
    }

    pub fn attr(base: Node, name: impl Into<String>) -> Self {
        Node::Attribute {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn call(callee: Node, args: impl IntoIterator<Item = Node>) -> Self {
        Node::Call {
            callee: Box::new(callee),
            args: args.into_iter().collect(),
        }
    }

    pub fn not(operand: Node) -> Self {
        Node::UnaryOp {
            op: UnaryOperator::Not,
            operand: Box::new(operand),
        }
    }

    pub fn bin_op(op: BinaryOperator, left: Node, right: Node) -> Self {
        Node::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn bool_op(op: BoolOperator, operands: impl IntoIterator<Item = Node>) -> Self {
        Node::BoolOp {
            op,
            operands: operands.into_iter().collect(),
        }
    }

    pub fn compare(op: CompareOperator, left: Node, right: Node) -> Self {
        Node::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn lambda<I, S>(params: I, body: Node) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Lambda(Lambda::new(params, body))
    }

    pub fn select(source: Node, selector: Lambda) -> Self {
        Node::Select {
            source: Box::new(source),
            selector,
        }
    }
}

impl From<Literal> for Node {
    fn from(v: Literal) -> Self {
        Node::Literal(v)
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_owned())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Str(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/ast.rs"]
mod tests;
