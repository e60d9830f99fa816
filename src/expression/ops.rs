//! Operator registry: text tokens <-> operator kinds, one table per arity class.
//!
//! The classes are disjoint, so a token resolves to at most one operator.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{AstError, AstResult};

/// The four disjoint arity classes of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    Unary,
    Binary,
    Bool,
    Compare,
}

/// `(not x)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "not")]
    Not,
}

/// Binary arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

/// Short-circuit boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOperator {
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

/// Single (non-chained) comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtE,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtE,
}

macro_rules! operator_table {
    ($ty:ident, $class:expr, { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl $ty {
            /// Every operator of this class, in registry order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Arity class this operator belongs to.
            pub const CLASS: OperatorClass = $class;

            /// Text token of this operator.
            pub fn token(self) -> &'static str {
                match self {
                    $($ty::$variant => $token),+
                }
            }

            /// Resolve a text token within this class only.
            pub fn from_token(token: &str) -> AstResult<Self> {
                match token {
                    $($token => Ok($ty::$variant),)+
                    _ => Err(AstError::unknown_operator(token)),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.token())
            }
        }
    };
}

operator_table!(UnaryOperator, OperatorClass::Unary, {
    Not => "not",
});

operator_table!(BinaryOperator, OperatorClass::Binary, {
    Add => "+",
    Sub => "-",
    Mul => "*",
    Div => "/",
});

operator_table!(BoolOperator, OperatorClass::Bool, {
    And => "and",
    Or => "or",
});

operator_table!(CompareOperator, OperatorClass::Compare, {
    Eq => "==",
    NotEq => "!=",
    Lt => "<",
    LtE => "<=",
    Gt => ">",
    GtE => ">=",
});

/// Any registered operator, tagged with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Bool(BoolOperator),
    Compare(CompareOperator),
}

impl Operator {
    /// Classify a token across all four classes.
    pub fn lookup(token: &str) -> AstResult<Self> {
        UnaryOperator::from_token(token)
            .map(Self::Unary)
            .or_else(|_| BinaryOperator::from_token(token).map(Self::Binary))
            .or_else(|_| BoolOperator::from_token(token).map(Self::Bool))
            .or_else(|_| CompareOperator::from_token(token).map(Self::Compare))
    }

    /// Every registered operator, class by class.
    pub fn all() -> impl Iterator<Item = Operator> {
        UnaryOperator::ALL
            .iter()
            .copied()
            .map(Self::Unary)
            .chain(BinaryOperator::ALL.iter().copied().map(Self::Binary))
            .chain(BoolOperator::ALL.iter().copied().map(Self::Bool))
            .chain(CompareOperator::ALL.iter().copied().map(Self::Compare))
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Unary(op) => op.token(),
            Self::Binary(op) => op.token(),
            Self::Bool(op) => op.token(),
            Self::Compare(op) => op.token(),
        }
    }

    pub fn class(self) -> OperatorClass {
        match self {
            Self::Unary(_) => UnaryOperator::CLASS,
            Self::Binary(_) => BinaryOperator::CLASS,
            Self::Bool(_) => BoolOperator::CLASS,
            Self::Compare(_) => CompareOperator::CLASS,
        }
    }
}

// Keywords of composite nodes that are not operators.
pub(crate) const LIST: &str = "list";
pub(crate) const ATTR: &str = "attr";
pub(crate) const CALL: &str = "call";
pub(crate) const LAMBDA: &str = "lambda";
pub(crate) const SELECT: &str = "Select";

#[cfg(test)]
#[path = "../../tests/unit/expression/ops.rs"]
mod tests;
