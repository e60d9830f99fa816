use std::fmt;

/// Result alias used throughout the crate.
pub type AstResult<T> = Result<T, AstError>;

/// Required field count of a composite node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` fields.
    Exactly(usize),
    /// `n` or more fields.
    AtLeast(usize),
}

impl Arity {
    /// Return `true` when `found` fields satisfy this arity.
    pub fn accepts(self, found: usize) -> bool {
        match self {
            Self::Exactly(n) => found == n,
            Self::AtLeast(n) => found >= n,
        }
    }

    /// `ArityMismatch` for `node` unless `found` fields satisfy this arity.
    pub(crate) fn check(self, node: &str, found: usize) -> AstResult<()> {
        if self.accepts(found) {
            Ok(())
        } else {
            Err(AstError::arity(node, self, found))
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Every failure the codec can report. All of them are terminal for the call.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AstError {
    /// Input text violates the grammar.
    #[error("malformed text: {0}")]
    MalformedText(String),

    /// A record holds more than one top-level expression.
    #[error("a record must contain zero or one expressions; found {0}")]
    MalformedRecord(usize),

    /// Composite keyword is neither structural nor a registered operator.
    #[error("unknown composite node type: {0}")]
    UnknownOperator(String),

    /// Wrong number of fields for a keyword.
    #[error("{node} node must have {expected} field(s); found {found}")]
    ArityMismatch {
        /// Keyword of the offending node.
        node: String,
        /// Arity the keyword requires.
        expected: Arity,
        /// Number of fields present.
        found: usize,
    },

    /// A field has the wrong node kind for its position.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The serializer cannot emit this node kind.
    #[error("unsupported node type: {0}")]
    UnsupportedNodeType(String),

    /// Identifier text that cannot be re-read as the same identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Literal value with no spelling in the atom grammar.
    #[error("literal cannot be represented in text: {0}")]
    UnrepresentableLiteral(String),

    /// Tree or text nests deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
}

/// Field-less discriminant of [`AstError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedText,
    MalformedRecord,
    UnknownOperator,
    ArityMismatch,
    TypeMismatch,
    UnsupportedNodeType,
    InvalidIdentifier,
    UnrepresentableLiteral,
    NestingTooDeep,
}

impl AstError {
    pub fn malformed_text(msg: impl Into<String>) -> Self {
        Self::MalformedText(msg.into())
    }

    pub fn unknown_operator(keyword: impl Into<String>) -> Self {
        Self::UnknownOperator(keyword.into())
    }

    pub fn arity(node: impl Into<String>, expected: Arity, found: usize) -> Self {
        Self::ArityMismatch {
            node: node.into(),
            expected,
            found,
        }
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Stable discriminant, handy for matching without caring about payloads.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedText(_) => ErrorKind::MalformedText,
            Self::MalformedRecord(_) => ErrorKind::MalformedRecord,
            Self::UnknownOperator(_) => ErrorKind::UnknownOperator,
            Self::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::UnsupportedNodeType(_) => ErrorKind::UnsupportedNodeType,
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Self::UnrepresentableLiteral(_) => ErrorKind::UnrepresentableLiteral,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
