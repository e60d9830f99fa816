//! Bidirectional converter between expression trees and their parenthesized-prefix text
//! encoding.
//!
//! ```text
//! (Select events (lambda (list e) (and (> (attr e 'pt') 20.0) (not (attr e 'isFake')))))
//! ```
//!
//! - [`serialize`] walks a [`Node`] tree and emits canonical text.
//! - [`deserialize`] parses text with the grammar in `syntax.pest` and rebuilds the tree,
//!   checking arity and field kinds per composite keyword.
//!
//! Both directions are pure and share only the read-only operator registry, so they can run on
//! any number of threads at once.
#![forbid(unsafe_code)]

mod expression;
mod foundation;

pub use expression::ast::{Lambda, Literal, Node};
pub use expression::codec::{ast_to_text, normalize, normalize_with, text_to_ast};
pub use expression::deserialize::{deserialize, deserialize_with};
pub use expression::ops::{
    BinaryOperator, BoolOperator, CompareOperator, Operator, OperatorClass, UnaryOperator,
};
pub use expression::serialize::{serialize, serialize_with};
pub use foundation::config::{CodecOptions, DEFAULT_MAX_DEPTH};
pub use foundation::error::{Arity, AstError, AstResult, ErrorKind};
