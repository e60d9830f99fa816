pub(crate) mod ast;
pub(crate) mod atom;
pub(crate) mod codec;
pub(crate) mod deserialize;
pub(crate) mod grammar;
pub(crate) mod ops;
pub(crate) mod serialize;
