//! Operator registry: the fixed catalog of unary and binary operator
//! behaviors, including value rules, failure conditions and precedence-based
//! bracketing.

mod catalog;
mod types;

pub use catalog::{ALL_OPERATORS, GROUPING_SYMBOL, operators_for_symbol, symbol_is_known};
pub use types::{OpKind, Operator};
