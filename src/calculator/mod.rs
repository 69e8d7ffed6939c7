//! Calculator core.
//!
//! This module provides functionality to:
//! - Build an arithmetic expression one key at a time
//! - Evaluate it with `*`/`/` binding tighter than `+`/`-`
//! - Format results for display

mod editor;
mod error;
mod evaluation;
mod formatting;
mod token;

pub use editor::{ExpressionEditor, OperatorAfterResult};
pub use error::{CalcError, MathCause, MathError, NonFinite};
pub use evaluation::{evaluate_expression, strip_trailing_operator};
pub use formatting::{format_grouped, format_result};
pub use token::{Operator, Token, is_operator_char, tokenize};
