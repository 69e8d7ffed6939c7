//! The expression editor state machine.
//!
//! [`ExpressionEditor`] holds the expression being typed and the most recent
//! result. Every mutation keeps the expression syntactically plausible:
//! operators never stack up, a number segment never holds two decimal points
//! and only `-` may open an expression.

use serde::Deserialize;

use super::error::CalcError;
use super::evaluation::evaluate_expression;
use super::formatting::format_result;
use super::token::{Operator, is_operator_char};

/// What an operator key does while a result is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorAfterResult {
    /// Seed a new expression with the result and apply the operator to it.
    #[default]
    Continue,
    /// Ignore the result, as if nothing had been typed (only `-` is taken).
    Discard,
}

#[derive(Clone, Debug, Default)]
pub struct ExpressionEditor {
    expression: String,
    last_result: Option<f64>,
    after_result: OperatorAfterResult,
}

impl ExpressionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(after_result: OperatorAfterResult) -> Self {
        Self {
            after_result,
            ..Self::default()
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn policy(&self) -> OperatorAfterResult {
        self.after_result
    }

    /// Append a digit, starting fresh if a result is showing.
    ///
    /// Characters other than `'0'..='9'` are ignored.
    pub fn append_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        self.fresh_start();
        self.expression.push(digit);
    }

    /// Append a decimal point to the current number segment.
    ///
    /// A second point in the same segment is ignored. An empty segment gets a
    /// leading zero so it reads `0.`.
    pub fn append_decimal_point(&mut self) {
        self.fresh_start();

        let segment = self.current_segment();
        if segment.contains('.') {
            return;
        }
        if segment.is_empty() {
            self.expression.push('0');
        }
        self.expression.push('.');
    }

    pub fn append_operator(&mut self, op: Operator) {
        if self.expression.is_empty()
            && let Some(result) = self.last_result
        {
            match self.after_result {
                OperatorAfterResult::Continue => {
                    self.expression = format_result(result);
                    self.last_result = None;
                }
                OperatorAfterResult::Discard => {
                    if op == Operator::Subtract {
                        self.last_result = None;
                    }
                }
            }
        }

        if self.expression.is_empty() {
            if op == Operator::Subtract {
                self.expression.push(op.symbol());
            }
            return;
        }

        // A lone unary minus can't become a binary operator.
        if self.expression == "-" {
            return;
        }

        if self.ends_with_operator() {
            self.expression.pop();
        }
        self.expression.push(op.symbol());
    }

    /// Empty the expression, keeping the last result.
    pub fn clear_entry(&mut self) {
        self.expression.clear();
    }

    /// Empty the expression and forget the last result.
    pub fn all_clear(&mut self) {
        self.expression.clear();
        self.last_result = None;
    }

    pub fn backspace(&mut self) {
        self.expression.pop();
    }

    /// Evaluate the expression.
    ///
    /// On success the value becomes the last result and the expression is
    /// emptied. On failure nothing changes.
    pub fn evaluate(&mut self) -> Result<f64, CalcError> {
        let value = evaluate_expression(&self.expression)?;
        self.expression.clear();
        self.last_result = Some(value);
        Ok(value)
    }

    /// The text a display should show for the current state.
    pub fn current_display_value(&self) -> String {
        if !self.expression.is_empty() {
            self.expression.clone()
        } else if let Some(result) = self.last_result {
            format_result(result)
        } else {
            "0".to_string()
        }
    }

    fn fresh_start(&mut self) {
        if self.last_result.take().is_some() {
            self.expression.clear();
        }
    }

    fn ends_with_operator(&self) -> bool {
        self.expression.chars().last().is_some_and(is_operator_char)
    }

    /// The text after the last operator, or the whole expression.
    fn current_segment(&self) -> &str {
        match self.expression.rfind(is_operator_char) {
            Some(idx) => &self.expression[idx + 1..],
            None => &self.expression,
        }
    }
}
