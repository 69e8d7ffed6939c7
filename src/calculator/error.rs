//! Evaluation errors.

use std::fmt;
use thiserror::Error;

/// Why an expression could not be turned into a number.
///
/// Every variant is recoverable: the editor keeps its state untouched when
/// evaluation fails and the caller decides how to present the failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Evaluate was requested with nothing typed.
    #[error("nothing to evaluate")]
    EmptyExpression,

    /// The expression is not a well-formed token sequence.
    #[error("malformed expression: {0}")]
    Syntax(String),

    /// The arithmetic produced a value that is not a finite number.
    #[error("{0}")]
    Math(MathError),
}

impl CalcError {
    pub(crate) fn syntax(reason: impl Into<String>) -> Self {
        Self::Syntax(reason.into())
    }

    /// Short label suitable for a narrow display.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::EmptyExpression => "empty",
            Self::Syntax(_) => "syntax",
            Self::Math(err) => match (err.kind, err.cause) {
                (NonFinite::NotANumber, _) => "not a number",
                (_, MathCause::DivisionByZero) => "division by zero",
                (_, MathCause::Overflow) => "overflow",
            },
        }
    }
}

/// What went wrong in a non-finite evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MathError {
    pub kind: NonFinite,
    pub cause: MathCause,
}

impl MathError {
    pub fn new(kind: NonFinite, cause: MathCause) -> Self {
        Self { kind, cause }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// Where a non-finite value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathCause {
    /// Some division had a zero divisor.
    DivisionByZero,
    /// A number or intermediate value exceeded the `f64` range.
    Overflow,
}

/// The kind of non-finite value an evaluation ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NonFinite {
    PositiveInfinity,
    NegativeInfinity,
    NotANumber,
}

impl NonFinite {
    /// Classify `value`, returning `None` for finite numbers.
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::NotANumber)
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                Some(Self::PositiveInfinity)
            } else {
                Some(Self::NegativeInfinity)
            }
        } else {
            None
        }
    }
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::PositiveInfinity => "Infinity",
            Self::NegativeInfinity => "-Infinity",
            Self::NotANumber => "Not a Number",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(NonFinite::classify(1.5), None);
        assert_eq!(NonFinite::classify(f64::INFINITY), Some(NonFinite::PositiveInfinity));
        assert_eq!(NonFinite::classify(f64::NEG_INFINITY), Some(NonFinite::NegativeInfinity));
        assert_eq!(NonFinite::classify(f64::NAN), Some(NonFinite::NotANumber));
    }

    #[test]
    fn test_messages() {
        let err = CalcError::Math(MathError::new(
            NonFinite::NegativeInfinity,
            MathCause::DivisionByZero,
        ));
        assert_eq!(err.to_string(), "-Infinity");
        assert_eq!(CalcError::EmptyExpression.to_string(), "nothing to evaluate");
        assert_eq!(
            CalcError::syntax("empty operand").to_string(),
            "malformed expression: empty operand"
        );
    }

    #[test]
    fn test_short_labels() {
        let label = |kind, cause| CalcError::Math(MathError::new(kind, cause)).short_label();
        assert_eq!(
            label(NonFinite::PositiveInfinity, MathCause::DivisionByZero),
            "division by zero"
        );
        assert_eq!(label(NonFinite::PositiveInfinity, MathCause::Overflow), "overflow");
        assert_eq!(label(NonFinite::NotANumber, MathCause::DivisionByZero), "not a number");
        assert_eq!(CalcError::EmptyExpression.short_label(), "empty");
    }
}
