//! Expression evaluation.
//!
//! Expressions are evaluated in two passes over the token list: the first
//! folds `*` and `/` into their left operand, the second folds `+` and `-`
//! left to right. All arithmetic is plain IEEE-754 `f64`.

use super::error::{CalcError, MathCause, MathError, NonFinite};
use super::token::{Operator, Token, is_operator_char, tokenize};

/// Remove exactly one trailing operator character, if present.
pub fn strip_trailing_operator(input: &str) -> &str {
    match input.chars().last() {
        Some(c) if is_operator_char(c) => &input[..input.len() - c.len_utf8()],
        _ => input,
    }
}

/// Evaluate an editor expression.
///
/// A dangling operator is tolerated (`"5+"` evaluates as `"5"`). Fails with
/// [`CalcError::EmptyExpression`] for empty input, [`CalcError::Syntax`] for
/// malformed input and [`CalcError::Math`] when the value is not finite.
pub fn evaluate_expression(input: &str) -> Result<f64, CalcError> {
    if input.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let stripped = strip_trailing_operator(input);
    if stripped.is_empty() {
        return Err(CalcError::syntax("no operand"));
    }

    let tokens = tokenize(stripped)?;
    let reduced = reduce(&tokens)?;

    match NonFinite::classify(reduced.value) {
        Some(kind) => {
            let cause = if reduced.divided_by_zero {
                MathCause::DivisionByZero
            } else {
                MathCause::Overflow
            };
            Err(CalcError::Math(MathError::new(kind, cause)))
        }
        None => Ok(reduced.value),
    }
}

struct Reduced {
    value: f64,
    divided_by_zero: bool,
}

fn reduce(tokens: &[Token]) -> Result<Reduced, CalcError> {
    let mut iter = tokens.iter();
    let first = match iter.next() {
        Some(Token::Number(n)) => *n,
        _ => return Err(CalcError::syntax("expected a number")),
    };

    // First pass: collapse tight-binding operators into terms.
    let mut terms: Vec<(Operator, f64)> = Vec::new();
    let mut current = first;
    let mut pending_loose = Operator::Add;
    let mut divided_by_zero = false;

    while let Some(token) = iter.next() {
        let op = match token {
            Token::Op(op) => *op,
            Token::Number(_) => return Err(CalcError::syntax("expected an operator")),
        };
        let rhs = match iter.next() {
            Some(Token::Number(n)) => *n,
            _ => return Err(CalcError::syntax("missing operand")),
        };

        if op == Operator::Divide && rhs == 0.0 {
            divided_by_zero = true;
        }

        if op.binds_tight() {
            current = op.apply(current, rhs);
        } else {
            terms.push((pending_loose, current));
            pending_loose = op;
            current = rhs;
        }
    }
    terms.push((pending_loose, current));

    // Second pass: sum terms left to right.
    let value = terms
        .into_iter()
        .fold(0.0, |acc, (op, term)| op.apply(acc, term));

    Ok(Reduced {
        value,
        divided_by_zero,
    })
}
