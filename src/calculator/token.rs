//! Operators and the tokenizer for editor expressions.

use super::error::CalcError;

/// One of the four supported binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn binds_tight(self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

/// Check whether `c` is one of the operator characters.
pub fn is_operator_char(c: char) -> bool {
    Operator::from_char(c).is_some()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
}

/// Split `input` into alternating numbers and operators.
///
/// A single leading `-` is folded into the first number. The result always
/// starts and ends with a number.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let (negate, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let mut tokens = Vec::new();
    let mut segment_start = 0;

    for (idx, c) in body.char_indices() {
        if let Some(op) = Operator::from_char(c) {
            tokens.push(Token::Number(parse_number(&body[segment_start..idx])?));
            tokens.push(Token::Op(op));
            segment_start = idx + c.len_utf8();
        }
    }
    tokens.push(Token::Number(parse_number(&body[segment_start..])?));

    if negate && let Some(Token::Number(first)) = tokens.first_mut() {
        *first = -*first;
    }

    Ok(tokens)
}

/// Parse one number segment: digits with at most one decimal point.
fn parse_number(segment: &str) -> Result<f64, CalcError> {
    if segment.is_empty() {
        return Err(CalcError::syntax("missing operand"));
    }

    let mut digits = 0;
    let mut points = 0;
    for c in segment.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            other => return Err(CalcError::syntax(format!("unexpected character '{other}'"))),
        }
    }

    if points > 1 {
        return Err(CalcError::syntax(format!("more than one decimal point in '{segment}'")));
    }
    if digits == 0 {
        return Err(CalcError::syntax("decimal point without digits"));
    }

    segment
        .parse::<f64>()
        .map_err(|e| CalcError::syntax(format!("bad number '{segment}': {e}")))
}
