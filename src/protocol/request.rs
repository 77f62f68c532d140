//! Request line parsing and arithmetic operations

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a request line produced `ERROR`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// Line did not split into exactly three tokens
    #[error("invalid format: expected 3 tokens, got {0}")]
    InvalidFormat(usize),

    /// An operand was not a signed 32-bit integer
    #[error("invalid integer argument: {0:?}")]
    InvalidInteger(String),

    /// Operation tag was not one of ADD, SUB, MUL, DIV
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// DIV with a zero divisor
    #[error("division by zero")]
    DivisionByZero,
}

/// Arithmetic operation tag
///
/// Tags are matched case-sensitively: `add` is an unknown operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    /// Every operation, in wire-tag order
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Wire tag for this operation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
        }
    }

    /// Apply the operation in 64-bit arithmetic
    ///
    /// Any pair of `i32` operands fits: the widest result is
    /// `i32::MIN * i32::MIN = 2^62`. Division truncates toward zero.
    pub fn apply(self, lhs: i32, rhs: i32) -> Result<i64, EvalError> {
        let (lhs, rhs) = (i64::from(lhs), i64::from(rhs));
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Sub => Ok(lhs - rhs),
            Self::Mul => Ok(lhs * rhs),
            Self::Div if rhs == 0 => Err(EvalError::DivisionByZero),
            Self::Div => Ok(lhs / rhs),
        }
    }
}

impl FromStr for Operation {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Self::Add),
            "SUB" => Ok(Self::Sub),
            "MUL" => Ok(Self::Mul),
            "DIV" => Ok(Self::Div),
            other => Err(EvalError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request line split into its operation tag and two integer operands
///
/// The tag is kept raw: operands are validated before the tag, so
/// `FOO x 1` is an integer error while `FOO 1 2` is an unknown operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub tag: &'a str,
    pub lhs: i32,
    pub rhs: i32,
}

impl<'a> Request<'a> {
    /// Split a line into exactly three whitespace-separated tokens and parse the operands
    ///
    /// Trailing whitespace is ignored, but leading whitespace yields an empty
    /// first token, so ` ADD 1 2` has four tokens and is rejected.
    pub fn parse(line: &'a str) -> Result<Self, EvalError> {
        let leading_empty = line.starts_with(char::is_whitespace) && !line.trim().is_empty();
        let tokens = move || {
            std::iter::once("")
                .filter(move |_| leading_empty)
                .chain(line.split_whitespace())
        };

        let mut iter = tokens();
        let (Some(tag), Some(lhs), Some(rhs), None) =
            (iter.next(), iter.next(), iter.next(), iter.next())
        else {
            return Err(EvalError::InvalidFormat(tokens().count()));
        };

        Ok(Self {
            tag,
            lhs: parse_operand(lhs)?,
            rhs: parse_operand(rhs)?,
        })
    }

    /// Resolve the raw tag into an [`Operation`]
    pub fn operation(&self) -> Result<Operation, EvalError> {
        self.tag.parse()
    }
}

fn parse_operand(token: &str) -> Result<i32, EvalError> {
    token
        .parse::<i32>()
        .map_err(|_| EvalError::InvalidInteger(token.to_string()))
}
