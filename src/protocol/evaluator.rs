//! Pure request evaluation

use super::ERROR_RESPONSE;
use super::request::{EvalError, Operation, Request};

/// Outcome of evaluating one request line
///
/// `operation` is set whenever a known operation was attempted, including a
/// DIV that then failed on a zero divisor. Callers count the attempted
/// operation first and the error second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub operation: Option<Operation>,
    pub outcome: Result<i64, EvalError>,
}

impl Evaluation {
    fn rejected(error: EvalError) -> Self {
        Self {
            operation: None,
            outcome: Err(error),
        }
    }

    /// Result value if the request succeeded
    #[must_use]
    #[inline]
    pub fn value(&self) -> Option<i64> {
        self.outcome.as_ref().ok().copied()
    }

    /// Error if the request failed
    #[must_use]
    #[inline]
    pub fn error(&self) -> Option<&EvalError> {
        self.outcome.as_ref().err()
    }

    /// The response line for this outcome, `\n`-terminated
    #[must_use]
    pub fn response_line(&self) -> String {
        match self.outcome {
            Ok(value) => format!("{}\n", value),
            Err(_) => format!("{}\n", ERROR_RESPONSE),
        }
    }
}

/// Evaluate a single request line
///
/// Checks run in order: token count, operands, operation tag, divisor.
///
/// # Examples
/// ```
/// use ccs::protocol::{Operation, evaluate};
///
/// let evaluation = evaluate("ADD 5 3");
/// assert_eq!(evaluation.value(), Some(8));
/// assert_eq!(evaluation.operation, Some(Operation::Add));
///
/// let failed = evaluate("DIV 10 0");
/// assert_eq!(failed.response_line(), "ERROR\n");
/// assert_eq!(failed.operation, Some(Operation::Div));
/// ```
#[must_use]
pub fn evaluate(line: &str) -> Evaluation {
    let request = match Request::parse(line) {
        Ok(request) => request,
        Err(e) => return Evaluation::rejected(e),
    };

    let operation = match request.operation() {
        Ok(operation) => operation,
        Err(e) => return Evaluation::rejected(e),
    };

    Evaluation {
        operation: Some(operation),
        outcome: operation.apply(request.lhs, request.rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let evaluation = evaluate("ADD 5 3");
        assert_eq!(evaluation.value(), Some(8));
        assert_eq!(evaluation.operation, Some(Operation::Add));
        assert_eq!(evaluation.response_line(), "8\n");
    }

    #[test]
    fn test_sub_negative_result() {
        assert_eq!(evaluate("SUB 3 5").response_line(), "-2\n");
    }

    #[test]
    fn test_mul_negatives() {
        assert_eq!(evaluate("MUL -10 -10").response_line(), "100\n");
    }

    #[test]
    fn test_div_truncation() {
        assert_eq!(evaluate("DIV -7 2").value(), Some(-3));
    }

    #[test]
    fn test_div_by_zero_keeps_operation() {
        let evaluation = evaluate("DIV 10 0");
        assert_eq!(evaluation.operation, Some(Operation::Div));
        assert_eq!(evaluation.error(), Some(&EvalError::DivisionByZero));
        assert_eq!(evaluation.response_line(), "ERROR\n");
    }

    #[test]
    fn test_unknown_operation_has_no_operation() {
        let evaluation = evaluate("FOO 1 2");
        assert_eq!(evaluation.operation, None);
        assert_eq!(
            evaluation.error(),
            Some(&EvalError::UnknownOperation("FOO".to_string()))
        );
        assert_eq!(evaluation.response_line(), "ERROR\n");
    }

    #[test]
    fn test_bad_format_has_no_operation() {
        for line in ["", "ADD", "ADD 1", "ADD 1 2 3", "   "] {
            let evaluation = evaluate(line);
            assert_eq!(evaluation.operation, None, "line {:?}", line);
            assert!(matches!(
                evaluation.error(),
                Some(EvalError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn test_bad_integer_has_no_operation() {
        let evaluation = evaluate("ADD one 2");
        assert_eq!(evaluation.operation, None);
        assert!(matches!(
            evaluation.error(),
            Some(EvalError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_lowercase_tag_rejected() {
        assert_eq!(evaluate("add 1 2").response_line(), "ERROR\n");
    }

    #[test]
    fn test_leading_whitespace_rejected() {
        for line in [" ADD 1 2", "\tMUL 2 3", "  DIV 10 0"] {
            let evaluation = evaluate(line);
            assert_eq!(evaluation.response_line(), "ERROR\n", "line {:?}", line);
            assert_eq!(evaluation.operation, None, "line {:?}", line);
        }
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        assert_eq!(evaluate("ADD 1 2 ").value(), Some(3));
        assert_eq!(evaluate("MUL 2 3\t\t").value(), Some(6));
    }

    #[test]
    fn test_crlf_terminated_line() {
        assert_eq!(evaluate("ADD 1 2\r\n").value(), Some(3));
    }

    #[test]
    fn test_extreme_operands() {
        assert_eq!(
            evaluate("MUL -2147483648 -2147483648").value(),
            Some(4_611_686_018_427_387_904)
        );
        assert_eq!(
            evaluate("ADD 2147483647 2147483647").value(),
            Some(4_294_967_294)
        );
    }
}
