//! Error types for parsing and reduction

use thiserror::Error;

/// Failure raised while reducing an entity.
///
/// Every failure aborts the `reduce` call that raised it; nothing inside
/// the evaluator recovers from one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A name is absent from the environment
    #[error("unbound name: {name}")]
    UnboundName {
        /// The identifier that failed to resolve
        name: String,
    },

    /// The callee of a call reduced to something that cannot be invoked
    #[error("entity of kind {kind} is not callable")]
    NotCallable {
        /// Kind of the entity in callee position
        kind: &'static str,
    },

    /// A built-in received an argument of the wrong kind
    #[error("{function}: argument {position} expected {expected}, got {got}")]
    ArgumentType {
        /// Built-in being invoked
        function: String,
        /// Zero-based position of the offending argument
        position: usize,
        /// What the built-in accepts
        expected: String,
        /// Kind actually received
        got: &'static str,
    },

    /// A built-in received the wrong number of arguments
    #[error("{function}: expected {expected} arguments, got {got}")]
    ArgumentArity {
        /// Built-in being invoked
        function: String,
        /// Accepted argument count
        expected: usize,
        /// Argument count received
        got: usize,
    },

    /// Integer arithmetic left the i64 range
    #[error("{function}: integer overflow")]
    Overflow {
        /// Built-in being invoked
        function: String,
    },
}

impl EvalError {
    /// Short name of the failure kind, as shown to REPL users.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::UnboundName { .. } => "UnboundNameError",
            EvalError::NotCallable { .. } => "NotCallableError",
            EvalError::ArgumentType { .. } => "ArgumentTypeError",
            EvalError::ArgumentArity { .. } => "ArgumentArityError",
            EvalError::Overflow { .. } => "OverflowError",
        }
    }

    /// Render as `<kind>: <message>`.
    pub fn diagnostic(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}

/// Failure turning source text into entities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text does not match the grammar
    #[error("syntax error at offset {offset}: {message}")]
    Syntax {
        /// Byte offset where parsing stopped
        offset: usize,
        /// What was expected there
        message: String,
    },

    /// An integer token does not fit in an i64
    #[error("integer literal out of range: {literal}")]
    IntegerOutOfRange {
        /// The token text
        literal: String,
    },

    /// A string token has an invalid escape sequence
    #[error("invalid string literal {literal}: {reason}")]
    InvalidString {
        /// The token text, quotes included
        literal: String,
        /// Decoder message
        reason: String,
    },
}

/// Umbrella error for whole-program operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LispError {
    /// Source could not be parsed or transformed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An expression failed to reduce
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result type alias for almost-lisp operations
pub type Result<T> = std::result::Result<T, LispError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let unbound = EvalError::UnboundName {
            name: "x".to_string(),
        };
        assert_eq!(unbound.kind(), "UnboundNameError");
        assert_eq!(unbound.to_string(), "unbound name: x");
        assert_eq!(unbound.diagnostic(), "UnboundNameError: unbound name: x");

        let not_callable = EvalError::NotCallable { kind: "Integer" };
        assert_eq!(
            not_callable.diagnostic(),
            "NotCallableError: entity of kind Integer is not callable"
        );
    }

    #[test]
    fn test_argument_errors_name_the_function() {
        let err = EvalError::ArgumentType {
            function: "+".to_string(),
            position: 0,
            expected: "Integer".to_string(),
            got: "String",
        };
        assert_eq!(err.to_string(), "+: argument 0 expected Integer, got String");

        let err = EvalError::ArgumentArity {
            function: "*".to_string(),
            expected: 2,
            got: 3,
        };
        assert_eq!(err.kind(), "ArgumentArityError");
        assert_eq!(err.to_string(), "*: expected 2 arguments, got 3");
    }

    #[test]
    fn test_lisp_error_is_transparent() {
        let err: LispError = ParseError::IntegerOutOfRange {
            literal: "99999999999999999999".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "integer literal out of range: 99999999999999999999"
        );
    }
}
