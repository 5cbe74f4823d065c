//! Error handling for the xcc compiler
//!
//! Every phase reports failures through [`CompilerError`]. Compilation stops
//! at the first error; [`Diagnostic`] pairs it with the program text so the
//! driver can point at the offending column.

use crate::source_loc::{SourceLocation, SourceText};
use std::fmt;
use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("invalid token")]
    InvalidToken { location: SourceLocation },

    #[error("expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("expected an expression")]
    ExpectedExpression { location: SourceLocation },

    #[error("undefined variable '{name}'")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("invalid operands")]
    InvalidOperands { location: SourceLocation },

    #[error("invalid pointer dereference")]
    NotAPointer { location: SourceLocation },

    #[error("too many parameters: {count} (maximum: {max})")]
    TooManyParameters {
        count: usize,
        max: usize,
        location: SourceLocation,
    },

    #[error("too many arguments: {count} (maximum: {max})")]
    TooManyArguments {
        count: usize,
        max: usize,
        location: SourceLocation,
    },

    #[error("{message}")]
    InvalidExpression {
        message: String,
        location: SourceLocation,
    },

    #[error("{message}")]
    InvalidStatement {
        message: String,
        location: SourceLocation,
    },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("internal compiler error: {message}")]
    Internal { message: String },
}

impl CompilerError {
    pub fn invalid_token(location: SourceLocation) -> Self {
        CompilerError::InvalidToken { location }
    }

    pub fn unexpected_token(expected: impl Into<String>, found: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            location,
        }
    }

    pub fn invalid_expression(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::InvalidExpression {
            message: message.into(),
            location,
        }
    }

    pub fn invalid_statement(message: impl Into<String>, location: SourceLocation) -> Self {
        CompilerError::InvalidStatement {
            message: message.into(),
            location,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CompilerError::Internal {
            message: message.into(),
        }
    }

    /// Where in the program the error was detected, if anywhere
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            CompilerError::InvalidToken { location }
            | CompilerError::UnexpectedToken { location, .. }
            | CompilerError::ExpectedExpression { location }
            | CompilerError::UndefinedVariable { location, .. }
            | CompilerError::InvalidOperands { location }
            | CompilerError::NotAPointer { location }
            | CompilerError::TooManyParameters { location, .. }
            | CompilerError::TooManyArguments { location, .. }
            | CompilerError::InvalidExpression { location, .. }
            | CompilerError::InvalidStatement { location, .. } => Some(*location),
            CompilerError::Io { .. } | CompilerError::Internal { .. } => None,
        }
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::Io {
            message: err.to_string(),
        }
    }
}

/// A compiler error bound to the program text it refers to
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic<'a> {
    pub error: CompilerError,
    pub source: &'a str,
}

impl<'a> Diagnostic<'a> {
    pub fn new(error: CompilerError, source: &'a str) -> Self {
        Self { error, source }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error.location() {
            Some(location) => {
                let text = SourceText::new(self.source);
                write!(f, "{}", text.caret(location.offset, &self.error.to_string()))
            }
            None => write!(f, "error: {}", self.error),
        }
    }
}
