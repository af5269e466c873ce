use thiserror::Error;

use crate::parser::{Token, END_LEXEME};

/// The category of a failure, independent of any context wrapped around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedToken,
    UnknownOperator,
    UnknownExpression,
    DivisionByZero,
    NumberConversionFailure,
}

#[derive(Debug, Error)]
pub enum Error {
    /// A byte or token that cannot appear where it was found.
    #[error("syntax error, unexpected token {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },
    /// `primary` found neither a number nor an opening parenthesis.
    #[error("unknown expression, found {found} at position {position}")]
    UnknownExpression { found: String, position: usize },
    #[error("unknown operator {0}")]
    UnknownOperator(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("parse float failed for {literal:?}: {reason}")]
    NumberConversion { literal: String, reason: String },
    #[error("evaluation failure: {0}")]
    Evaluation(#[source] Box<Error>),
}

impl Error {
    pub(crate) fn unexpected_byte(byte: Option<u8>, position: usize) -> Self {
        let found = match byte {
            Some(b) => char::from(b).to_string(),
            None => END_LEXEME.to_string(),
        };
        Self::UnexpectedToken { found, position }
    }

    pub(crate) fn unexpected_token(token: &Token) -> Self {
        Self::UnexpectedToken {
            found: token.lexeme.clone(),
            position: token.position,
        }
    }

    pub(crate) fn in_evaluation(self) -> Self {
        Self::Evaluation(Box::new(self))
    }

    /// The innermost error, with all evaluation context stripped.
    pub fn root(&self) -> &Error {
        let mut error = self;
        while let Self::Evaluation(inner) = error {
            error = inner;
        }
        error
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Self::UnknownExpression { .. } => ErrorKind::UnknownExpression,
            Self::UnknownOperator(_) => ErrorKind::UnknownOperator,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::NumberConversion { .. } => ErrorKind::NumberConversionFailure,
            Self::Evaluation(_) => unreachable!("root() strips evaluation context"),
        }
    }

    /// Scanner position reported with the error, where one applies.
    pub fn position(&self) -> Option<usize> {
        match self.root() {
            Self::UnexpectedToken { position, .. } | Self::UnknownExpression { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}
