use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The three language-level error kinds, plus host-level runtime faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Name,
    Type,
    /// Failures of the host numeric/container domain (bad index, division by
    /// zero, ...). These are not part of the checked language taxonomy.
    Runtime,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// Creates an error that is not tied to a source location, such as name
    /// lookups performed against a scope.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::UnknownEscape { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedComment => ErrorKind::Syntax,
            ErrorImpl::VariableNotDeclared { .. } | ErrorImpl::FunctionNotDeclared { .. } => {
                ErrorKind::Name
            }
            ErrorImpl::ConflictingReturnType { .. }
            | ErrorImpl::NotAnLValue
            | ErrorImpl::AssignmentTypeMismatch { .. }
            | ErrorImpl::UnsupportedBinary { .. }
            | ErrorImpl::UnsupportedUnary { .. }
            | ErrorImpl::InvalidIndexType { .. }
            | ErrorImpl::NotSubscriptable { .. }
            | ErrorImpl::ReturnTypeMismatch { .. } => ErrorKind::Type,
            ErrorImpl::RuntimeFault { .. } => ErrorKind::Runtime,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownEscape { .. } => "UnknownEscape",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::ConflictingReturnType { .. } => "ConflictingReturnType",
            ErrorImpl::NotAnLValue => "NotAnLValue",
            ErrorImpl::AssignmentTypeMismatch { .. } => "AssignmentTypeMismatch",
            ErrorImpl::UnsupportedBinary { .. } => "UnsupportedBinary",
            ErrorImpl::UnsupportedUnary { .. } => "UnsupportedUnary",
            ErrorImpl::InvalidIndexType { .. } => "InvalidIndexType",
            ErrorImpl::NotSubscriptable { .. } => "NotSubscriptable",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::RuntimeFault { .. } => "RuntimeFault",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } => match expected {
                Some(expected) => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, expected `{}`",
                    token, expected
                )),
                None => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    token
                )),
            },
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit or does it have more than one dot?",
                token
            )),
            ErrorImpl::UnknownEscape { escape } => ErrorTip::Suggestion(format!(
                "Unknown escape sequence `\\{}`, use one of `\\n \\t \\r \\a \\b \\f \\v \\\" \\' \\\\` or an octal code",
                escape
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::ConflictingReturnType { first, second } => ErrorTip::Suggestion(format!(
                "Every return must produce the same type, found `{}` and `{}`",
                first, second
            )),
            ErrorImpl::NotAnLValue => ErrorTip::Suggestion(String::from(
                "Only variables and index expressions can be assigned to",
            )),
            ErrorImpl::AssignmentTypeMismatch { left, right } => ErrorTip::Suggestion(format!(
                "Cannot assign a value of type `{}` to a target of type `{}`",
                right, left
            )),
            ErrorImpl::UnsupportedBinary { operator, left, right } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` is not defined between `{}` and `{}`",
                    operator, left, right
                ))
            }
            ErrorImpl::UnsupportedUnary { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` is not defined on `{}`",
                operator, operand
            )),
            ErrorImpl::InvalidIndexType { index } => {
                ErrorTip::Suggestion(format!("Indices must be `int`, received `{}`", index))
            }
            ErrorImpl::NotSubscriptable { type_ } => ErrorTip::Suggestion(format!(
                "Only `str` and `list<T>` can be indexed, received `{}`",
                type_
            )),
            ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected return type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::RuntimeFault { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{} at {}", self.internal_error, position),
            None => write!(f, "{}", self.internal_error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken {
        token: String,
        expected: Option<String>,
    },
    #[error("wrong number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown escape sequence: \\{escape}")]
    UnknownEscape { escape: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,

    // Name
    #[error("undefined variable {variable:?}")]
    VariableNotDeclared { variable: String },
    #[error("undefined function {function:?}")]
    FunctionNotDeclared { function: String },

    // Type
    #[error("conflicting return type '{first}' and '{second}'")]
    ConflictingReturnType { first: String, second: String },
    #[error("left of the assignment is not a l-value")]
    NotAnLValue,
    #[error("conflicting left type '{left}' and right type '{right}' when assigning")]
    AssignmentTypeMismatch { left: String, right: String },
    #[error("unsupported binary operation '{operator}' between type '{left}' and type '{right}'")]
    UnsupportedBinary {
        operator: String,
        left: String,
        right: String,
    },
    #[error("unsupported unary operation '{operator}' on type '{operand}'")]
    UnsupportedUnary { operator: String, operand: String },
    #[error("can't use type '{index}' as index")]
    InvalidIndexType { index: String },
    #[error("type '{type_}' is not subscriptable")]
    NotSubscriptable { type_: String },
    #[error("function declared to return '{expected}' returns '{received}'")]
    ReturnTypeMismatch { expected: String, received: String },

    // Host-level
    #[error("runtime fault: {message}")]
    RuntimeFault { message: String },
}

/// Shorthand for building an unpositioned host-level fault.
pub fn runtime_fault(message: impl Into<String>) -> Error {
    Error::unpositioned(ErrorImpl::RuntimeFault {
        message: message.into(),
    })
}
