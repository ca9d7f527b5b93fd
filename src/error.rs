use crate::Variable;
use std::convert::Infallible;
use thiserror::Error;

/// Errors raised when building or manipulating truth tables and their variables.
#[derive(Error, Debug, PartialEq)]
pub enum TruthError {
    /// The number of outputs does not match the size of the input space
    #[error("Expected {expected} outputs, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// This operation is not provided by packed truth tables
    #[error("Operation '{0}' is not supported by truth tables, use another function representation")]
    UnsupportedOperation(&'static str),

    /// The value can not be used as an output
    #[error("'{0}' is not a valid output value")]
    InvalidOutput(String),

    /// The point does not assign a required variable
    #[error("The point does not assign the variable '{0}'")]
    IncompletePoint(Variable),

    /// The variable appears twice in a list of inputs
    #[error("The variable '{0}' is used several times")]
    DuplicateVariable(Variable),

    /// The name is invalid
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The name Conflicts
    #[error("The name '{0}' conflicts with an other variable")]
    ConflictingName(String),

    /// The name is not part of the set of variables
    #[error("There is no variable named '{0}'")]
    NoSuchVariableName(String),

    /// The variable is not part of the group
    #[error("There is no variable '{0}' in this group")]
    NoSuchVariable(Variable),

    /// The expression is invalid
    #[error("Not a valid expression")]
    InvalidExpression,
}

impl From<Infallible> for TruthError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
