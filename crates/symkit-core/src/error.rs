//! Error handling for symkit
//!
//! Errors are split into two channels:
//! - Validation errors: bad user input (invalid names, duplicate UUIDs,
//!   out-of-range values). Callers must handle them and leave the document
//!   untouched.
//! - Logic errors: broken invariants inside the editor (missing entities,
//!   misuse of the undo stack). They indicate a bug in a tool state and are
//!   logged loudly when converted into [`Error`].
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;
use uuid::Uuid;

/// Validation error type
///
/// Raised synchronously by commands and setters when a new value is not
/// acceptable for the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name does not satisfy the identifier rules
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A name is already used by another element of the same kind
    #[error("The name '{name}' is already in use")]
    NameInUse {
        /// The colliding name.
        name: String,
    },

    /// An element with the same UUID already exists in the list
    #[error("Duplicate UUID {uuid} in {kind} list")]
    DuplicateUuid {
        /// Element kind of the list.
        kind: &'static str,
        /// The colliding UUID.
        uuid: Uuid,
    },

    /// A numeric or structural value is out of its valid range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// The property that was rejected.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Clipboard payload could not be decoded
    #[error("Invalid clipboard data: {0}")]
    InvalidClipboardData(String),
}

impl ValidationError {
    /// Create an [`ValidationError::InvalidValue`] error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Logic error type
///
/// Represents a violated invariant of the editing core. Seeing one of these
/// at runtime means a tool state used the undo system incorrectly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    /// The referenced element is not (or no longer) part of its list
    #[error("{kind} {uuid} not found")]
    ElementNotFound {
        /// Element kind.
        kind: &'static str,
        /// The missing UUID.
        uuid: Uuid,
    },

    /// A list index is out of bounds
    #[error("Index {index} out of bounds for {kind} list of length {len}")]
    IndexOutOfBounds {
        /// Element kind.
        kind: &'static str,
        /// Requested index.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// A command group is already open on the undo stack
    #[error("Another command group is already active")]
    GroupAlreadyActive,

    /// No command group is open on the undo stack
    #[error("No command group is active")]
    NoActiveGroup,

    /// The command was executed before
    #[error("Command '{0}' was already executed")]
    AlreadyExecuted(String),

    /// The command is not in the executed state
    #[error("Command '{0}' is not executed")]
    NotExecuted(String),

    /// The command is executed and cannot be executed again
    #[error("Command '{0}' is already in the executed state")]
    AlreadyInExecutedState(String),

    /// Generic invariant violation
    #[error("{0}")]
    Other(String),
}

/// Main error type for symkit
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Logic error
    #[error(transparent)]
    Logic(LogicError),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

// Logic errors are always logged when they enter the general error channel so
// that a tool bug never disappears silently behind a `?`.
impl From<LogicError> for Error {
    fn from(err: LogicError) -> Self {
        tracing::error!(error = %err, "editor invariant violated");
        Error::Logic(err)
    }
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a logic error
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Error::Logic(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
