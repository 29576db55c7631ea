use thiserror::Error;

/// Result type alias using LimitError
pub type Result<T> = std::result::Result<T, LimitError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in structured logs and
/// by callers that branch on failure class rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    ConstraintViolation,
    MissingField,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Structured view of a failure: a stable kind for programmatic handling plus
/// context (operation, command, path) for the log line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    command: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            command: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add command name context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for limit reconciliation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitError {
    /// Document or registry file does not exist
    #[error("File not found: {path}")]
    MissingFile { path: String },

    /// Document or registry content could not be parsed
    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    /// An explicit limit is above the global ceiling
    #[error("Limit {limit} for command '{command}' exceeds global limit {global_limit}")]
    LimitExceedsGlobal {
        command: String,
        limit: u64,
        global_limit: u64,
    },

    /// A required field is absent from a bundle or document
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Document could not be written
    #[error("Failed to persist {path}: {reason}")]
    Persist { path: String, reason: String },

    /// Filesystem failure outside of persisting the document
    #[error("I/O error during {operation}: {reason}")]
    Io { operation: String, reason: String },

    /// Malformed caller input (e.g. a CLI assignment)
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl LimitError {
    /// Stable kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            LimitError::MissingFile { .. } => ExErrorKind::NotFound,
            LimitError::Parse { .. } => ExErrorKind::Serialization,
            LimitError::LimitExceedsGlobal { .. } => ExErrorKind::ConstraintViolation,
            LimitError::MissingField { .. } => ExErrorKind::MissingField,
            LimitError::Persist { .. } => ExErrorKind::Persistence,
            LimitError::Io { .. } => ExErrorKind::Io,
            LimitError::InvalidInput { .. } => ExErrorKind::InvalidInput,
        }
    }
}

impl From<LimitError> for ExError {
    fn from(err: LimitError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            LimitError::MissingFile { path } => base.with_op("load").with_path(path),
            LimitError::Parse { path, .. } => base.with_op("parse").with_path(path),
            LimitError::LimitExceedsGlobal { command, .. } => {
                base.with_op("validate_limit").with_command(command)
            }
            LimitError::MissingField { .. } => base.with_op("validate_bundle"),
            LimitError::Persist { path, .. } => base.with_op("save").with_path(path),
            LimitError::Io { operation, .. } => base.with_op(operation),
            LimitError::InvalidInput { .. } => base,
        }
    }
}

impl From<&LimitError> for ExError {
    fn from(err: &LimitError) -> Self {
        err.clone().into()
    }
}
