//! Error types for the host environment

use std::sync::Arc;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Host environment error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Integer does not fit the target primitive
    #[error("Value {value} is out of range for {target}")]
    OutOfRange {
        /// Target primitive name
        target: String,
        /// Offending value
        value: String,
    },

    /// Property lookup failed on an object
    #[error("'{type_name}' object has no attribute '{attr}'{}", did_you_mean(.suggestion))]
    AttributeNotFound {
        /// Host type of the object
        type_name: String,
        /// Requested attribute
        attr: String,
        /// Closest existing attribute, if any
        suggestion: Option<String>,
    },

    /// Property has no setter
    #[error("attribute '{attr}' of '{type_name}' objects is not writable")]
    ReadOnly {
        /// Host type of the object
        type_name: String,
        /// Requested attribute
        attr: String,
    },

    /// Method lookup failed on an object
    #[error("'{type_name}' object has no method '{method}'")]
    MethodNotFound {
        /// Host type of the object
        type_name: String,
        /// Requested method
        method: String,
    },

    /// Attribute access on something that is not an object
    #[error("'{0}' values have no attributes")]
    NotAnObject(String),

    /// Host type lookup failed
    #[error("Unknown host type: {0}")]
    UnknownType(String),

    /// A host type with this name already exists
    #[error("Host type '{0}' is already declared")]
    DuplicateType(String),

    /// No implicit conversion path between two types
    #[error("No implicit conversion from '{from}' to '{to}'")]
    NoConversion {
        /// Source type name
        from: String,
        /// Target type name
        to: String,
    },

    /// Type was declared without a zero-argument constructor
    #[error("'{0}' cannot be constructed without arguments")]
    NoConstructor(String),

    /// Type was declared without a copy operation
    #[error("'{0}' objects cannot be copied")]
    NotCopyable(String),

    /// Enumeration member lookup failed
    #[error("'{enum_name}' has no member '{member}'")]
    UnknownEnumMember {
        /// Enumeration name
        enum_name: String,
        /// Requested member
        member: String,
    },

    /// Module-level attribute lookup failed
    #[error("module '{module}' has no attribute '{attr}'")]
    UnknownAttribute {
        /// Module name
        module: String,
        /// Requested attribute
        attr: String,
    },

    /// Module function lookup failed
    #[error("Unknown function: {0}")]
    FunctionNotFound(String),

    /// Invalid argument
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Error raised by native code behind a property, method or function
    #[error("{0}")]
    Native(Arc<dyn std::error::Error + Send + Sync>),
}

impl HostError {
    /// Wrap an arbitrary native error so it can cross the host boundary
    pub fn native<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HostError::Native(Arc::new(err))
    }

    /// Shorthand for a type mismatch
    pub fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        HostError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Downcast a native error back to its concrete type
    pub fn downcast_native<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            HostError::Native(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

impl From<String> for HostError {
    fn from(s: String) -> Self {
        HostError::ArgumentError(s)
    }
}

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        HostError::ArgumentError(s.to_string())
    }
}
