//! Errors raised while registering types or accessing them through proxies

use beamlink_host::HostError;

/// Reflection and registration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReflectError {
    /// A type was requested again while its own dependencies were being registered
    #[error("registration cycle: {}", .path.join(" -> "))]
    Cycle {
        /// Type names from the outermost request to the repeated type
        path: Vec<String>,
    },

    /// Two field specs of one structure share a name
    #[error("'{type_name}' declares field '{field}' more than once")]
    DuplicateField {
        /// Structure name
        type_name: String,
        /// Repeated field name
        field: String,
    },

    /// Two different native types claim the same host name
    #[error("type name '{name}' is claimed by both {first} and {second}")]
    DuplicateName {
        /// Host type name
        name: String,
        /// Native type registered first
        first: String,
        /// Native type registered second
        second: String,
    },

    /// A proxy over a variant alternative outlived that alternative
    #[error("stale reference: '{variant}' no longer holds '{expected}' (active alternative is '{active}')")]
    StaleAlternative {
        /// Variant name
        variant: String,
        /// Alternative the proxy was created for
        expected: String,
        /// Alternative currently held
        active: String,
    },

    /// The root value is borrowed elsewhere for the duration of the access
    #[error("'{0}' is already borrowed")]
    Borrowed(String),

    /// Failure reported by the host environment
    #[error(transparent)]
    Host(#[from] HostError),
}

impl From<ReflectError> for HostError {
    fn from(err: ReflectError) -> Self {
        match err {
            ReflectError::Host(inner) => inner,
            other => HostError::native(other),
        }
    }
}

/// Recover a reflection error that crossed the host boundary
pub fn reflect_error(err: &HostError) -> Option<&ReflectError> {
    err.downcast_native::<ReflectError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = ReflectError::Cycle {
            path: vec!["Node".into(), "Link".into(), "Node".into()],
        };
        assert_eq!(err.to_string(), "registration cycle: Node -> Link -> Node");
    }

    #[test]
    fn test_round_trip_through_host_error() {
        let stale = ReflectError::StaleAlternative {
            variant: "Surface".into(),
            expected: "Quadric".into(),
            active: "Plane".into(),
        };
        let host: HostError = stale.into();
        assert!(matches!(
            reflect_error(&host),
            Some(ReflectError::StaleAlternative { expected, .. }) if expected == "Quadric"
        ));
    }

    #[test]
    fn test_host_errors_are_unwrapped() {
        let host: HostError = ReflectError::Host(HostError::UnknownType("Lens".into())).into();
        assert!(matches!(host, HostError::UnknownType(_)));
    }
}
