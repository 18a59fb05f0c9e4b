use thiserror::Error;

/// Broad family an error belongs to.
///
/// A failed cast on an [`AnyValue`](crate::AnyValue) is a cast error; touching
/// the value of a disengaged [`Optional`](crate::Optional) is a logic error in
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The requested type did not match the stored one
    BadCast,
    /// The operation's precondition was violated by the caller
    Logic,
}

/// Returned when a value is extracted from an `AnyValue` by the wrong type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bad any cast: requested `{expected}`, but the value holds `{found}`")]
pub struct BadAnyCast {
    /// Name of the type that was asked for
    pub expected: &'static str,
    /// Name of the type actually held, or the no-type marker when empty
    pub found: &'static str,
}

impl BadAnyCast {
    pub(crate) fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::BadCast
    }
}

/// Returned when the value of a disengaged `Optional` is requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("bad optional access")]
pub struct BadOptionalAccess;

impl BadOptionalAccess {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Logic
    }
}

/// Any error originated by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error(transparent)]
    BadAnyCast(#[from] BadAnyCast),
    #[error(transparent)]
    BadOptionalAccess(#[from] BadOptionalAccess),
}

impl ValueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValueError::BadAnyCast(e) => e.category(),
            ValueError::BadOptionalAccess(e) => e.category(),
        }
    }
}
