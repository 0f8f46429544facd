//! Common result and error types for invariant violations.

/// The result type for operations that can only fail on an internal bug.
///
/// User-facing problems (unknown devices, unsupported pin shapes, bad
/// configuration) have their own error enums in the crates that detect them.
/// `Err` here means a caller broke an invariant that should have been
/// validated upstream.
pub type Ecp5Result<T> = Result<T, InternalError>;

/// An invariant violation inside the backend, not a user input problem.
///
/// Raised for conditions such as an out-of-range XDR level reaching the
/// buffer synthesizer or a primitive port bound under a name that is not in
/// its catalog signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("xdr level 3 reached the synthesizer");
        assert_eq!(
            format!("{err}"),
            "internal error: xdr level 3 reached the synthesizer"
        );
    }

    #[test]
    fn err_path_carries_message() {
        let r: Ecp5Result<u32> = Err(InternalError::new("bad binding"));
        assert_eq!(r.unwrap_err().message, "bad binding");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
