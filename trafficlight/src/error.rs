use std::error;
use std::fmt;

/// Convenient result type for signal operations using [`TrafficError`] as the error type.
///
/// This type alias reduces boilerplate when working with fallible controller
/// operations. Most fallible functions in this crate return this type.
pub type TrafficResult<T> = Result<T, TrafficError>;

/// Main error type for traffic signal operations.
///
/// [`TrafficError`] carries an [`ErrorKind`] for classification together with
/// a static description and, optionally, dynamic detail about the specific
/// failure.
#[derive(Debug, Clone)]
pub struct TrafficError {
    repr: ErrorRepr,
}

/// Internal representation of error data.
///
/// Users should not interact with this type directly but use [`TrafficError`]
/// methods instead.
#[derive(Debug, Clone)]
enum ErrorRepr {
    /// Error with kind and static description
    WithDescription(ErrorKind, &'static str),
    /// Error with kind, static description, and dynamic detail
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
}

/// Specific categories of errors that can occur during signal operations.
///
/// This enum provides granular error classification to enable appropriate
/// error handling strategies.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    // Lifecycle Errors
    ControllerAlreadyStarted,
    ControllerNotStarted,
    ControllerStopped,

    // Worker Errors
    CycleWorkerPanic,

    // Configuration Errors
    ConfigError,

    // Unknown / Uncategorized
    Unknown,
}

impl TrafficError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
        }
    }

    /// Returns the detailed error information if available.
    ///
    /// Returns [`None`] if the error only carries a static description.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            _ => None,
        }
    }
}

impl PartialEq for TrafficError {
    fn eq(&self, other: &TrafficError) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for TrafficError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;

                Ok(())
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)?;

                Ok(())
            }
        }
    }
}

impl error::Error for TrafficError {}

/// Creates a [`TrafficError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for TrafficError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> TrafficError {
        TrafficError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

/// Creates a [`TrafficError`] from an error kind, static description, and dynamic detail.
impl From<(ErrorKind, &'static str, String)> for TrafficError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> TrafficError {
        TrafficError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bail, traffic_error};

    #[test]
    fn test_simple_error_creation() {
        let err = TrafficError::from((ErrorKind::ControllerNotStarted, "Controller not started"));
        assert_eq!(err.kind(), ErrorKind::ControllerNotStarted);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_error_with_detail() {
        let err = TrafficError::from((
            ErrorKind::ConfigError,
            "Invalid cycle bounds",
            "min 300ms exceeds max 100ms".to_string(),
        ));
        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert_eq!(err.detail(), Some("min 300ms exceeds max 100ms"));
    }

    #[test]
    fn test_error_macro() {
        let err = traffic_error!(ErrorKind::ControllerStopped, "Controller stopped");
        assert_eq!(err.kind(), ErrorKind::ControllerStopped);
    }

    #[test]
    fn test_bail_macro() {
        fn failing() -> crate::error::TrafficResult<()> {
            bail!(
                ErrorKind::ControllerAlreadyStarted,
                "Controller already started",
                "controller 42"
            );
        }

        let err = failing().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ControllerAlreadyStarted);
        assert_eq!(err.detail(), Some("controller 42"));
    }

    #[test]
    fn test_display_formats_kind_and_detail() {
        let err = TrafficError::from((
            ErrorKind::CycleWorkerPanic,
            "The cycle worker task did not complete",
            "panicked".to_string(),
        ));
        let formatted = err.to_string();
        assert!(formatted.contains("CycleWorkerPanic"));
        assert!(formatted.contains("panicked"));
    }

    #[test]
    fn test_equality_compares_kinds_only() {
        let a = TrafficError::from((ErrorKind::ConfigError, "Invalid cycle bounds"));
        let b = TrafficError::from((
            ErrorKind::ConfigError,
            "Invalid cycle bounds",
            "detail".to_string(),
        ));
        assert_eq!(a, b);
    }
}
