//! Bridge error types.

use thiserror::Error;

/// Errors surfaced by manifest parsing and install-hook dispatch.
///
/// Every dispatch variant names the offending package and the callable
/// string its manifest declared, so a failed plugin can be reported
/// without aborting the rest of the run.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("manifest error: {0}")]
    Manifest(String),

    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("package {package}: malformed callable '{callable}' (expected 'Class::method')")]
    MalformedCallable { package: String, callable: String },

    #[error("package {package}: no hook class registered for callable '{callable}'")]
    UnresolvedClass { package: String, callable: String },

    #[error("package {package}: hook class for '{callable}' has no such method")]
    UnknownMethod { package: String, callable: String },

    #[error("package {package}: loading hook class for '{callable}' failed: {message}")]
    LoadFailed {
        package: String,
        callable: String,
        message: String,
    },

    #[error("package {package}: install hook '{callable}' failed: {message}")]
    HookFailed {
        package: String,
        callable: String,
        message: String,
    },
}

impl BridgeError {
    /// Name of the package this error concerns, if any.
    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Manifest(_) | Self::Json(_) => None,
            Self::MalformedCallable { package, .. }
            | Self::UnresolvedClass { package, .. }
            | Self::UnknownMethod { package, .. }
            | Self::LoadFailed { package, .. }
            | Self::HookFailed { package, .. } => Some(package),
        }
    }
}
