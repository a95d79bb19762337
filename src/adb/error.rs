//! Typed failure surface of the dispatch engine.

use std::process::ExitStatus;

use thiserror::Error;

/// Coarse classification of a failed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Parameters rejected before any process was spawned.
    Validation,
    /// The adb binary could not be started.
    Spawn,
    /// adb ran and reported failure (non-zero exit or stderr output).
    Tool,
    /// The caller cancelled the call; the child was terminated.
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Spawn => "spawn",
            ErrorKind::Tool => "tool",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("failed to start '{program}': {source} ({kind:?})", kind = .source.kind())]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// `stderr` is kept verbatim; the status is only shown when stderr is empty.
    #[error("{}", tool_message(.stderr, .status))]
    Tool {
        stderr: String,
        status: Option<ExitStatus>,
    },

    #[error("operation cancelled; adb process terminated")]
    Cancelled,
}

impl DispatchError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DispatchError::Validation(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::Spawn { .. } => ErrorKind::Spawn,
            DispatchError::Tool { .. } => ErrorKind::Tool,
            DispatchError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

fn tool_message(stderr: &str, status: &Option<ExitStatus>) -> String {
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match (*status).and_then(|s| s.code()) {
        Some(code) => format!("adb process failed (exit status {code})"),
        None => "adb process failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_error_prefers_stderr_verbatim() {
        let err = DispatchError::Tool {
            stderr: "error: device 'x' not found\n".into(),
            status: None,
        };
        assert_eq!(err.to_string(), "error: device 'x' not found\n");
        assert_eq!(err.kind(), ErrorKind::Tool);
    }

    #[test]
    fn tool_error_without_stderr_is_generic() {
        let err = DispatchError::Tool {
            stderr: String::new(),
            status: None,
        };
        assert_eq!(err.to_string(), "adb process failed");
    }

    #[test]
    fn spawn_error_carries_os_description() {
        let err = DispatchError::Spawn {
            program: "/nope/adb".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/adb"), "{msg}");
        assert!(msg.contains("NotFound"), "{msg}");
        assert_eq!(err.kind().as_str(), "spawn");
    }
}
