use thiserror::Error;

/// Failures while getting a JSON body back from the endpoint.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("invalid JSON response: {0}")]
    Decode(String),
}

/// Why an attempt ended in the `Error` display state.
#[derive(Error, Debug)]
pub enum InteractionError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response has no usable `{field}` field")]
    ResponseShape { field: String },
}

impl InteractionError {
    /// Text written to the display surface for this error.
    ///
    /// Shape errors show the fallback alone; transport errors append the reason so
    /// the user can tell an unreachable server from a malformed reply.
    pub fn display_text(&self, fallback: &str) -> String {
        match self {
            InteractionError::ResponseShape { .. } => fallback.to_string(),
            InteractionError::Transport(e) => format!("{} {}", fallback, e),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown preset `{0}` (expected prompt, ask, chat or respuesta)")]
    UnknownPreset(String),

    #[error("invalid base URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid boolean for {var}: `{value}`")]
    InvalidBool { var: String, value: String },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_shows_fallback_only() {
        let err = InteractionError::ResponseShape {
            field: "answer".to_string(),
        };
        assert_eq!(err.display_text("[ERROR]"), "[ERROR]");
    }

    #[test]
    fn transport_error_includes_reason() {
        let err: InteractionError = TransportError::Request("timeout".to_string()).into();
        let text = err.display_text("[ERROR]");
        assert!(text.starts_with("[ERROR] "));
        assert!(text.contains("timeout"));
    }

    #[test]
    fn status_error_mentions_code() {
        let err: InteractionError = TransportError::Status {
            status_code: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(err.display_text("[ERROR]"), "[ERROR] HTTP 502: bad gateway");
    }
}
