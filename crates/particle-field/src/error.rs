//! Error types for the particle field.

use thiserror::Error;

/// Errors raised at the fallible edges of the field: startup and configuration.
/// Simulation and rendering themselves never fail.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The render surface (or its 2D drawing context) could not be obtained.
    #[error("Render surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Neither the measured surface size nor the fallback size is usable.
    #[error("Viewport has no usable size")]
    EmptyViewport,

    /// A configuration event named an option the field does not know.
    #[error("Unknown configuration option: {0}")]
    UnknownOption(String),

    /// A configuration event carried a value of the wrong kind.
    #[error("Invalid value for '{option}': expected {expected}")]
    InvalidValue {
        option: String,
        expected: &'static str,
    },

    /// Malformed JSON configuration or event payload.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_option() {
        let err = FieldError::InvalidValue {
            option: "speed".into(),
            expected: "a number",
        };
        assert_eq!(err.to_string(), "Invalid value for 'speed': expected a number");
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: FieldError = parse.unwrap_err().into();
        assert!(matches!(err, FieldError::Config(_)));
    }
}
