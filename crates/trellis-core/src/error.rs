//! Error types for Trellis.
//!
//! Only the loading and configuration paths produce errors. Queries coming
//! from a host widget never fail; they degrade to neutral responses instead.

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading sections or configuring a handler.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON text could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML text could not be parsed.
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON document parsed, but does not have the expected shape.
    #[error("Malformed section payload: {message}")]
    Payload { message: String },

    /// A type map entry has an empty type tag or an empty identifier.
    #[error("Invalid type map entry '{type_tag}': {message}")]
    InvalidTypeMap { type_tag: String, message: String },

    /// A type map entry names an identifier that no registered cell class provides.
    #[error("Type '{type_tag}' maps to '{identifier}', which is not a registered cell class")]
    UnresolvedIdentifier { type_tag: String, identifier: String },
}

impl Error {
    /// Create a payload shape error.
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Create a type map error.
    pub fn invalid_type_map(type_tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTypeMap {
            type_tag: type_tag.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved identifier error.
    pub fn unresolved_identifier(
        type_tag: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self::UnresolvedIdentifier {
            type_tag: type_tag.into(),
            identifier: identifier.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_display() {
        let err = Error::payload("missing 'payload' array");
        assert_eq!(err.to_string(), "Malformed section payload: missing 'payload' array");
    }

    #[test]
    fn test_unresolved_identifier_display() {
        let err = Error::unresolved_identifier("r9", "GhostRow");
        assert_eq!(
            err.to_string(),
            "Type 'r9' maps to 'GhostRow', which is not a registered cell class"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
