//! Error types for decoding backend payloads.

use thiserror::Error;

use crate::CommandName;

/// Errors raised while interpreting the `data` of a successful response.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The data object did not have the expected shape.
    #[error("malformed {command} data: {source}")]
    Malformed {
        /// Command whose data was being read.
        command: CommandName,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A required field was absent.
    #[error("missing field in {command} data: {field}")]
    MissingField {
        /// Command whose data was being read.
        command: CommandName,
        /// Name of the absent field.
        field: &'static str,
    },

    /// Media bytes were not valid base64.
    #[error("invalid media encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PayloadError::MissingField {
            command: CommandName::RequestMedia,
            field: "mediaData",
        };
        assert_eq!(err.to_string(), "missing field in request-media data: mediaData");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PayloadError>();
    }
}
