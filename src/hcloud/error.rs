//! Error taxonomy for the Hetzner Cloud client

use thiserror::Error;

/// Result alias used by every client operation
pub type Result<T> = std::result::Result<T, HcloudError>;

/// Errors returned by the Hetzner Cloud client.
///
/// Callers branch on the variant: provider rejections (`Api`, `Status`) are
/// user-facing, malformed responses (`Decode`, `MissingKey`) indicate a contract
/// mismatch, and `NotFound` is decided locally without any API error.
#[derive(Debug, Error)]
pub enum HcloudError {
    /// The API token is empty or cannot be sent as a header value.
    #[error("invalid API token: must be a non-empty string of visible ASCII characters")]
    InvalidToken,

    /// The configured API endpoint is not a valid URL.
    #[error("invalid API endpoint {url}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request could not be built, sent or its body read.
    #[error("http request")]
    Transport(#[from] reqwest::Error),

    /// The request payload could not be serialized.
    #[error("encode request")]
    Encode(#[source] serde_json::Error),

    /// The provider rejected the request with a structured error body.
    #[error("hetzner api error: {message} (code: {code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The provider rejected the request without a usable error body.
    #[error("hetzner api error: status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("decode {context}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A paginated envelope lacked the array it is keyed under.
    #[error("response missing key {key:?}")]
    MissingKey { key: String },

    /// No resource with the given name exists in the project.
    #[error("{resource} not found: {token}")]
    NotFound {
        resource: &'static str,
        token: String,
    },
}

impl HcloudError {
    /// True when the response was received but could not be understood.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::MissingKey { .. })
    }

    /// HTTP status of a provider rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = HcloudError::Api {
            status: 404,
            code: "not_found".to_string(),
            message: "server not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "hetzner api error: server not found (code: not_found)"
        );
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_malformed_kinds() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        assert!(HcloudError::decode("servers", source).is_malformed());
        assert!(HcloudError::MissingKey {
            key: "servers".to_string()
        }
        .is_malformed());
        assert!(!HcloudError::Status { status: 500 }.is_malformed());
    }

    #[test]
    fn test_source_detail_is_only_in_the_chain() {
        let source = serde_json::from_str::<u64>("\"x\"").unwrap_err();
        let detail = source.to_string();
        let err = anyhow::Error::new(HcloudError::decode("servers", source));

        assert_eq!(err.to_string(), "decode servers");
        let chained = format!("{:#}", err);
        assert_eq!(chained.matches(&detail).count(), 1);
    }

    #[test]
    fn test_not_found_display() {
        let err = HcloudError::NotFound {
            resource: "ssh key",
            token: "laptop".to_string(),
        };
        assert_eq!(err.to_string(), "ssh key not found: laptop");
        assert_eq!(err.status(), None);
    }
}
