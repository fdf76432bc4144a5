use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;
use serde_json::Error as JsonError;

use crate::key::KeyError;
use crate::verifier::InvalidSignature;

/// The common result type between most library functions.
pub type Result<T> = std::result::Result<T, Error>;

/// A common error enum returned by most of the library's functions.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The verification key could not be resolved at startup.
    ///
    /// Fatal: an endpoint without a key cannot authenticate anything and
    /// must not serve traffic.
    Key(KeyError),
    /// The request lacked one or both signature headers.
    MissingSignatureHeaders,
    /// The request signature failed verification.
    InvalidSignature(InvalidSignature),
    /// The request body wasn't a well-formed interaction.
    Json(JsonError),
    /// A recognized command was invoked with options outside its schema.
    InvalidCommandOptions(&'static str),
}

impl Error {
    /// The HTTP status this error translates to at the endpoint boundary.
    ///
    /// [`respond_to`] applies this mapping; it is exposed for front ends
    /// that drive [`handle`] directly.
    ///
    /// [`respond_to`]: crate::InteractionEndpoint::respond_to
    /// [`handle`]: crate::InteractionEndpoint::handle
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Key(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MissingSignatureHeaders | Self::Json(_) | Self::InvalidCommandOptions(_) => {
                StatusCode::BAD_REQUEST
            },
            Self::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// The short diagnostic served as the HTTP error body.
    ///
    /// Fixed per error class: no signature bytes, key material, or decoder
    /// detail ever reaches the response.
    #[must_use]
    pub fn diagnostic(&self) -> &'static str {
        match self {
            Self::Key(_) => "Internal error.",
            Self::MissingSignatureHeaders => "Signature verification headers missing.",
            Self::InvalidSignature(_) => "Invalid request signature.",
            Self::Json(_) | Self::InvalidCommandOptions(_) => "Malformed request.",
        }
    }
}

impl From<KeyError> for Error {
    fn from(e: KeyError) -> Self {
        Self::Key(e)
    }
}

impl From<InvalidSignature> for Error {
    fn from(e: InvalidSignature) -> Self {
        Self::InvalidSignature(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(inner) => fmt::Display::fmt(inner, f),
            Self::MissingSignatureHeaders => f.write_str("signature verification headers missing"),
            Self::InvalidSignature(inner) => fmt::Display::fmt(inner, f),
            Self::Json(inner) => fmt::Display::fmt(inner, f),
            Self::InvalidCommandOptions(detail) => write!(f, "invalid command options: {detail}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Key(inner) => Some(inner),
            Self::InvalidSignature(inner) => Some(inner),
            Self::Json(inner) => Some(inner),
            Self::MissingSignatureHeaders | Self::InvalidCommandOptions(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyError;

    #[test]
    fn statuses_and_diagnostics_stay_fixed() {
        let cases: Vec<(Error, StatusCode, &str)> = vec![
            (
                Error::Key(KeyError::MissingParameterName),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error.",
            ),
            (
                Error::MissingSignatureHeaders,
                StatusCode::BAD_REQUEST,
                "Signature verification headers missing.",
            ),
            (
                Error::InvalidSignature(InvalidSignature),
                StatusCode::UNAUTHORIZED,
                "Invalid request signature.",
            ),
            (
                Error::InvalidCommandOptions("takes one or two options"),
                StatusCode::BAD_REQUEST,
                "Malformed request.",
            ),
        ];

        for (error, status, diagnostic) in cases {
            assert_eq!(error.status(), status, "{error}");
            assert_eq!(error.diagnostic(), diagnostic, "{error}");
        }
    }

    #[test]
    fn json_errors_read_as_malformed_requests() {
        let error = Error::from(serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err());
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.diagnostic(), "Malformed request.");
    }
}
