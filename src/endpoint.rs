//! The request-scoped pipeline behind an Interactions Endpoint URL.

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};

use crate::dispatch::dispatch;
use crate::error::{Error, Result};
use crate::model::interaction::Interaction;
use crate::model::response::InteractionResponse;
use crate::verifier::Verifier;

/// Name of the header carrying the hex-encoded request signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Name of the header carrying the timestamp the signature covers.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// A complete interactions endpoint: verifies, parses, and dispatches
/// inbound requests.
///
/// The pipeline is synchronous and stateless between requests; one endpoint
/// can be shared across however many requests a front end handles at once.
#[derive(Debug)]
pub struct InteractionEndpoint {
    verifier: Verifier,
}

impl InteractionEndpoint {
    /// Creates an endpoint that authenticates requests with `verifier`.
    #[must_use]
    pub fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }

    /// Runs the pipeline over the pieces of an inbound request: signature
    /// check, then parse, then dispatch.
    ///
    /// Fails fast: a request with missing or invalid signature material is
    /// rejected before its body is looked at. `body` must be the raw bytes
    /// as received; re-serializing them invalidates genuine signatures.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSignatureHeaders`] if either header is absent,
    /// [`Error::InvalidSignature`] if verification fails,
    /// [`Error::Json`] if the body isn't a well-formed interaction, or
    /// [`Error::InvalidCommandOptions`] if a recognized command was invoked
    /// with options outside its schema.
    pub fn handle(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<InteractionResponse> {
        let (signature, timestamp) = match (signature, timestamp) {
            (Some(signature), Some(timestamp)) => (signature, timestamp),
            _ => {
                tracing::info!("signature verification headers missing");
                return Err(Error::MissingSignatureHeaders);
            },
        };

        if let Err(err) = self.verifier.verify(signature, timestamp, body) {
            tracing::info!("invalid request signature");
            return Err(Error::InvalidSignature(err));
        }

        let interaction = match Interaction::parse(body) {
            Ok(interaction) => interaction,
            Err(err) => {
                tracing::warn!(error = %err, "malformed request body");
                return Err(err);
            },
        };

        dispatch(&interaction)
    }

    /// Answers an HTTP request according to the endpoint's wire contract.
    ///
    /// Signature headers are looked up case-insensitively; header values
    /// that aren't valid UTF-8 count as absent. Replies serialize into a
    /// 200 JSON response, errors into their [`status`](Error::status) with
    /// a short fixed [`diagnostic`](Error::diagnostic) body.
    ///
    /// Routing is the front end's concern: this answers whatever request it
    /// is handed, regardless of method or path.
    pub fn respond_to<B: AsRef<[u8]>>(&self, request: &Request<B>) -> Response<String> {
        let headers = request.headers();
        let signature = headers.get(SIGNATURE_HEADER).and_then(|value| value.to_str().ok());
        let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|value| value.to_str().ok());

        match self.handle(signature, timestamp, request.body().as_ref()) {
            Ok(reply) => json_response(&reply),
            Err(err) => plain_response(err.status(), err.diagnostic()),
        }
    }
}

fn json_response(reply: &InteractionResponse) -> Response<String> {
    match serde_json::to_string(reply) {
        Ok(body) => {
            let mut response = Response::new(body);
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        },
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize reply");
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
        },
    }
}

fn plain_response(status: StatusCode, body: &str) -> Response<String> {
    let mut response = Response::new(body.to_owned());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn signer_and_endpoint() -> (SigningKey, InteractionEndpoint) {
        let signing_key = SigningKey::from_bytes(&[0x24; 32]);
        let verifier = Verifier::try_new(signing_key.verifying_key().to_bytes()).unwrap();
        (signing_key, InteractionEndpoint::new(verifier))
    }

    fn sign(key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        hex::encode(key.sign(&[timestamp.as_bytes(), body].concat()).to_bytes())
    }

    #[test]
    fn either_header_missing_is_rejected() {
        let (signing_key, endpoint) = signer_and_endpoint();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1700000000", body);

        for (signature, timestamp) in [
            (None, None),
            (Some(signature.as_str()), None),
            (None, Some("1700000000")),
        ] {
            let err = endpoint.handle(signature, timestamp, body).unwrap_err();
            assert!(matches!(err, Error::MissingSignatureHeaders));
        }
    }

    #[test]
    fn verification_runs_before_parsing() {
        let (_, endpoint) = signer_and_endpoint();
        // Unparseable body, garbage signature: the signature error wins.
        let err = endpoint.handle(Some("junk"), Some("1700000000"), b"not json").unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn signed_garbage_is_a_json_error() {
        let (signing_key, endpoint) = signer_and_endpoint();
        let signature = sign(&signing_key, "1700000000", b"not json");
        let err = endpoint.handle(Some(&signature), Some("1700000000"), b"not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
