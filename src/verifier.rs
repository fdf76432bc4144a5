//! Cryptographic verification of inbound interaction requests.
//!
//! "You can optionally configure an interactions endpoint to receive
//! interactions via HTTP POSTs rather than over Gateway with a bot user."
//!
//! <https://discord.com/developers/docs/interactions/overview#preparing-for-interactions>
//!
//! See [`Verifier`] for example usage.

use secrecy::ExposeSecret;

use crate::key::{KeyError, KeyProvider};

/// Parses a hex string into an array of `[u8]`
fn parse_hex<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != N * 2 {
        return None;
    }

    let mut res = [0; N];
    for (i, byte) in res.iter_mut().enumerate() {
        *byte = u8::from_str_radix(s.get(2 * i..2 * (i + 1))?, 16).ok()?;
    }
    Some(res)
}

/// The configured value couldn't be parsed into a valid cryptographic public
/// key.
#[derive(Debug)]
#[non_exhaustive]
pub enum InvalidKey {
    /// The value wasn't a 64 digit hex string.
    MalformedHex,
    /// The decoded bytes don't form a valid public key.
    Cryptographic(ed25519_dalek::SignatureError),
}

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedHex => f.write_str("public key is not a 64 digit hex string"),
            Self::Cryptographic(inner) => write!(f, "invalid public key: {inner}"),
        }
    }
}

impl std::error::Error for InvalidKey {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedHex => None,
            Self::Cryptographic(inner) => Some(inner),
        }
    }
}

/// A request signature failed verification.
///
/// Carries no detail on purpose: a signature that doesn't decode and a
/// signature that doesn't match are indistinguishable to the caller, so a
/// forger learns nothing about why a request was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidSignature;

impl std::fmt::Display for InvalidSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid request signature")
    }
}

impl std::error::Error for InvalidSignature {}

/// Used to cryptographically verify incoming interaction requests for
/// authenticity.
///
/// Discord signs every delivery with the application's Ed25519 key pair and
/// deliberately probes endpoints with invalid signatures; an endpoint that
/// fails to reject them is refused during registration.
///
/// ```rust
/// use portcullis::Verifier;
///
/// let verifier =
///     Verifier::from_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089")?;
///
/// // When receiving an HTTP request:
/// # let http_headers = std::collections::HashMap::from([("X-Signature-Ed25519", ""), ("X-Signature-Timestamp", "")]);
/// # let request_body = &[];
/// let signature = http_headers["X-Signature-Ed25519"];
/// let timestamp = http_headers["X-Signature-Timestamp"];
/// if verifier.verify(signature, timestamp, request_body).is_err() {
///     // Send HTTP 401 Unauthorized response
/// }
/// # Ok::<(), portcullis::InvalidKey>(())
/// ```
pub struct Verifier {
    public_key: ed25519_dalek::VerifyingKey,
}

impl Verifier {
    /// Creates a new [`Verifier`] from the public key bytes.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the key isn't cryptographically valid.
    pub fn try_new(public_key: [u8; 32]) -> Result<Self, InvalidKey> {
        Ok(Self {
            public_key: ed25519_dalek::VerifyingKey::from_bytes(&public_key)
                .map_err(InvalidKey::Cryptographic)?,
        })
    }

    /// Creates a new [`Verifier`] from the public key hex string, as shown on
    /// the application's developer portal page.
    ///
    /// # Errors
    ///
    /// [`InvalidKey`] if the string isn't 64 hex digits or the decoded key
    /// isn't cryptographically valid.
    pub fn from_hex(public_key: &str) -> Result<Self, InvalidKey> {
        Self::try_new(parse_hex(public_key).ok_or(InvalidKey::MalformedHex)?)
    }

    /// Fetches the public key from `provider` and creates a [`Verifier`]
    /// with it.
    ///
    /// This is the startup composition: a process whose key cannot be
    /// resolved has no way to authenticate requests and must not serve
    /// traffic.
    ///
    /// # Errors
    ///
    /// [`KeyError`] if the lookup fails or the fetched value isn't a valid
    /// public key.
    pub async fn from_provider<P: KeyProvider + ?Sized>(provider: &P) -> Result<Self, KeyError> {
        let public_key = provider.public_key().await?;
        let verifier = Self::from_hex(public_key.expose_secret()).map_err(KeyError::InvalidKey)?;
        tracing::info!("interaction verification key resolved");
        Ok(verifier)
    }

    /// Verifies a request for authenticity, given the `X-Signature-Ed25519`
    /// HTTP header, the `X-Signature-Timestamp` HTTP header, and the raw
    /// request body.
    ///
    /// The signed message is the exact concatenation of the timestamp bytes
    /// and body bytes as received; re-serializing the body before calling
    /// this invalidates genuine signatures.
    ///
    /// # Errors
    ///
    /// [`InvalidSignature`] if the signature doesn't decode or doesn't match.
    pub fn verify(
        &self,
        signature: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<(), InvalidSignature> {
        use ed25519_dalek::Verifier as _;

        let signature_bytes = parse_hex(signature).ok_or(InvalidSignature)?;
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);

        let message_to_verify = [timestamp.as_bytes(), body].concat();
        self.public_key.verify(&message_to_verify, &signature).map_err(|_| InvalidSignature)
    }
}

// The key is configuration, not state; it stays out of logs.
impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier").field("public_key", &"<secret>").finish()
    }
}
