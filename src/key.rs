//! Acquisition of the endpoint's verification key at startup.
//!
//! The key reaches the process through a [`KeyProvider`]: embedders hand one
//! to [`Verifier::from_provider`] during startup and abort if it fails, so a
//! process that cannot authenticate requests never serves traffic.
//!
//! [`Verifier::from_provider`]: crate::Verifier::from_provider

use async_trait::async_trait;
use secrecy::SecretString;

use crate::verifier::InvalidKey;

/// Name of the environment variable holding the Parameter Store name of the
/// verification key.
pub const PUBLIC_KEY_PARAMETER_ENV: &str = "PORTCULLIS_PUBLIC_KEY_PARAMETER";

/// A source for the application's hex-encoded Ed25519 public key.
///
/// Implementations fetch from wherever the deployment keeps configuration.
/// The fetched value is wrapped in [`SecretString`] so it stays out of debug
/// output and logs on the way to the [`Verifier`](crate::Verifier).
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Fetches the hex form of the public key.
    ///
    /// # Errors
    ///
    /// [`KeyError`] if the key cannot be resolved. Callers treat this as
    /// fatal.
    async fn public_key(&self) -> Result<SecretString, KeyError>;
}

/// The verification key could not be resolved.
#[derive(Debug)]
#[non_exhaustive]
pub enum KeyError {
    /// The environment variable naming the key parameter is unset or empty.
    MissingParameterName,
    /// The lookup against the key's backing store failed.
    Lookup(String),
    /// The fetched value couldn't be decoded into a valid public key.
    InvalidKey(InvalidKey),
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameterName => {
                f.write_str("verification key parameter name is not set")
            },
            Self::Lookup(message) => write!(f, "verification key lookup failed: {message}"),
            Self::InvalidKey(inner) => write!(f, "fetched verification key is unusable: {inner}"),
        }
    }
}

impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidKey(inner) => Some(inner),
            Self::MissingParameterName | Self::Lookup(_) => None,
        }
    }
}

/// Fetches the verification key from AWS Systems Manager Parameter Store.
///
/// The parameter is read with decryption enabled, so it may be stored as a
/// `SecureString`.
#[cfg(feature = "parameter_store")]
pub struct ParameterStoreProvider {
    client: aws_sdk_ssm::Client,
    parameter_name: String,
}

#[cfg(feature = "parameter_store")]
impl ParameterStoreProvider {
    /// Creates a provider that reads the named parameter with the given
    /// client.
    pub fn new(client: aws_sdk_ssm::Client, parameter_name: impl Into<String>) -> Self {
        Self { client, parameter_name: parameter_name.into() }
    }

    /// Creates a provider from the process environment.
    ///
    /// The parameter name comes from [`PUBLIC_KEY_PARAMETER_ENV`]; AWS
    /// region and credentials come from the SDK's standard environment
    /// chain.
    ///
    /// # Errors
    ///
    /// [`KeyError::MissingParameterName`] if the environment variable is
    /// unset or empty.
    pub async fn from_env() -> Result<Self, KeyError> {
        let parameter_name = std::env::var(PUBLIC_KEY_PARAMETER_ENV)
            .ok()
            .filter(|name| !name.is_empty())
            .ok_or(KeyError::MissingParameterName)?;

        let config = aws_config::from_env().load().await;
        Ok(Self::new(aws_sdk_ssm::Client::new(&config), parameter_name))
    }
}

#[cfg(feature = "parameter_store")]
#[async_trait]
impl KeyProvider for ParameterStoreProvider {
    async fn public_key(&self) -> Result<SecretString, KeyError> {
        let output = self
            .client
            .get_parameter()
            .name(&self.parameter_name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|err| KeyError::Lookup(err.to_string()))?;

        let value = output
            .parameter()
            .and_then(|parameter| parameter.value())
            .ok_or_else(|| KeyError::Lookup("parameter has no value".to_owned()))?;

        tracing::info!(parameter = %self.parameter_name, "fetched verification key parameter");
        Ok(SecretString::new(value.to_owned()))
    }
}
