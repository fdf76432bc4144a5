//! Portcullis answers Discord interaction webhooks.
//!
//! Discord can deliver interactions to an HTTPS endpoint instead of over the
//! gateway. This crate is the receiving half of that arrangement: it proves
//! each request came from Discord, decodes it, and produces the reply
//! payload, leaving the embedding HTTP front end (a Lambda handler, an axum
//! route, anything that can hand over headers and body bytes) free of
//! protocol detail.
//!
//! Each request walks three stages, failing closed at every step:
//!
//! 1. [`Verifier`] checks the request's Ed25519 signature over the exact
//!    timestamp and body bytes received.
//! 2. [`Interaction::parse`] decodes the body into a typed interaction.
//! 3. [`dispatch`] turns the interaction into an [`InteractionResponse`]:
//!    pong for pings, command handlers for recognized commands, and a fixed
//!    fallback message for everything else.
//!
//! [`InteractionEndpoint`] composes the stages:
//!
//! ```rust
//! use portcullis::{InteractionEndpoint, Verifier};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier =
//!     Verifier::from_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089")?;
//! let endpoint = InteractionEndpoint::new(verifier);
//!
//! // For every request the front end routes to the endpoint URL:
//! # let request = http::Request::builder().method("POST").body(Vec::new())?;
//! let response = endpoint.respond_to(&request);
//! # assert_eq!(response.status(), 400); // this one carries no signature headers
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! In production the key comes from a [`KeyProvider`] at startup; treat a
//! failure there as fatal, because an endpoint that cannot verify
//! signatures must not answer anything.
//!
//! # Features
//!
//! - `parameter_store` (enabled by default): provides
//!   [`ParameterStoreProvider`], which fetches the verification key from AWS
//!   Systems Manager Parameter Store.
//!
//! [`Interaction::parse`]: model::Interaction::parse
//! [`InteractionResponse`]: model::InteractionResponse
#![doc(html_root_url = "https://docs.rs/portcullis/*")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_panics_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod commands;
mod dispatch;
mod endpoint;
mod error;
pub mod key;
pub mod model;
mod verifier;

pub use crate::dispatch::dispatch;
pub use crate::endpoint::{InteractionEndpoint, SIGNATURE_HEADER, TIMESTAMP_HEADER};
pub use crate::error::{Error, Result};
#[cfg(feature = "parameter_store")]
pub use crate::key::ParameterStoreProvider;
pub use crate::key::{KeyError, KeyProvider};
pub use crate::verifier::{InvalidKey, InvalidSignature, Verifier};
