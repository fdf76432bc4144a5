//! Models for the user invoking an interaction.

use serde::Deserialize;

use super::id::UserId;

/// The user who invoked an interaction.
///
/// Sent as the top-level `user` field when the interaction comes from a DM,
/// or nested inside [`Member`] when it comes from a guild.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct User {
    /// The unique id of the user.
    pub id: UserId,
}

/// A guild-specific wrapper around the invoking [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[non_exhaustive]
pub struct Member {
    /// The underlying user.
    pub user: User,
}
