//! A trait for types that can be formatted as an in-message mention.

use std::fmt;

use super::id::UserId;
use super::user::User;

/// Allows a user to be mentioned in reply content.
pub trait Mentionable {
    /// Creates a [`Mention`] that will notify the user when the surrounding
    /// message's mention allow-list permits it.
    ///
    /// [`Mention`] implements [`Display`](fmt::Display), so it can be
    /// interpolated into reply content directly.
    fn mention(&self) -> Mention;
}

/// A user mention in Discord's in-message syntax.
///
/// Renders as `<@USER_ID>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mention(UserId);

impl From<UserId> for Mention {
    fn from(id: UserId) -> Self {
        Self(id)
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<@{}>", self.0)
    }
}

impl<T> Mentionable for T
where
    T: Into<Mention> + Copy,
{
    fn mention(&self) -> Mention {
        (*self).into()
    }
}

impl Mentionable for User {
    fn mention(&self) -> Mention {
        self.id.into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::id::UserId;
    use super::super::user::User;
    use super::Mentionable;

    #[test]
    fn test_mention() {
        let user = User { id: UserId(6) };
        assert_eq!(user.mention().to_string(), "<@6>");
        assert_eq!(UserId(42).mention().to_string(), "<@42>");
    }
}
