//! The snowflake identifiers Discord assigns to its entities.

use std::fmt;
use std::result::Result as StdResult;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::utils::U64Visitor;

/// An identifier for a [`User`].
///
/// Interaction payloads carry snowflakes as JSON strings, but the bare integer
/// form deserializes too. Serialization always uses the string form.
///
/// [`User`]: super::user::User
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl PartialEq<u64> for UserId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        deserializer.deserialize_any(U64Visitor).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::UserId;

    #[test]
    fn deserializes_both_wire_forms() {
        let id: UserId = serde_json::from_value(json!("175928847299117063")).unwrap();
        assert_eq!(id, UserId(175_928_847_299_117_063));

        let id: UserId = serde_json::from_value(json!(175_928_847_299_117_063_u64)).unwrap();
        assert_eq!(id, UserId(175_928_847_299_117_063));
    }

    #[test]
    fn rejects_non_numeric_strings() {
        assert!(serde_json::from_value::<UserId>(json!("not a snowflake")).is_err());
        assert!(serde_json::from_value::<UserId>(json!(-1)).is_err());
    }

    #[test]
    fn serializes_as_string() {
        assert_eq!(serde_json::to_value(UserId(42)).unwrap(), json!("42"));
    }
}
