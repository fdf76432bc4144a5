//! Models for the interaction payloads Discord delivers to an interactions
//! endpoint.
//!
//! [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object)

use std::result::Result as StdResult;

use serde::de::{Deserializer, Error as DeError};
use serde::Deserialize;
use serde_json::Value;

use super::user::{Member, User};
use crate::error::Result;

enum_number! {
    /// The type of an [`Interaction`].
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-object-interaction-type)
    InteractionType {
        /// A liveness probe sent during endpoint registration and periodically
        /// afterwards.
        Ping = 1,
        /// An application command invocation.
        Command = 2,
        /// A message component such as a button or select menu.
        Component = 3,
        /// An autocomplete query for a command option.
        Autocomplete = 4,
        /// A modal submission.
        Modal = 5,
    }
}

/// An interaction delivered to the endpoint, discriminated by its `type`
/// field.
///
/// Payloads tagged outside the [`InteractionType`] enumeration do not parse;
/// recognized types the endpoint has no handler for parse as [`Unknown`] so
/// the dispatcher can answer them gracefully.
///
/// [`Unknown`]: Interaction::Unknown
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Interaction {
    /// A liveness probe. Must be answered with a pong for Discord to accept
    /// and keep the endpoint registered.
    Ping,
    /// An application command invocation.
    Command(CommandInteraction),
    /// A recognized interaction type this endpoint does not handle.
    Unknown(InteractionType),
}

impl Interaction {
    /// Decodes an interaction from the raw bytes of a request body.
    ///
    /// The endpoint pipeline only calls this after the request signature has
    /// been verified; when driving the stages manually, call
    /// [`Verifier::verify`] first.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if the bytes are not a JSON object describing a
    /// well-formed interaction.
    ///
    /// [`Verifier::verify`]: crate::Verifier::verify
    /// [`Error::Json`]: crate::Error::Json
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Gets the interaction type.
    #[must_use]
    pub fn kind(&self) -> InteractionType {
        match self {
            Self::Ping => InteractionType::Ping,
            Self::Command(_) => InteractionType::Command,
            Self::Unknown(kind) => *kind,
        }
    }
}

impl<'de> Deserialize<'de> for Interaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;

        let raw_kind = map.get("type").ok_or_else(|| DeError::missing_field("type"))?.clone();
        let kind = InteractionType::deserialize(raw_kind).map_err(DeError::custom)?;

        match kind {
            InteractionType::Ping => Ok(Self::Ping),
            InteractionType::Command => serde_json::from_value(Value::from(map))
                .map(Self::Command)
                .map_err(DeError::custom),
            kind => Ok(Self::Unknown(kind)),
        }
    }
}

/// An interaction invoking an application command.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct CommandInteraction {
    /// The name of the invoked command and the options passed with it.
    pub data: CommandData,
    /// The invoking user.
    ///
    /// Resolved from the guild `member` wrapper or the top-level `user`
    /// field, whichever the payload carries.
    pub user: User,
}

#[derive(Deserialize)]
struct RawCommandInteraction {
    data: CommandData,
    member: Option<Member>,
    user: Option<User>,
}

impl<'de> Deserialize<'de> for CommandInteraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let raw = RawCommandInteraction::deserialize(deserializer)?;

        // If `member` is present, the top-level `user` field wasn't sent.
        let user = match (raw.member, raw.user) {
            (Some(member), _) => member.user,
            (None, Some(user)) => user,
            (None, None) => return Err(DeError::missing_field("user")),
        };

        Ok(Self { data: raw.data, user })
    }
}

/// The command payload of a [`CommandInteraction`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct CommandData {
    /// The name of the invoked command.
    pub name: String,
    /// The options passed with the command, in the order the user supplied
    /// them.
    #[serde(default)]
    pub options: Vec<CommandDataOption>,
}

/// A single option passed with an application command.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
pub struct CommandDataOption {
    /// The name of the option.
    pub name: String,
    /// The value the user supplied.
    pub value: CommandDataOptionValue,
}

/// The value of a [`CommandDataOption`].
///
/// Only the scalar shapes commands on this endpoint accept; anything else in
/// the `value` position fails to parse.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[non_exhaustive]
#[serde(untagged)]
pub enum CommandDataOptionValue {
    /// An integer option value.
    Integer(i64),
    /// A string option value.
    String(String),
}

impl CommandDataOptionValue {
    /// If the value is an integer, returns it.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(value) => Some(value),
            Self::String(_) => None,
        }
    }

    /// If the value is a string, returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Integer(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::id::UserId;

    fn parse(value: Value) -> Result<Interaction> {
        Interaction::parse(value.to_string().as_bytes())
    }

    fn command(value: Value) -> CommandInteraction {
        match parse(value).unwrap() {
            Interaction::Command(command) => command,
            other => panic!("expected a command interaction, got {other:?}"),
        }
    }

    #[test]
    fn parses_ping() {
        assert_eq!(parse(json!({"type": 1})).unwrap(), Interaction::Ping);
    }

    #[test]
    fn ping_ignores_other_fields() {
        let interaction = parse(json!({
            "type": 1,
            "id": "123",
            "token": "abc",
            "user": {"id": "42"},
        }))
        .unwrap();
        assert_eq!(interaction, Interaction::Ping);
    }

    #[test]
    fn parses_command_with_top_level_user() {
        let command = command(json!({
            "type": 2,
            "data": {"name": "roll", "options": [{"name": "sides", "value": 6}]},
            "user": {"id": "42"},
        }));

        assert_eq!(command.user.id, UserId(42));
        assert_eq!(command.data.name, "roll");
        assert_eq!(command.data.options.len(), 1);
        assert_eq!(command.data.options[0].name, "sides");
        assert_eq!(command.data.options[0].value.as_i64(), Some(6));
    }

    #[test]
    fn resolves_invoker_from_member() {
        let command = command(json!({
            "type": 2,
            "data": {"name": "roll", "options": []},
            "member": {"user": {"id": "99"}},
        }));

        assert_eq!(command.user.id, UserId(99));
    }

    #[test]
    fn member_takes_precedence_over_user() {
        let command = command(json!({
            "type": 2,
            "data": {"name": "roll", "options": []},
            "member": {"user": {"id": "99"}},
            "user": {"id": "42"},
        }));

        assert_eq!(command.user.id, UserId(99));
    }

    #[test]
    fn command_without_an_invoker_does_not_parse() {
        let result = parse(json!({
            "type": 2,
            "data": {"name": "roll", "options": []},
        }));
        assert!(result.is_err());
    }

    #[test]
    fn command_without_data_does_not_parse() {
        assert!(parse(json!({"type": 2, "user": {"id": "42"}})).is_err());
    }

    #[test]
    fn unhandled_types_parse_as_unknown() {
        for (value, kind) in [
            (3, InteractionType::Component),
            (4, InteractionType::Autocomplete),
            (5, InteractionType::Modal),
        ] {
            let interaction = parse(json!({"type": value})).unwrap();
            assert_eq!(interaction, Interaction::Unknown(kind));
            assert_eq!(interaction.kind(), kind);
        }
    }

    #[test]
    fn unrecognized_type_values_do_not_parse() {
        assert!(parse(json!({"type": 7})).is_err());
        assert!(parse(json!({"type": 0})).is_err());
        assert!(parse(json!({"type": -1})).is_err());
        assert!(parse(json!({"type": "2"})).is_err());
        assert!(parse(json!({})).is_err());
    }

    #[test]
    fn option_values_accept_integers_and_strings() {
        let command = command(json!({
            "type": 2,
            "data": {"name": "echo", "options": [
                {"name": "count", "value": 3},
                {"name": "text", "value": "hello"},
            ]},
            "user": {"id": "1"},
        }));

        assert_eq!(command.data.options[0].value, CommandDataOptionValue::Integer(3));
        assert_eq!(command.data.options[1].value.as_str(), Some("hello"));
        assert_eq!(command.data.options[1].value.as_i64(), None);
    }

    #[test]
    fn non_scalar_option_values_do_not_parse() {
        for value in [json!(6.5), json!(true), json!([6]), json!({"n": 6})] {
            let result = parse(json!({
                "type": 2,
                "data": {"name": "roll", "options": [{"name": "sides", "value": value.clone()}]},
                "user": {"id": "1"},
            }));
            assert!(result.is_err(), "option value {value} should not parse");
        }
    }

    #[test]
    fn missing_options_default_to_empty() {
        let command = command(json!({
            "type": 2,
            "data": {"name": "roll"},
            "user": {"id": "1"},
        }));
        assert!(command.data.options.is_empty());
    }
}
