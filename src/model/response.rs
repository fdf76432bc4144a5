//! Models for the reply payloads the endpoint returns to Discord.
//!
//! [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object)

use std::result::Result as StdResult;

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

enum_number! {
    /// The type of an [`InteractionResponse`].
    ///
    /// [Discord docs](https://discord.com/developers/docs/interactions/receiving-and-responding#interaction-response-object-interaction-callback-type)
    InteractionResponseType {
        /// Acknowledges a ping.
        Pong = 1,
        /// Responds with a message in the channel the interaction came from.
        ChannelMessageWithSource = 4,
    }
}

/// The reply payload for one inbound interaction.
///
/// Serializes to the wire form `{"type": N, "data": {..}}`, with no `data`
/// field on a [`Pong`].
///
/// [`Pong`]: Self::Pong
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum InteractionResponse {
    /// Acknowledges a [`Ping`].
    ///
    /// [`Ping`]: super::interaction::Interaction::Ping
    Pong,
    /// Replies with a message in the invoking channel.
    ChannelMessageWithSource(InteractionResponseData),
}

impl InteractionResponse {
    /// Gets the response type.
    #[must_use]
    pub fn kind(&self) -> InteractionResponseType {
        match self {
            Self::Pong => InteractionResponseType::Pong,
            Self::ChannelMessageWithSource(_) => InteractionResponseType::ChannelMessageWithSource,
        }
    }
}

// Manual impl to emulate the integer tag.
impl Serialize for InteractionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        match self {
            Self::Pong => {
                let mut state = serializer.serialize_struct("InteractionResponse", 1)?;
                state.serialize_field("type", &self.kind())?;
                state.end()
            },
            Self::ChannelMessageWithSource(data) => {
                let mut state = serializer.serialize_struct("InteractionResponse", 2)?;
                state.serialize_field("type", &self.kind())?;
                state.serialize_field("data", data)?;
                state.end()
            },
        }
    }
}

/// The message payload of a [`ChannelMessageWithSource`] reply.
///
/// Every field Discord's message callback schema expects is always present;
/// `embeds` stays an explicit empty list because replies from this endpoint
/// never carry rich content.
///
/// [`ChannelMessageWithSource`]: InteractionResponse::ChannelMessageWithSource
#[derive(Clone, Debug, PartialEq, Serialize)]
#[non_exhaustive]
pub struct InteractionResponseData {
    /// Whether the reply is read aloud by the client. Always `false` here.
    pub tts: bool,
    /// The text of the reply.
    pub content: String,
    /// Rich embeds attached to the reply. Always empty.
    pub embeds: Vec<serde_json::Value>,
    /// The mention allow-list applied to [`content`](Self::content).
    pub allowed_mentions: AllowedMentions,
}

impl InteractionResponseData {
    /// Creates a message payload from reply text and a mention allow-list.
    #[must_use]
    pub fn new(content: impl Into<String>, allowed_mentions: AllowedMentions) -> Self {
        Self {
            tts: false,
            content: content.into(),
            embeds: Vec::new(),
            allowed_mentions,
        }
    }
}

/// An explicit allow-list restricting which mention syntaxes in reply content
/// actually notify anyone.
///
/// The default allows nothing, so reply text built from request input cannot
/// be turned into an `@everyone`-style mass notification.
///
/// [Discord docs](https://discord.com/developers/docs/resources/channel#allowed-mentions-object)
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[must_use]
pub struct AllowedMentions {
    parse: Vec<ParseValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replied_user: Option<bool>,
}

impl AllowedMentions {
    /// Adds a category of mentions that is allowed to notify.
    pub fn parse(mut self, value: ParseValue) -> Self {
        self.parse.push(value);
        self
    }

    /// Sets whether the reply notifies the user being replied to.
    pub fn replied_user(mut self, mention_user: bool) -> Self {
        self.replied_user = Some(mention_user);
        self
    }
}

/// The categories of mentions an [`AllowedMentions`] list can allow.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseValue {
    /// `@everyone` and `@here` mentions.
    Everyone,
    /// `<@USER_ID>` mentions.
    Users,
    /// `<@&ROLE_ID>` mentions.
    Roles,
}
