//! Mappings of the objects Discord's interaction webhooks send and receive.
//!
//! Inbound payloads implement [`Deserialize`], reply payloads implement
//! [`Serialize`], and both stick to the exact wire shapes Discord documents.
//!
//! [`Deserialize`]: serde::Deserialize
//! [`Serialize`]: serde::Serialize

#[macro_use]
mod utils;

pub mod id;
pub mod interaction;
pub mod mention;
pub mod response;
pub mod user;

pub use self::id::UserId;
pub use self::interaction::{
    CommandData, CommandDataOption, CommandDataOptionValue, CommandInteraction, Interaction,
    InteractionType,
};
pub use self::mention::{Mention, Mentionable};
pub use self::response::{
    AllowedMentions, InteractionResponse, InteractionResponseData, InteractionResponseType,
    ParseValue,
};
pub use self::user::{Member, User};
