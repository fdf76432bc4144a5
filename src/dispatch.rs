//! Maps parsed interactions to reply payloads.

use crate::commands;
use crate::error::Result;
use crate::model::interaction::Interaction;
use crate::model::response::{AllowedMentions, InteractionResponse, InteractionResponseData};

/// Reply text for interactions nothing here knows how to handle. Reaching it
/// means the command set registered with Discord is out of step with this
/// endpoint.
const FALLBACK_CONTENT: &str =
    "Not familiar with this command... If you receive this message, something has gone wrong.";

/// Produces the reply payload for a parsed interaction.
///
/// Every interaction gets exactly one reply: pings are acknowledged,
/// recognized commands are delegated to their handler in [`commands`], and
/// anything else receives a fixed diagnostic message whose mention allow-list
/// is empty.
///
/// # Errors
///
/// Whatever the delegated command handler returns; the ping and fallback
/// arms are infallible.
pub fn dispatch(interaction: &Interaction) -> Result<InteractionResponse> {
    match interaction {
        Interaction::Ping => {
            tracing::debug!("acknowledging ping");
            Ok(InteractionResponse::Pong)
        },
        Interaction::Command(command) => match command.data.name.as_str() {
            "roll" => commands::roll(command),
            name => {
                tracing::warn!(command = %name, "unrecognized command");
                Ok(fallback())
            },
        },
        Interaction::Unknown(kind) => {
            tracing::warn!(?kind, "unhandled interaction type");
            Ok(fallback())
        },
    }
}

fn fallback() -> InteractionResponse {
    InteractionResponse::ChannelMessageWithSource(InteractionResponseData::new(
        FALLBACK_CONTENT,
        AllowedMentions::default(),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::id::UserId;
    use crate::model::interaction::{
        CommandData, CommandDataOption, CommandDataOptionValue, CommandInteraction,
        InteractionType,
    };
    use crate::model::user::User;

    fn command(name: &str, options: Vec<CommandDataOption>) -> Interaction {
        Interaction::Command(CommandInteraction {
            data: CommandData { name: name.to_owned(), options },
            user: User { id: UserId(7) },
        })
    }

    fn assert_fallback(interaction: &Interaction) {
        let value = serde_json::to_value(dispatch(interaction).unwrap()).unwrap();
        assert_eq!(value["type"], json!(4));
        assert_eq!(value["data"]["content"], json!(FALLBACK_CONTENT));
        assert_eq!(value["data"]["allowed_mentions"], json!({"parse": []}));
    }

    #[test]
    fn pings_are_acknowledged() {
        assert_eq!(dispatch(&Interaction::Ping).unwrap(), InteractionResponse::Pong);
    }

    #[test]
    fn roll_is_delegated() {
        let interaction = command(
            "roll",
            vec![CommandDataOption {
                name: "sides".to_owned(),
                value: CommandDataOptionValue::Integer(1),
            }],
        );
        let value = serde_json::to_value(dispatch(&interaction).unwrap()).unwrap();
        assert_eq!(value["data"]["content"], json!("<@7> rolled 1."));
    }

    #[test]
    fn unrecognized_commands_fall_back() {
        assert_fallback(&command("frobnicate", Vec::new()));
    }

    #[test]
    fn unhandled_interaction_types_fall_back() {
        for kind in
            [InteractionType::Component, InteractionType::Autocomplete, InteractionType::Modal]
        {
            assert_fallback(&Interaction::Unknown(kind));
        }
    }
}
