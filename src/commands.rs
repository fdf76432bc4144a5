//! Handlers for the application commands the endpoint recognizes.

use rand::Rng;

use crate::error::{Error, Result};
use crate::model::interaction::{CommandDataOption, CommandInteraction};
use crate::model::mention::Mentionable;
use crate::model::response::{
    AllowedMentions, InteractionResponse, InteractionResponseData, ParseValue,
};

/// Handles the `roll` command: rolls dice and replies with the results.
///
/// The first option is the number of sides; the optional second option is
/// the number of dice. Each die is drawn independently and uniformly from
/// `[1, sides]`, and the results are listed in the order they were drawn.
/// The reply mentions the invoking user by id, and its allow-list permits
/// exactly that mention.
///
/// # Errors
///
/// [`Error::InvalidCommandOptions`] if the option count isn't 1 or 2, or if
/// any option value isn't a positive integer.
pub fn roll(interaction: &CommandInteraction) -> Result<InteractionResponse> {
    let (sides, rolls) = match interaction.data.options.as_slice() {
        [sides] => (positive_integer(sides)?, 1),
        [sides, rolls] => (positive_integer(sides)?, positive_integer(rolls)?),
        options => {
            tracing::debug!(count = options.len(), "rejecting roll with unexpected option count");
            return Err(Error::InvalidCommandOptions("roll takes one or two options"));
        },
    };

    let mut rng = rand::thread_rng();
    let results: Vec<i64> = (0..rolls).map(|_| rng.gen_range(1..=sides)).collect();
    let results_str = results.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");

    let content = format!("{} rolled {}.", interaction.user.mention(), results_str);
    let allowed_mentions = AllowedMentions::default().parse(ParseValue::Users).replied_user(true);

    Ok(InteractionResponse::ChannelMessageWithSource(InteractionResponseData::new(
        content,
        allowed_mentions,
    )))
}

fn positive_integer(option: &CommandDataOption) -> Result<i64> {
    match option.value.as_i64() {
        Some(value) if value >= 1 => Ok(value),
        _ => {
            tracing::debug!(option = %option.name, "rejecting non-positive roll option");
            Err(Error::InvalidCommandOptions("roll options must be positive integers"))
        },
    }
}
