use crate::{Context, Error};
use poise::serenity_prelude::{
    self as serenity, CreateActionRow, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage, EditMessage,
};

/// Everything a component message displays: one embed plus its button rows.
pub struct Screen {
    pub embed: CreateEmbed,
    pub components: Vec<CreateActionRow>,
}

/// Private notice for the player who pressed; the game message stays as is.
pub async fn send_ephemeral_response(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
    content: impl Into<String>,
) -> Result<(), Error> {
    let notice = CreateInteractionResponseMessage::new()
        .ephemeral(true)
        .content(content);
    respond(ctx, interaction, CreateInteractionResponse::Message(notice)).await
}

/// Acknowledges a press by redrawing the message that carries the buttons.
pub async fn update_component_message(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
    screen: Screen,
) -> Result<(), Error> {
    let Screen { embed, components } = screen;
    let redraw = CreateInteractionResponseMessage::new()
        .embed(embed)
        .components(components);
    respond(ctx, interaction, CreateInteractionResponse::UpdateMessage(redraw)).await
}

/// Redraws a component message outside of any interaction, e.g. after a timer.
pub async fn edit_component_message(
    ctx: &Context<'_>,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
    screen: Screen,
) -> Result<(), Error> {
    channel_id
        .edit_message(
            ctx.serenity_context(),
            message_id,
            EditMessage::new()
                .content("")
                .embed(screen.embed)
                .components(screen.components),
        )
        .await?;
    Ok(())
}

async fn respond(
    ctx: &Context<'_>,
    interaction: &serenity::ComponentInteraction,
    response: CreateInteractionResponse,
) -> Result<(), Error> {
    interaction
        .create_response(ctx.serenity_context(), response)
        .await
        .map_err(Into::into)
}
