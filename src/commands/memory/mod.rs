use crate::{
    Context, Error,
    config::{MAX_DELAY_MS, MIN_DELAY_MS},
    constants::{colors, icon},
    functions::{
        audio::{ChatAudio, Cue},
        ui::{
            component::{
                Screen, edit_component_message, send_ephemeral_response,
                update_component_message,
            },
            pretty_message::pretty_message,
        },
    },
};
use futures_util::StreamExt;
use poise::serenity_prelude::{self as serenity, ComponentInteractionCollector, Mentionable};
use rand::Rng;
use std::{pin::pin, time::Duration};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

mod board;
mod face;
mod render;
#[cfg(test)]
mod tests_props;
mod tile;

pub use face::FaceKind;

use board::{Board, ClickOutcome, Ignored};
use face::Face;
use render::{ButtonGrid, Press};

struct Game {
    id: u64,
    board: Board<Face>,
    grid: ButtonGrid,
    audio: ChatAudio,
    status: String,
    /// Image of the tile pressed last, shown as the embed thumbnail.
    spotlight: Option<String>,
}

/// Jogo da memória: encontre todos os pares errando o mínimo possível.
#[poise::command(
    slash_command,
    prefix_command,
    interaction_context = "Guild",
    category = "Jogos",
    rename = "memoria"
)]
pub async fn memory(
    ctx: Context<'_>,
    #[description = "Tipo das peças"] pecas: Option<FaceKind>,
    #[description = "Milissegundos até esconder um par errado"]
    #[min = 100]
    #[max = 5000]
    atraso: Option<u64>,
) -> Result<(), Error> {
    let config = &ctx.data().config;
    let kind = pecas.unwrap_or(config.faces);
    let delay = atraso
        .map(|ms| Duration::from_millis(ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS)))
        .unwrap_or(config.mismatch_delay);

    let dealt = face::deal(kind, config.pairs(), &config.assets, &mut rand::rng());
    let Some(faces) = dealt else {
        ctx.send(
            poise::CreateReply::default()
                .content(pretty_message(
                    icon::ERROR,
                    "As peças com imagens não estão configuradas neste bot.",
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let board = Board::new(faces, delay, None)?;
    run_game(ctx, board).await
}

async fn run_game(ctx: Context<'_>, board: Board<Face>) -> Result<(), Error> {
    let data = ctx.data();
    let id = rand::rng().random::<u64>();
    let mut game = Game {
        id,
        board,
        grid: ButtonGrid::new(format!("mem_{id}_")),
        audio: data.audio.clone(),
        status: pretty_message(icon::BELL, "Abra dois botões e encontre os pares!"),
        spotlight: None,
    };
    game.board.lay_out(&mut game.grid);

    let screen = render_game(&ctx, &game);
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(screen.embed)
                .components(screen.components),
        )
        .await?;
    let message = reply.message().await?;
    let (channel_id, message_id) = (message.channel_id, message.id);

    info!(
        game = game.id,
        player = %ctx.author().name,
        tiles = game.board.tiles().len(),
        delay_ms = game.board.mismatch_delay().as_millis() as u64,
        "memory game started"
    );

    // One collector for the whole game: presses arriving while a redraw is
    // in flight stay queued instead of going unanswered.
    let mut presses = pin!(
        ComponentInteractionCollector::new(ctx.serenity_context())
            .message_id(message_id)
            .author_id(ctx.author().id)
            .stream()
    );
    let mut idle_until = Instant::now() + data.config.game_timeout;

    loop {
        let unlock_at = game.board.unlock_at().map(Instant::from_std);

        let interaction = tokio::select! {
            interaction = presses.next() => interaction,
            () = sleep_until(idle_until) => None,
            () = wait_for(unlock_at) => {
                game.board.expire_lock(&mut game.grid);
                game.audio.clear();
                game.status = pretty_message(icon::BELL, "Tente outro par.");
                debug!(game = game.id, "mismatched pair hidden");
                edit_component_message(&ctx, channel_id, message_id, render_game(&ctx, &game))
                    .await?;
                continue;
            }
        };

        let Some(interaction) = interaction else {
            break;
        };
        idle_until = Instant::now() + data.config.game_timeout;

        let Some(press) = game.grid.parse(&interaction.data.custom_id) else {
            continue;
        };

        match press {
            Press::Restart => {
                game.board.reset(&mut game.grid);
                game.audio.clear();
                game.spotlight = None;
                game.status = pretty_message(
                    icon::SHUFFLE,
                    "Peças embaralhadas de novo. Boa sorte!",
                );
                info!(game = game.id, "memory game reset");
            }
            Press::Tile(tile_id) => {
                let outcome = game.board.on_tile_click(tile_id, &mut game.grid);
                debug!(
                    game = game.id,
                    tile = tile_id,
                    ?outcome,
                    locked = game.board.is_locked(),
                    "memory click"
                );

                if let ClickOutcome::Ignored(reason) = outcome {
                    send_ephemeral_response(&ctx, &interaction, ignored_message(reason)).await?;
                    continue;
                }

                game.spotlight = game
                    .board
                    .tile(tile_id)
                    .and_then(|tile| tile.value.image_url())
                    .map(str::to_owned);
                apply_outcome(&ctx, &mut game, outcome);
            }
        }

        update_component_message(&ctx, &interaction, render_game(&ctx, &game)).await?;
    }

    if let Some(cue) = closing_cue(game.board.has_won()) {
        game.audio.play_cue(cue);
        game.status = pretty_message(icon::ERROR, "Jogo encerrado por inatividade.");
        info!(
            game = game.id,
            matched = game.board.matched_count(),
            mistakes = game.board.mistakes(),
            "memory game abandoned"
        );
    }

    let mut screen = render_game(&ctx, &game);
    screen.components = Vec::new();
    edit_component_message(&ctx, channel_id, message_id, screen).await?;

    Ok(())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Sound that answers a click, if any.
fn cue_for(outcome: ClickOutcome) -> Option<Cue> {
    match outcome {
        ClickOutcome::Matched { won: false } => Some(Cue::Correct),
        ClickOutcome::Matched { won: true } => Some(Cue::Win),
        ClickOutcome::Mismatch { .. } => Some(Cue::Wrong),
        ClickOutcome::Revealed | ClickOutcome::Ignored(_) => None,
    }
}

/// Sound for a game that ran out of time; a won game ends quietly.
fn closing_cue(won: bool) -> Option<Cue> {
    (!won).then_some(Cue::Lose)
}

fn apply_outcome(ctx: &Context<'_>, game: &mut Game, outcome: ClickOutcome) {
    match cue_for(outcome) {
        Some(cue) => {
            game.audio.play_cue(cue);
        }
        None => game.audio.clear(),
    }

    match outcome {
        ClickOutcome::Revealed => {
            if let Some(tile) = game.board.last_revealed() {
                game.status = pretty_message(
                    icon::BELL,
                    format!("Você virou {}. Agora encontre o par!", tile.value.label()),
                );
            }
        }
        ClickOutcome::Matched { won: false } => {
            game.status = pretty_message(icon::CHECK, "Você encontrou um par!");
        }
        ClickOutcome::Matched { won: true } => {
            game.status = pretty_message(
                icon::GIFT,
                format!(
                    "{} completou todos os pares com **{}** erros!",
                    ctx.author().mention(),
                    game.board.mistakes()
                ),
            );
            info!(
                game = game.id,
                mistakes = game.board.mistakes(),
                "memory game won"
            );
        }
        ClickOutcome::Mismatch { pair, .. } => {
            game.grid.flag_mismatch(pair);
            game.status = pretty_message(icon::MISTAKE, "Não foi dessa vez. Memorize as peças!");
        }
        ClickOutcome::Ignored(_) => {}
    }
}

fn ignored_message(reason: Ignored) -> String {
    match reason {
        Ignored::Locked => {
            pretty_message(icon::TIMER, "Espere um instante enquanto escondo as peças.")
        }
        Ignored::AlreadyMatched => {
            pretty_message(icon::ERROR, "Esse par já foi encontrado. Escolha outra peça.")
        }
        Ignored::SameTile => pretty_message(icon::ERROR, "Essa peça já está virada."),
        Ignored::UnknownTile => pretty_message(icon::ERROR, "Essa peça não faz parte do jogo."),
    }
}

fn render_game(ctx: &Context<'_>, game: &Game) -> Screen {
    let board = &game.board;
    let mut lines = vec![
        pretty_message(
            icon::CHECK,
            format!(
                "**{}/{}** pares descobertos",
                board.matched_count(),
                board.matched_to_win()
            ),
        ),
        pretty_message(icon::MISTAKE, format!("**{}** erros", board.mistakes())),
        String::new(),
        game.status.clone(),
    ];

    if let Some(sound) = game.audio.last_played() {
        lines.push(pretty_message(icon::SOUND, sound.markdown()));
    }

    let colour = if board.has_won() {
        colors::MINT
    } else {
        colors::MOON
    };
    let mut embed = serenity::CreateEmbed::new()
        .title(format!("🧠 Memória de {}", ctx.author().name))
        .colour(colour)
        .description(lines.join("\n"));
    if let Some(url) = &game.spotlight {
        embed = embed.thumbnail(url);
    }

    Screen {
        embed,
        components: game.grid.rows(),
    }
}
