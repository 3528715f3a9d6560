//! Plays one accelerated game of Pictionary with four scripted players.
//!
//! The area's round clock beats every 50 ms instead of every second. The
//! drawer scribbles on each beat and the guesser calls out the word every
//! few beats, so both teams score. Run with `RUST_LOG=debug` to see every
//! command the area accepts.

use std::time::Duration;

use pictionary::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

const PLAYERS: [(u64, &str); 4] = [(1, "ada"), (2, "bo"), (3, "cy"), (4, "di")];

/// The guesser answers on every beat where the timer is a multiple of this.
const GUESS_EVERY: u32 = 4;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pictionary::init_logging();

    let config = AreaConfig {
        tick_period: Some(Duration::from_millis(50)),
        game: GameConfig {
            round_time_secs: 10,
            ..GameConfig::default()
        },
        ..AreaConfig::default()
    };
    let area = spawn_area(AreaId(1), config, Dictionary);

    // Watch as the first guesser would.
    let (tx, mut updates) = mpsc::unbounded_channel();
    area.subscribe(PlayerId(2), tx).await?;

    for (id, name) in PLAYERS {
        area.enter(Player::new(PlayerId(id), name)).await?;
        area.command(PlayerId(id), AreaCommand::JoinGame).await?;
    }
    area.command(PlayerId(1), AreaCommand::StartGame { difficulty: Difficulty::Easy })
        .await?;

    let mut last_timer = None;
    while let Some(view) = updates.recv().await {
        let Some(game) = &view.game else { continue };
        let state = &game.state;

        if state.status.is_over() {
            info!(winner = ?state.winner, "final whistle");
            break;
        }
        if last_timer == Some((state.round, state.timer)) {
            continue;
        }
        last_timer = Some((state.round, state.timer));
        info!(
            round = state.round,
            timer = state.timer,
            score_a = state.team_a.score,
            score_b = state.team_b.score,
            "beat"
        );

        play_beat(&area, state.timer).await?;
    }

    let snapshot = area.snapshot().await?;
    let history = JsonCodec.encode(&snapshot.history)?;
    println!("{}", String::from_utf8_lossy(&history));
    let pretty = serde_json::to_string_pretty(&snapshot.history)?;
    info!("history:\n{pretty}");

    area.shutdown().await?;
    Ok(())
}

/// One beat of scripted play: the drawer adds a pixel, and every few beats
/// the guesser names the word.
async fn play_beat(area: &AreaHandle, timer: u32) -> Result<(), PictionaryError> {
    // The full snapshot shows the word; the scripted players cheat.
    let snapshot = area.snapshot().await?;
    let Some(game) = snapshot.game else {
        return Ok(());
    };
    let state = game.state;
    let (Some(drawer), Some(guesser), Some(word)) = (state.drawer, state.guesser, state.word)
    else {
        return Ok(());
    };

    let stroke = vec![Pixel::new(i64::from(timer), i64::from(state.round), Color::new("#000000"))];
    let mut moves = vec![(drawer, AreaCommand::DrawCommand { drawing: stroke })];
    if timer % GUESS_EVERY == 0 {
        let game_move = PictionaryMove::new(word);
        moves.push((guesser, AreaCommand::GameMove { game_id: game.id, game_move }));
    }

    for (player, command) in moves {
        match area.command(player, command).await {
            Ok(_) => {}
            Err(error @ AreaError::Unavailable(_)) => return Err(error.into()),
            // The clock may have moved the game on since the snapshot.
            Err(error) => warn!(%player, %error, "scripted move rejected"),
        }
    }
    Ok(())
}
