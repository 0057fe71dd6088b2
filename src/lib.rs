use bevy::app::App;
use bevy::prelude::*;

pub mod core;
mod config;

pub use crate::config::GameConfig;
use crate::core::{BlockGame, Board, Position, StepOutcome};

/// Sent by whatever drives the game to advance the board by one step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tick;

#[derive(Debug, Clone)]
pub struct CollapseEvent {
    pub cells: Vec<Position>,
    pub score: usize,
}

#[derive(Debug, Clone)]
pub struct GameOverEvent {
    pub score: usize,
}

/// Inserts a [`Board`] built from the [`GameConfig`] resource (or the
/// default config) and steps it once per [`Tick`].
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world
            .get_resource::<GameConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(config.build_board())
            .insert_resource(config)
            .add_event::<Tick>()
            .add_event::<CollapseEvent>()
            .add_event::<GameOverEvent>()
            .add_system(advance_board);
    }
}

fn advance_board(
    mut ticks: EventReader<Tick>,
    mut board: ResMut<Board>,
    mut ev_collapse: EventWriter<CollapseEvent>,
    mut ev_game_over: EventWriter<GameOverEvent>,
) {
    for _ in ticks.iter() {
        if board.is_game_over() {
            continue;
        }

        if let StepOutcome::Locked { collapsed } = board.step() {
            if !collapsed.is_empty() {
                ev_collapse.send(CollapseEvent {
                    cells: collapsed,
                    score: board.determine_score(),
                });
            }
        }

        if board.is_game_over() {
            info!("game over with score {}", board.determine_score());
            ev_game_over.send(GameOverEvent {
                score: board.determine_score(),
            });
        }
    }
}
