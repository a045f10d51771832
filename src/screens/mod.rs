//! Top-level game states and their screens.

mod game_over;
mod loading;

use bevy::prelude::*;

/// Primary game states.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[states(scoped_entities)]
pub enum GameState {
    /// Initial loading state.
    #[default]
    Loading,
    /// A match is being simulated.
    InGame,
    /// The match has a winner and the result banner is up.
    GameOver,
}

pub(super) fn plugin(app: &mut App) {
    app.init_state::<GameState>();
    app.add_plugins((loading::plugin, game_over::plugin));
}
