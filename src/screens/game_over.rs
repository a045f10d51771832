//! Result banner shown once a match has a winner. Enter starts a new match.

use bevy::prelude::*;

use super::GameState;
use crate::gameplay::ActiveMatch;
use crate::sim::MatchOutcome;
use crate::theme::{palette, widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::GameOver), spawn_game_over_screen)
        .add_systems(
            Update,
            handle_restart_input.run_if(in_state(GameState::GameOver)),
        );
}

/// Banner title and color for a finished match.
const fn banner(outcome: MatchOutcome) -> (&'static str, Color) {
    match outcome {
        MatchOutcome::Victory => ("VICTORY!", palette::VICTORY),
        MatchOutcome::Defeat => ("DEFEAT", palette::DEFEAT),
        MatchOutcome::Running => ("MATCH OVER", palette::HEADER_TEXT),
    }
}

fn spawn_game_over_screen(mut commands: Commands, active: Option<Res<ActiveMatch>>) {
    let outcome = active.map_or(MatchOutcome::Defeat, |active| active.outcome());
    let (title, color) = banner(outcome);

    commands.spawn((
        widget::ui_root("Game Over Screen"),
        BackgroundColor(palette::OVERLAY_BACKGROUND),
        GlobalZIndex(1),
        DespawnOnExit(GameState::GameOver),
        children![
            widget::header(title, color),
            widget::label("Press Enter to play again"),
        ],
    ));
}

fn handle_restart_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        info!("Restarting match");
        next_state.set(GameState::InGame);
    }
}
