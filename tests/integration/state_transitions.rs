//! Tests for game state transitions.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use lane_siege::gameplay::ActiveMatch;
use lane_siege::progress::ProgressFile;
use lane_siege::screens::GameState;
use pretty_assertions::assert_eq;

fn create_game_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(InputPlugin);
    app.insert_resource(ProgressFile(None));
    app.add_plugins(lane_siege::plugin);
    app
}

fn current_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

#[test]
fn game_initializes_in_loading_state() {
    let app = create_game_app();
    assert_eq!(current_state(&app), GameState::Loading);
}

#[test]
fn loading_moves_straight_into_a_match() {
    let mut app = create_game_app();
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::InGame);
    assert!(app.world().contains_resource::<ActiveMatch>());
}

#[test]
fn can_transition_to_game_over() {
    let mut app = create_game_app();
    app.update();
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::GameOver);
    app.update();

    assert_eq!(current_state(&app), GameState::GameOver);
}
