//! Testing utilities for Bevy systems.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::screens::GameState;
use crate::sim::{Faction, MatchConfig, MatchState};

/// Minimal app with states and keyboard input, no rendering.
pub fn create_base_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.configure_sets(
        Update,
        (
            crate::GameSet::Input,
            crate::GameSet::Simulation,
            crate::GameSet::Ui,
        )
            .chain(),
    );
    app
}

/// Base app plus the gameplay plugin, with progress kept off disk.
pub fn create_gameplay_test_app() -> App {
    let mut app = create_base_test_app();
    app.insert_resource(crate::progress::ProgressFile(None));
    app.init_resource::<crate::progress::Progress>();
    app.add_plugins(crate::gameplay::plugin);
    app
}

/// Moves the app into `InGame` and runs the enter schedule.
pub fn transition_to_ingame(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Asserts how many entities match a query filter.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let mut query = app.world_mut().query_filtered::<Entity, F>();
    let count = query.iter(app.world()).count();
    assert_eq!(
        count, expected,
        "expected {expected} entities, found {count}"
    );
}

/// A match whose player base is already at 0 HP. The next tick ends it.
pub fn doomed_match() -> MatchState {
    let mut state = MatchState::new(MatchConfig {
        enemy_ai: false,
        ..MatchConfig::default()
    });
    state.set_base_hp(Faction::Player, 0.0);
    state
}
