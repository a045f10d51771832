//! Lane siege: a two-base, one-lane real-time battler.
//!
//! [`sim`] is the engine-agnostic battle simulation. Everything else is the
//! Bevy host that feeds it input, steps it once per frame and draws it.

pub mod gameplay;
pub mod progress;
pub mod screens;
pub mod sim;
mod theme;
#[cfg(test)]
pub mod testing;

use bevy::prelude::*;

use crate::screens::GameState;

// === Z layers ===

pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_BASE: f32 = 1.0;
pub const Z_UNIT: f32 = 2.0;

/// Per-frame ordering for everything that runs during a match.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard to requests, requests to the simulation.
    Input,
    /// One simulation tick plus event forwarding.
    Simulation,
    /// Sprites and HUD read the fresh snapshot.
    Ui,
}

/// Run condition for systems that should only run while a match is live.
#[must_use]
pub fn gameplay_running(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|state| *state.get() == GameState::InGame)
}

/// Root plugin. `main` adds it on top of `DefaultPlugins`.
pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (GameSet::Input, GameSet::Simulation, GameSet::Ui).chain(),
    );
    app.add_plugins((
        screens::plugin,
        progress::plugin,
        gameplay::plugin,
        theme::plugin,
    ));
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
