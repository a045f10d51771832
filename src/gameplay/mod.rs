//! Bevy host for the battle simulation: match lifecycle, input, view and HUD.
//!
//! The simulation lives in [`ActiveMatch`] and is stepped once per frame by
//! [`advance_match`]. Its event outbox is forwarded as [`MatchMessage`]s.

mod hud;
mod input;
mod view;

pub use input::{PlayerCommand, RequestRejected};

use bevy::prelude::*;
use rand::Rng;

use crate::progress::Progress;
use crate::screens::GameState;
use crate::sim::{Difficulty, MatchConfig, MatchEvent, MatchSnapshot, MatchState, Weather};
use crate::{GameSet, gameplay_running};

// === Resources ===

/// Choices made before a match. `None` fields are rolled at match start.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct MatchSetup {
    pub difficulty: Difficulty,
    /// Requested age, limited to what the player has unlocked.
    pub age: usize,
    pub weather: Option<Weather>,
    pub seed: Option<u64>,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            age: 0,
            weather: None,
            seed: None,
        }
    }
}

impl MatchSetup {
    /// Fills in the random parts and produces the simulation config.
    pub fn resolve(&self, unlocked_age: usize, rng: &mut impl Rng) -> MatchConfig {
        MatchConfig {
            difficulty: self.difficulty,
            age: self.age.min(unlocked_age),
            weather: self.weather.unwrap_or_else(|| Weather::random(rng)),
            seed: self.seed.unwrap_or_else(|| rng.random()),
            enemy_ai: true,
        }
    }
}

/// The match being played. Replaced on every entry into `InGame`.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct ActiveMatch(pub MatchState);

/// Snapshot taken right after this frame's tick. The view and HUD read this
/// instead of rebuilding one each.
#[derive(Resource, Debug, Clone, Deref)]
pub struct LatestSnapshot(pub MatchSnapshot);

// === Messages ===

/// One simulation event, forwarded for the view, HUD and progress tracking.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct MatchMessage(pub MatchEvent);

// === Systems ===

fn start_match(mut commands: Commands, setup: Res<MatchSetup>, progress: Option<Res<Progress>>) {
    let unlocked_age = progress.map_or(0, |progress| progress.unlocked_age);
    let config = setup.resolve(unlocked_age, &mut rand::rng());
    let state = MatchState::new(config);
    commands.insert_resource(LatestSnapshot(state.snapshot()));
    commands.insert_resource(ActiveMatch(state));
}

/// Steps the simulation by this frame's delta, forwards its events and
/// refreshes [`LatestSnapshot`].
pub fn advance_match(
    time: Res<Time>,
    mut active: ResMut<ActiveMatch>,
    mut latest: ResMut<LatestSnapshot>,
    mut messages: MessageWriter<MatchMessage>,
) {
    active.tick(time.delta_secs());
    for event in active.drain_events() {
        messages.write(MatchMessage(event));
    }
    latest.0 = active.snapshot();
}

fn finish_match(active: Res<ActiveMatch>, mut next_state: ResMut<NextState<GameState>>) {
    if active.is_over() {
        next_state.set(GameState::GameOver);
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<MatchSetup>()
        .init_resource::<MatchSetup>()
        .add_message::<MatchMessage>();

    app.add_systems(OnEnter(GameState::InGame), start_match);
    app.add_systems(
        Update,
        (advance_match, finish_match)
            .chain()
            .in_set(GameSet::Simulation)
            .run_if(
                gameplay_running
                    .and(resource_exists::<ActiveMatch>)
                    .and(resource_exists::<LatestSnapshot>),
            ),
    );

    app.add_plugins((input::plugin, view::plugin, hud::plugin));
}
