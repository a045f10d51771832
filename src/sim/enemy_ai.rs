//! Enemy director: on a fixed interval, spawns a random unit the enemy can afford.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::economy::cost_as_gold;
use super::roster::{UnitKind, archetype};
use super::{Faction, MatchState};

#[derive(Debug, Clone)]
pub(super) struct EnemyDirector {
    spawn_timer: Timer,
}

impl EnemyDirector {
    pub(super) fn new(interval_secs: f32) -> Self {
        Self {
            spawn_timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
        }
    }
}

/// Kinds the enemy can pay for right now, in roster order.
fn affordable_kinds(state: &MatchState) -> Vec<UnitKind> {
    let gold = state.gold(Faction::Enemy);
    UnitKind::ALL
        .into_iter()
        .filter(|kind| cost_as_gold(archetype(*kind).cost) <= gold)
        .collect()
}

pub(super) fn run_director(state: &mut MatchState, dt: f32) {
    let firings = match state.director.as_mut() {
        Some(director) => {
            director.spawn_timer.tick(Duration::from_secs_f32(dt));
            director.spawn_timer.times_finished_this_tick()
        }
        None => return,
    };

    for _ in 0..firings {
        let options = affordable_kinds(state);
        if options.is_empty() {
            debug!(
                "Enemy director skipped: {:.0} gold",
                state.gold(Faction::Enemy)
            );
            continue;
        }
        let kind = options[state.rng.random_range(0..options.len())];
        if let Err(err) = state.try_spawn(Faction::Enemy, kind) {
            debug!("Enemy director spawn of {} failed: {err}", kind.display_name());
        }
    }
}
