//! Match-scoped weather: stat multipliers plus the storm's lightning strikes.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::combat::{KillCause, resolve_deaths};
use super::{DamageTarget, Faction, MatchEvent, MatchState, UnitId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Wind,
    Storm,
}

/// Periodic lightning: one random living unit takes flat damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningProfile {
    pub interval_secs: f32,
    pub damage: f32,
}

/// Multipliers applied when unit stats are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherProfile {
    pub speed_mult: f32,
    pub dmg_mult: f32,
    pub archer_dmg_mult: f32,
    pub lightning: Option<LightningProfile>,
}

impl Weather {
    pub const ALL: [Self; 4] = [Self::Clear, Self::Rain, Self::Wind, Self::Storm];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rain => "Rain",
            Self::Wind => "Wind",
            Self::Storm => "Storm",
        }
    }

    #[must_use]
    pub const fn profile(self) -> WeatherProfile {
        match self {
            Self::Clear => WeatherProfile {
                speed_mult: 1.0,
                dmg_mult: 1.0,
                archer_dmg_mult: 1.0,
                lightning: None,
            },
            Self::Rain => WeatherProfile {
                speed_mult: 0.85,
                dmg_mult: 1.0,
                archer_dmg_mult: 0.75,
                lightning: None,
            },
            Self::Wind => WeatherProfile {
                speed_mult: 1.0,
                dmg_mult: 1.0,
                archer_dmg_mult: 0.6,
                lightning: None,
            },
            Self::Storm => WeatherProfile {
                speed_mult: 0.8,
                dmg_mult: 1.1,
                archer_dmg_mult: 0.7,
                lightning: Some(LightningProfile {
                    interval_secs: 8.0,
                    damage: 25.0,
                }),
            },
        }
    }

    /// Rolls a weather uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Countdown for weather events. Idle when the weather has none.
#[derive(Debug, Clone)]
pub(super) struct WeatherClock {
    lightning: Option<(Timer, f32)>,
}

impl WeatherClock {
    pub(super) fn new(profile: &WeatherProfile) -> Self {
        Self {
            lightning: profile.lightning.map(|bolt| {
                (
                    Timer::from_seconds(bolt.interval_secs, TimerMode::Repeating),
                    bolt.damage,
                )
            }),
        }
    }

    /// Returns how many strikes are due and their damage.
    fn tick(&mut self, dt: f32) -> (u32, f32) {
        match &mut self.lightning {
            Some((timer, damage)) => {
                timer.tick(Duration::from_secs_f32(dt));
                (timer.times_finished_this_tick(), *damage)
            }
            None => (0, 0.0),
        }
    }
}

/// Fires any lightning strikes that came due this tick.
pub(super) fn run_weather_events(state: &mut MatchState, dt: f32) {
    let (strikes, damage) = state.weather_clock.tick(dt);
    for _ in 0..strikes {
        let candidates: Vec<(Faction, UnitId)> = Faction::BOTH
            .into_iter()
            .flat_map(|faction| {
                state
                    .units(faction)
                    .iter()
                    .filter(|unit| unit.is_alive())
                    .map(move |unit| (faction, unit.id))
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let (faction, id) = candidates[state.rng.random_range(0..candidates.len())];
        let Some(index) = state.unit_index(faction, id) else {
            continue;
        };

        let dealt = state.units_mut(faction)[index].take_damage(damage);
        state.damage_ledger.record(DamageTarget::Unit(id), dealt);
        state
            .events
            .push(MatchEvent::LightningStrike { id, faction });
        debug!("Lightning struck {faction:?} {id:?} for {dealt:.1}");
        resolve_deaths(state, KillCause::Environment);
    }
}
