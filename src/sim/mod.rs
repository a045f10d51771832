//! Battle simulation core: a 1D two-lane siege match stepped by the host.
//!
//! Everything in this module is plain data plus free functions over
//! [`MatchState`]. The host calls [`MatchState::try_spawn`], the ability
//! purchases, [`MatchState::tick`] once per frame, and reads back
//! [`MatchState::snapshot`] and [`MatchState::drain_events`].
//!
//! Tick order: movement, engagement, combat (damage, deaths, bases),
//! economy, ability cooldowns, enemy director, weather events, reporting.

pub mod abilities;
pub mod combat;
pub mod economy;
pub mod enemy_ai;
pub mod engagement;
pub mod events;
pub mod movement;
pub mod roster;
pub mod snapshot;
pub mod unit;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use abilities::{Ability, AbilityBook, InstantAbility, PassiveAbility, PurchaseError};
pub use economy::{Economy, bounty_for};
pub use events::{DamageLedger, DamageTarget, MatchEvent};
pub use roster::{
    AgeProfile, BlockProfile, Difficulty, DifficultyProfile, SpawnStats, UnitArchetype, UnitKind,
    age_profile, archetype, derive_stats,
};
pub use snapshot::{AbilityView, BaseView, MatchSnapshot, UnitBehavior, UnitView};
pub use unit::{Base, BlockPhase, BlockTimer, EngageTarget, UnitId, UnitInstance, UnitState};
pub use weather::{Weather, WeatherProfile};

use enemy_ai::EnemyDirector;
use weather::WeatherClock;

// === Constants ===

/// Length of the battlefield axis (world units).
pub const BATTLEFIELD_LENGTH: f32 = 2000.0;

/// Player base position (left edge).
pub const PLAYER_BASE_X: f32 = 60.0;

/// Enemy base position (right edge).
pub const ENEMY_BASE_X: f32 = BATTLEFIELD_LENGTH - 60.0;

/// Where freshly spawned player units appear.
pub const PLAYER_SPAWN_X: f32 = 100.0;

/// Where freshly spawned enemy units appear.
pub const ENEMY_SPAWN_X: f32 = BATTLEFIELD_LENGTH - 100.0;

/// Distance from the enemy base at which a unit starts hitting it.
pub const BASE_ATTACK_RANGE: f32 = 60.0;

/// Seconds a dead unit stays in `Dying` before it is removed.
pub const DEATH_GRACE_SECS: f32 = 0.6;

/// Largest step a single `tick` will simulate.
pub const MAX_TICK_SECS: f32 = 0.1;

// === Faction ===

/// Which side a unit, base or economy belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub const BOTH: [Self; 2] = [Self::Player, Self::Enemy];

    #[must_use]
    pub const fn opposing(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// Sign of travel along the battlefield axis.
    #[must_use]
    pub const fn direction(self) -> f32 {
        match self {
            Self::Player => 1.0,
            Self::Enemy => -1.0,
        }
    }

    #[must_use]
    pub const fn spawn_x(self) -> f32 {
        match self {
            Self::Player => PLAYER_SPAWN_X,
            Self::Enemy => ENEMY_SPAWN_X,
        }
    }

    #[must_use]
    pub const fn base_x(self) -> f32 {
        match self {
            Self::Player => PLAYER_BASE_X,
            Self::Enemy => ENEMY_BASE_X,
        }
    }
}

// === Match lifecycle ===

/// Global match state. `Victory`/`Defeat` are from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum MatchOutcome {
    #[default]
    Running,
    Victory,
    Defeat,
}

impl MatchOutcome {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Running)
    }

    #[must_use]
    pub const fn winner(self) -> Option<Faction> {
        match self {
            Self::Running => None,
            Self::Victory => Some(Faction::Player),
            Self::Defeat => Some(Faction::Enemy),
        }
    }
}

/// Read-only parameters chosen before the match starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    pub difficulty: Difficulty,
    /// Index into the age table; out-of-range values use the last age.
    pub age: usize,
    pub weather: Weather,
    pub seed: u64,
    /// Whether the enemy director spawns units on its own.
    pub enemy_ai: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            age: 0,
            weather: Weather::Clear,
            seed: 0,
            enemy_ai: true,
        }
    }
}

// === Errors ===

/// Why a spawn request was refused. No state changes on rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnError {
    InsufficientFunds { cost: u32, available: f32 },
    MatchEnded,
}

impl SpawnError {
    #[must_use]
    pub const fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds { cost, available } => {
                write!(f, "not enough gold: need {cost}, have {available:.0}")
            }
            Self::MatchEnded => f.write_str("the match is over"),
        }
    }
}

impl std::error::Error for SpawnError {}

// === MatchState ===

/// Owns every piece of per-match state: both economies, both bases and
/// both armies. The controller operates on `&mut MatchState` each tick.
#[derive(Debug)]
pub struct MatchState {
    config: MatchConfig,
    difficulty: DifficultyProfile,
    age: AgeProfile,
    weather: WeatherProfile,
    outcome: MatchOutcome,
    elapsed_secs: f32,
    player_economy: Economy,
    enemy_economy: Economy,
    player_base: Base,
    enemy_base: Base,
    player_units: Vec<UnitInstance>,
    enemy_units: Vec<UnitInstance>,
    abilities: AbilityBook,
    director: Option<EnemyDirector>,
    weather_clock: WeatherClock,
    damage_ledger: DamageLedger,
    events: Vec<MatchEvent>,
    next_unit_id: u32,
    rng: StdRng,
}

impl MatchState {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let difficulty = config.difficulty.profile();
        let age = age_profile(config.age);
        let weather = config.weather.profile();

        info!(
            "Match started: difficulty={}, age={}, weather={}",
            config.difficulty.label(),
            age.name,
            config.weather.label()
        );

        Self {
            config,
            difficulty,
            age,
            weather,
            outcome: MatchOutcome::Running,
            elapsed_secs: 0.0,
            player_economy: Economy::new(difficulty.start_gold, difficulty.player_gold_per_sec),
            enemy_economy: Economy::new(difficulty.start_gold, difficulty.enemy_gold_per_sec),
            player_base: Base::new(Faction::Player, PLAYER_BASE_X, age.player_base_hp),
            enemy_base: Base::new(Faction::Enemy, ENEMY_BASE_X, age.enemy_base_hp),
            player_units: Vec::new(),
            enemy_units: Vec::new(),
            abilities: AbilityBook::default(),
            director: config
                .enemy_ai
                .then(|| EnemyDirector::new(difficulty.enemy_spawn_interval_secs)),
            weather_clock: WeatherClock::new(&weather),
            damage_ledger: DamageLedger::default(),
            events: Vec::new(),
            next_unit_id: 0,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    // --- Queries ---

    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub const fn age(&self) -> &AgeProfile {
        &self.age
    }

    #[must_use]
    pub const fn difficulty(&self) -> &DifficultyProfile {
        &self.difficulty
    }

    #[must_use]
    pub const fn weather(&self) -> &WeatherProfile {
        &self.weather
    }

    #[must_use]
    pub const fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Faction> {
        self.outcome.winner()
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    #[must_use]
    pub const fn economy(&self, faction: Faction) -> &Economy {
        match faction {
            Faction::Player => &self.player_economy,
            Faction::Enemy => &self.enemy_economy,
        }
    }

    #[must_use]
    pub const fn gold(&self, faction: Faction) -> f32 {
        self.economy(faction).gold()
    }

    #[must_use]
    pub const fn base(&self, faction: Faction) -> &Base {
        match faction {
            Faction::Player => &self.player_base,
            Faction::Enemy => &self.enemy_base,
        }
    }

    #[must_use]
    pub fn units(&self, faction: Faction) -> &[UnitInstance] {
        match faction {
            Faction::Player => &self.player_units,
            Faction::Enemy => &self.enemy_units,
        }
    }

    /// Looks up a unit that has not been pruned yet. Removed ids resolve to `None`.
    #[must_use]
    pub fn unit(&self, faction: Faction, id: UnitId) -> Option<&UnitInstance> {
        self.units(faction)
            .iter()
            .find(|unit| unit.id == id && unit.state != UnitState::Removed)
    }

    #[must_use]
    pub const fn abilities(&self) -> &AbilityBook {
        &self.abilities
    }

    // --- Requests ---

    /// Spends gold and places a new unit at its faction's spawn point.
    ///
    /// # Errors
    ///
    /// Rejects without touching any state when the match is over or the
    /// faction cannot afford the archetype.
    pub fn try_spawn(&mut self, faction: Faction, kind: UnitKind) -> Result<UnitId, SpawnError> {
        if self.is_over() {
            return Err(SpawnError::MatchEnded);
        }

        let template = archetype(kind);
        let economy = self.economy_mut(faction);
        let available = economy.gold();
        if !economy.try_spend(economy::cost_as_gold(template.cost)) {
            debug!("{faction:?} cannot afford {} ({available:.0} gold)", kind.display_name());
            return Err(SpawnError::InsufficientFunds {
                cost: template.cost,
                available,
            });
        }

        let stats = derive_stats(
            &template,
            faction,
            &self.age,
            &self.difficulty,
            &self.weather,
            self.speed_passive_mult(faction),
        );
        let id = self.allocate_id();
        self.units_mut(faction).push(UnitInstance::new(
            id,
            faction,
            &template,
            stats,
            faction.spawn_x(),
        ));
        self.events.push(MatchEvent::UnitSpawned { id, faction, kind });
        debug!("{faction:?} spawned {} as {id:?}", kind.display_name());
        Ok(id)
    }

    /// Advances the match by `elapsed_secs`, clamped to [`MAX_TICK_SECS`].
    /// A finished match ignores ticks entirely.
    pub fn tick(&mut self, elapsed_secs: f32) {
        if self.is_over() {
            return;
        }
        let dt = clamp_tick(elapsed_secs);
        if dt <= 0.0 {
            return;
        }
        self.elapsed_secs += dt;

        movement::advance_units(self, dt);
        engagement::detect_engagements(self);
        combat::resolve_combat(self, dt);

        if self.is_over() {
            self.damage_ledger.flush_all(&mut self.events);
            return;
        }

        self.player_economy.accrue_income(dt);
        self.enemy_economy.accrue_income(dt);
        self.abilities.tick(dt);
        enemy_ai::run_director(self, dt);
        weather::run_weather_events(self, dt);

        self.damage_ledger.flush(dt, &mut self.events);
        self.prune_removed();
    }

    /// Takes every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Internals shared by the phase modules ---

    fn economy_mut(&mut self, faction: Faction) -> &mut Economy {
        match faction {
            Faction::Player => &mut self.player_economy,
            Faction::Enemy => &mut self.enemy_economy,
        }
    }

    fn base_mut(&mut self, faction: Faction) -> &mut Base {
        match faction {
            Faction::Player => &mut self.player_base,
            Faction::Enemy => &mut self.enemy_base,
        }
    }

    fn units_mut(&mut self, faction: Faction) -> &mut Vec<UnitInstance> {
        match faction {
            Faction::Player => &mut self.player_units,
            Faction::Enemy => &mut self.enemy_units,
        }
    }

    fn unit_index(&self, faction: Faction, id: UnitId) -> Option<usize> {
        self.units(faction)
            .iter()
            .position(|unit| unit.id == id && unit.state != UnitState::Removed)
    }

    fn speed_passive_mult(&self, faction: Faction) -> f32 {
        match faction {
            Faction::Player => self.abilities.speed_multiplier(),
            Faction::Enemy => 1.0,
        }
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Declares the outcome once. Later calls are ignored.
    fn finish(&mut self, outcome: MatchOutcome) {
        if self.is_over() || !outcome.is_over() {
            return;
        }
        self.outcome = outcome;
        info!("Match ended after {:.1}s: {outcome:?}", self.elapsed_secs);
        self.events.push(MatchEvent::MatchEnded { outcome });
        if outcome == MatchOutcome::Victory {
            self.events.push(MatchEvent::AgeCompleted {
                age: self.config.age,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn set_base_hp(&mut self, faction: Faction, hp: f32) {
        let base = self.base_mut(faction);
        base.hp = hp.clamp(0.0, base.max_hp);
    }

    fn prune_removed(&mut self) {
        for faction in Faction::BOTH {
            let removed: Vec<UnitId> = self
                .units(faction)
                .iter()
                .filter(|unit| unit.state == UnitState::Removed)
                .map(|unit| unit.id)
                .collect();
            if removed.is_empty() {
                continue;
            }
            self.units_mut(faction)
                .retain(|unit| unit.state != UnitState::Removed);
            for id in removed {
                self.damage_ledger.forget(DamageTarget::Unit(id));
                self.events.push(MatchEvent::UnitRemoved { id, faction });
            }
        }
    }
}

/// Clamps a host frame time into a safe simulation step.
#[must_use]
pub fn clamp_tick(elapsed_secs: f32) -> f32 {
    if elapsed_secs.is_nan() {
        return 0.0;
    }
    elapsed_secs.clamp(0.0, MAX_TICK_SECS)
}
