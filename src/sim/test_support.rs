//! Builders shared by the simulation unit tests.

use super::roster::{UnitKind, archetype};
use super::{BlockProfile, Faction, MatchConfig, MatchState, SpawnStats, UnitId, UnitInstance};

/// Medium difficulty, first age, clear skies and no enemy director.
pub(crate) fn quiet_match() -> MatchState {
    quiet_match_with(MatchConfig {
        enemy_ai: false,
        ..MatchConfig::default()
    })
}

pub(crate) fn quiet_match_with(config: MatchConfig) -> MatchState {
    MatchState::new(config)
}

/// Places a non-blocking unit with explicit stats, bypassing the economy.
/// It walks at 50 per second and is 24 wide.
pub(crate) fn place_custom_unit(
    state: &mut MatchState,
    faction: Faction,
    hp: f32,
    damage: f32,
    position: f32,
) -> UnitId {
    let mut template = archetype(UnitKind::Warrior);
    template.block = BlockProfile::NONE;
    let stats = SpawnStats {
        hp,
        damage,
        speed: 50.0,
    };
    let id = state.allocate_id();
    state
        .units_mut(faction)
        .push(UnitInstance::new(id, faction, &template, stats, position));
    id
}

/// Places a catalog unit with unscaled stats, bypassing the economy.
pub(crate) fn place_unit(
    state: &mut MatchState,
    faction: Faction,
    kind: UnitKind,
    position: f32,
) -> UnitId {
    let template = archetype(kind);
    let stats = SpawnStats {
        hp: template.hp,
        damage: template.damage,
        speed: template.speed,
    };
    let id = state.allocate_id();
    state
        .units_mut(faction)
        .push(UnitInstance::new(id, faction, &template, stats, position));
    id
}
