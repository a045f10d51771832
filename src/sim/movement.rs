//! Advancing units walk toward the opposing base; everyone else stands still.

use super::{BATTLEFIELD_LENGTH, Faction, MatchState, UnitState};

pub(super) fn advance_units(state: &mut MatchState, dt: f32) {
    for faction in Faction::BOTH {
        let direction = faction.direction();
        for unit in state.units_mut(faction).iter_mut() {
            if unit.state != UnitState::Advancing {
                continue;
            }
            unit.position =
                (unit.position + direction * unit.speed * dt).clamp(0.0, BATTLEFIELD_LENGTH);
        }
    }
}
