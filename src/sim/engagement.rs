//! Pairs opposing units in contact and sends units in range at the enemy base.
//!
//! Pairing rule: player units are visited in id (spawn) order. Each free
//! player unit takes the nearest free enemy unit it overlaps; equal
//! distances go to the lower enemy id. Pairs are mutual and sticky until
//! one side dies or is removed.

use super::{BASE_ATTACK_RANGE, EngageTarget, Faction, MatchState};

pub(super) fn detect_engagements(state: &mut MatchState) {
    release_stale_targets(state);
    pair_units(state);
    engage_bases(state);
}

/// Frees units whose paired opponent is gone or dead.
pub(super) fn release_stale_targets(state: &mut MatchState) {
    for faction in Faction::BOTH {
        let opposing = faction.opposing();
        let stale: Vec<usize> = state
            .units(faction)
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .filter_map(|(index, unit)| {
                let target = unit.engaged_unit()?;
                state
                    .unit(opposing, target)
                    .is_none_or(|other| !other.is_alive())
                    .then_some(index)
            })
            .collect();
        for index in stale {
            state.units_mut(faction)[index].release();
        }
    }
}

fn pair_units(state: &mut MatchState) {
    for player_index in 0..state.units(Faction::Player).len() {
        let player = &state.units(Faction::Player)[player_index];
        if !player.is_alive() || player.engaged_unit().is_some() {
            continue;
        }

        let candidate = state
            .units(Faction::Enemy)
            .iter()
            .enumerate()
            .filter(|(_, enemy)| {
                enemy.is_alive() && enemy.engaged_unit().is_none() && player.in_contact(enemy)
            })
            .min_by(|(_, a), (_, b)| {
                let da = (a.position - player.position).abs();
                let db = (b.position - player.position).abs();
                da.total_cmp(&db).then(a.id.cmp(&b.id))
            })
            .map(|(index, enemy)| (index, enemy.id));

        let Some((enemy_index, enemy_id)) = candidate else {
            continue;
        };
        let player_id = state.units(Faction::Player)[player_index].id;
        state.units_mut(Faction::Player)[player_index].engage(EngageTarget::Unit(enemy_id));
        state.units_mut(Faction::Enemy)[enemy_index].engage(EngageTarget::Unit(player_id));
    }
}

/// Any unit not fighting another unit attacks the enemy base once in range.
/// The base takes any number of attackers.
fn engage_bases(state: &mut MatchState) {
    for faction in Faction::BOTH {
        let base_x = faction.opposing().base_x();
        for unit in state.units_mut(faction).iter_mut() {
            if !unit.is_alive() || unit.engaged_unit().is_some() {
                continue;
            }
            if (unit.position - base_x).abs() <= BASE_ATTACK_RANGE {
                unit.engage(EngageTarget::Base);
            }
        }
    }
}
