//! Damage exchange between engaged units and against bases, deaths, bounties
//! and the terminal base check.
//!
//! Attacks within a tick are simultaneous: every attacker alive at the start
//! of the phase strikes, even if it is killed by the same exchange. The
//! strike that destroys a base ends the match and nothing after it lands.

use super::economy::{bounty_for, cost_as_gold};
use super::{DamageTarget, EngageTarget, Faction, MatchEvent, MatchOutcome, MatchState, UnitId};
use bevy::prelude::*;

/// What killed a unit. Only combat and ability kills of enemy units pay bounty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KillCause {
    Combat,
    Ability,
    Environment,
}

impl KillCause {
    const fn pays_bounty(self) -> bool {
        matches!(self, Self::Combat | Self::Ability)
    }
}

#[derive(Debug, Clone, Copy)]
struct Strike {
    attacker: Faction,
    target: EngageTarget,
    amount: f32,
}

/// Enemy strikes are applied first, so a tick in which both bases would
/// fall ends in defeat.
const STRIKE_ORDER: [Faction; 2] = [Faction::Enemy, Faction::Player];

pub(super) fn resolve_combat(state: &mut MatchState, dt: f32) {
    let strikes: Vec<Strike> = STRIKE_ORDER
        .into_iter()
        .flat_map(|attacker| {
            state
                .units(attacker)
                .iter()
                .filter(|unit| unit.is_alive())
                .filter_map(move |unit| {
                    unit.target.map(|target| Strike {
                        attacker,
                        target,
                        amount: unit.damage * dt,
                    })
                })
        })
        .collect();

    for strike in strikes {
        if apply_strike(state, strike) {
            end_on_destroyed_base(state);
            return;
        }
    }

    for faction in Faction::BOTH {
        for unit in state.units_mut(faction).iter_mut() {
            unit.advance_timers(dt);
        }
    }

    resolve_deaths(state, KillCause::Combat);
}

/// Applies one strike. Returns `true` if it destroyed a base.
fn apply_strike(state: &mut MatchState, strike: Strike) -> bool {
    let defender = strike.attacker.opposing();
    match strike.target {
        EngageTarget::Unit(id) => {
            let Some(index) = state.unit_index(defender, id) else {
                return false;
            };
            let target = &mut state.units_mut(defender)[index];
            if !target.is_alive() {
                return false;
            }
            let dealt = target.take_damage(strike.amount * target.mitigation());
            state.damage_ledger.record(DamageTarget::Unit(id), dealt);
            false
        }
        EngageTarget::Base => {
            let base = state.base_mut(defender);
            let dealt = base.take_damage(strike.amount);
            let destroyed = base.is_destroyed();
            state
                .damage_ledger
                .record(DamageTarget::Base(defender), dealt);
            destroyed
        }
    }
}

/// Moves every living unit at 0 HP into `Dying`, pays bounty and frees
/// whoever was fighting it.
pub(super) fn resolve_deaths(state: &mut MatchState, cause: KillCause) {
    for faction in Faction::BOTH {
        let dead: Vec<(usize, UnitId, u32)> = state
            .units(faction)
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive() && unit.hp <= 0.0)
            .map(|(index, unit)| (index, unit.id, unit.cost))
            .collect();

        for (index, id, cost) in dead {
            state.units_mut(faction)[index].start_dying();
            let bounty = if faction == Faction::Enemy && cause.pays_bounty() {
                bounty_for(cost)
            } else {
                0
            };
            if bounty > 0 {
                state
                    .economy_mut(Faction::Player)
                    .award_bounty(cost_as_gold(bounty));
            }
            debug!("{faction:?} {id:?} killed ({cause:?}), bounty {bounty}");
            state
                .events
                .push(MatchEvent::UnitKilled { id, faction, bounty });
        }
    }
    super::engagement::release_stale_targets(state);
}

fn end_on_destroyed_base(state: &mut MatchState) {
    if state.base(Faction::Player).is_destroyed() {
        state.finish(MatchOutcome::Defeat);
    } else if state.base(Faction::Enemy).is_destroyed() {
        state.finish(MatchOutcome::Victory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::{place_custom_unit, place_unit, quiet_match};
    use crate::sim::{ENEMY_BASE_X, PLAYER_BASE_X, UnitKind, UnitState};
    use pretty_assertions::assert_eq;

    fn engage_pair(state: &mut MatchState, player: UnitId, enemy: UnitId) {
        let p = state.unit_index(Faction::Player, player).unwrap();
        let e = state.unit_index(Faction::Enemy, enemy).unwrap();
        state.units_mut(Faction::Player)[p].engage(EngageTarget::Unit(enemy));
        state.units_mut(Faction::Enemy)[e].engage(EngageTarget::Unit(player));
    }

    #[test]
    fn blocking_halves_incoming_damage() {
        let mut state = quiet_match();
        let attacker = place_custom_unit(&mut state, Faction::Enemy, 100.0, 10.0, 1010.0);
        let warrior = place_unit(&mut state, Faction::Player, UnitKind::Warrior, 1000.0);
        engage_pair(&mut state, warrior, attacker);

        let index = state.unit_index(Faction::Player, warrior).unwrap();
        state.units_mut(Faction::Player)[index].advance_timers(4.0);
        assert!(state.unit(Faction::Player, warrior).unwrap().is_blocking());
        let before = state.unit(Faction::Player, warrior).unwrap().hp;

        resolve_combat(&mut state, 0.1);

        let after = state.unit(Faction::Player, warrior).unwrap().hp;
        assert!((before - after - 0.5).abs() < 1e-5, "lost {}", before - after);
    }

    #[test]
    fn enemy_kill_pays_bounty_to_player_only() {
        let mut state = quiet_match();
        let player = place_custom_unit(&mut state, Faction::Player, 50.0, 100.0, 1000.0);
        let enemy = place_unit(&mut state, Faction::Enemy, UnitKind::Warrior, 1010.0);
        engage_pair(&mut state, player, enemy);
        let player_gold = state.gold(Faction::Player);
        let enemy_gold = state.gold(Faction::Enemy);

        // 100 dps over one second beats 50 hp even through a block.
        for _ in 0..10 {
            resolve_combat(&mut state, 0.1);
        }

        assert_eq!(
            state.unit(Faction::Enemy, enemy).unwrap().state,
            UnitState::Dying
        );
        assert_eq!(state.gold(Faction::Player), player_gold + 10.0);
        assert_eq!(state.gold(Faction::Enemy), enemy_gold);
    }

    #[test]
    fn player_unit_death_pays_nothing() {
        let mut state = quiet_match();
        let player = place_custom_unit(&mut state, Faction::Player, 1.0, 1.0, 1000.0);
        let enemy = place_custom_unit(&mut state, Faction::Enemy, 50.0, 100.0, 1010.0);
        engage_pair(&mut state, player, enemy);
        let gold = (state.gold(Faction::Player), state.gold(Faction::Enemy));

        resolve_combat(&mut state, 0.1);

        assert_eq!(
            state.unit(Faction::Player, player).unwrap().state,
            UnitState::Dying
        );
        assert_eq!((state.gold(Faction::Player), state.gold(Faction::Enemy)), gold);
    }

    #[test]
    fn killer_is_released_to_advance() {
        let mut state = quiet_match();
        let player = place_custom_unit(&mut state, Faction::Player, 50.0, 100.0, 1000.0);
        let enemy = place_custom_unit(&mut state, Faction::Enemy, 5.0, 1.0, 1010.0);
        engage_pair(&mut state, player, enemy);

        resolve_combat(&mut state, 0.1);

        let unit = state.unit(Faction::Player, player).unwrap();
        assert_eq!(unit.state, UnitState::Advancing);
        assert_eq!(unit.target, None);
    }

    #[test]
    fn mutual_kill_in_one_tick() {
        let mut state = quiet_match();
        let player = place_custom_unit(&mut state, Faction::Player, 1.0, 100.0, 1000.0);
        let enemy = place_custom_unit(&mut state, Faction::Enemy, 1.0, 100.0, 1010.0);
        engage_pair(&mut state, player, enemy);

        resolve_combat(&mut state, 0.1);

        assert_eq!(
            state.unit(Faction::Player, player).unwrap().state,
            UnitState::Dying
        );
        assert_eq!(
            state.unit(Faction::Enemy, enemy).unwrap().state,
            UnitState::Dying
        );
    }

    #[test]
    fn hp_never_drops_below_zero() {
        let mut state = quiet_match();
        let player = place_custom_unit(&mut state, Faction::Player, 1.0, 1.0, 1000.0);
        let enemy = place_custom_unit(&mut state, Faction::Enemy, 50.0, 1000.0, 1010.0);
        engage_pair(&mut state, player, enemy);

        resolve_combat(&mut state, 0.1);

        assert_eq!(state.unit(Faction::Player, player).unwrap().hp, 0.0);
    }

    #[test]
    fn destroying_enemy_base_is_victory() {
        let mut state = quiet_match();
        let id = place_custom_unit(&mut state, Faction::Player, 50.0, 10_000.0, ENEMY_BASE_X - 30.0);
        let index = state.unit_index(Faction::Player, id).unwrap();
        state.units_mut(Faction::Player)[index].engage(EngageTarget::Base);

        resolve_combat(&mut state, 0.1);

        assert_eq!(state.outcome(), MatchOutcome::Victory);
        assert_eq!(state.base(Faction::Enemy).hp, 0.0);
    }

    #[test]
    fn double_destruction_is_a_defeat() {
        let mut state = quiet_match();
        let p = place_custom_unit(&mut state, Faction::Player, 50.0, 10_000.0, ENEMY_BASE_X - 30.0);
        let e = place_custom_unit(&mut state, Faction::Enemy, 50.0, 10_000.0, PLAYER_BASE_X + 30.0);
        for (faction, id) in [(Faction::Player, p), (Faction::Enemy, e)] {
            let index = state.unit_index(faction, id).unwrap();
            state.units_mut(faction)[index].engage(EngageTarget::Base);
        }

        resolve_combat(&mut state, 0.1);

        assert_eq!(state.outcome(), MatchOutcome::Defeat);
        assert!(state.base(Faction::Player).is_destroyed());
        assert_eq!(state.base(Faction::Enemy).hp, state.base(Faction::Enemy).max_hp);
    }

    #[test]
    fn nothing_lands_after_the_base_falls() {
        let mut state = quiet_match();
        state.set_base_hp(Faction::Enemy, 1.0);
        let sieger = place_custom_unit(&mut state, Faction::Player, 50.0, 20.0, ENEMY_BASE_X - 50.0);
        let index = state.unit_index(Faction::Player, sieger).unwrap();
        state.units_mut(Faction::Player)[index].engage(EngageTarget::Base);
        let brawler = place_custom_unit(&mut state, Faction::Player, 50.0, 1000.0, 1000.0);
        let victim = place_custom_unit(&mut state, Faction::Enemy, 5.0, 30.0, 1010.0);
        engage_pair(&mut state, brawler, victim);
        let gold = state.gold(Faction::Player);

        resolve_combat(&mut state, 0.1);

        assert_eq!(state.outcome(), MatchOutcome::Victory);
        let victim = state.unit(Faction::Enemy, victim).unwrap();
        assert_eq!(victim.hp, 5.0);
        assert!(victim.is_alive());
        assert_eq!(state.gold(Faction::Player), gold);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|event| matches!(event, MatchEvent::UnitKilled { .. }))
        );
    }

    #[test]
    fn damage_is_reported_to_the_ledger() {
        let mut state = quiet_match();
        let id = place_custom_unit(&mut state, Faction::Player, 50.0, 20.0, ENEMY_BASE_X - 30.0);
        let index = state.unit_index(Faction::Player, id).unwrap();
        state.units_mut(Faction::Player)[index].engage(EngageTarget::Base);

        resolve_combat(&mut state, 0.1);

        let pending = state
            .damage_ledger
            .pending(DamageTarget::Base(Faction::Enemy));
        assert!((pending - 2.0).abs() < 1e-5);
    }
}
