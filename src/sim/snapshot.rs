//! Read-only view of a match for the rendering layer.

use bevy::prelude::*;

use super::{
    Ability, Faction, InstantAbility, MatchOutcome, MatchState, UnitId, UnitKind, UnitState,
};

/// What a unit looks like it is doing. Blocking wins over the other
/// living states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum UnitBehavior {
    Advancing,
    Engaged,
    Blocking,
    AttackingBase,
    Dying,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: Faction,
    pub position: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub behavior: UnitBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseView {
    pub faction: Faction,
    pub position: f32,
    pub hp: f32,
    pub max_hp: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityView {
    pub ability: Ability,
    pub cost: u32,
    /// Passives only.
    pub owned: bool,
    /// Instants only. Zero when ready.
    pub remaining_cooldown: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub elapsed_secs: f32,
    pub outcome: MatchOutcome,
    pub winner: Option<Faction>,
    pub player_gold: f32,
    pub enemy_gold: f32,
    pub player_base: BaseView,
    pub enemy_base: BaseView,
    /// Every unit not yet removed, player side first.
    pub units: Vec<UnitView>,
    pub abilities: Vec<AbilityView>,
}

impl MatchSnapshot {
    #[must_use]
    pub const fn base(&self, faction: Faction) -> &BaseView {
        match faction {
            Faction::Player => &self.player_base,
            Faction::Enemy => &self.enemy_base,
        }
    }

    #[must_use]
    pub const fn gold(&self, faction: Faction) -> f32 {
        match faction {
            Faction::Player => self.player_gold,
            Faction::Enemy => self.enemy_gold,
        }
    }
}

impl MatchState {
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        let units = Faction::BOTH
            .into_iter()
            .flat_map(|faction| self.units(faction))
            .filter_map(|unit| {
                let behavior = match unit.state {
                    UnitState::Removed => return None,
                    UnitState::Dying => UnitBehavior::Dying,
                    _ if unit.is_blocking() => UnitBehavior::Blocking,
                    UnitState::Advancing => UnitBehavior::Advancing,
                    UnitState::Engaged => UnitBehavior::Engaged,
                    UnitState::AttackingBase => UnitBehavior::AttackingBase,
                };
                Some(UnitView {
                    id: unit.id,
                    kind: unit.kind,
                    faction: unit.faction,
                    position: unit.position,
                    hp: unit.hp,
                    max_hp: unit.max_hp,
                    behavior,
                })
            })
            .collect();

        let abilities = Ability::ALL
            .into_iter()
            .map(|ability| AbilityView {
                ability,
                cost: ability.cost(),
                owned: match ability {
                    Ability::Passive(passive) => self.abilities.is_owned(passive),
                    Ability::Instant(_) => false,
                },
                remaining_cooldown: match ability {
                    Ability::Instant(instant) => self.abilities.remaining_cooldown(instant),
                    Ability::Passive(_) => 0.0,
                },
            })
            .collect();

        let base_view = |faction: Faction| {
            let base = self.base(faction);
            BaseView {
                faction,
                position: base.position,
                hp: base.hp,
                max_hp: base.max_hp,
            }
        };

        MatchSnapshot {
            elapsed_secs: self.elapsed_secs,
            outcome: self.outcome,
            winner: self.winner(),
            player_gold: self.gold(Faction::Player),
            enemy_gold: self.gold(Faction::Enemy),
            player_base: base_view(Faction::Player),
            enemy_base: base_view(Faction::Enemy),
            units,
            abilities,
        }
    }

    /// Whether the player could fire this instant right now.
    #[must_use]
    pub fn instant_ready(&self, ability: InstantAbility) -> bool {
        !self.is_over()
            && self.abilities.remaining_cooldown(ability) <= 0.0
            && self
                .economy(Faction::Player)
                .can_afford(super::economy::cost_as_gold(ability.cost()))
    }
}
