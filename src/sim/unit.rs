//! Unit instances, bases and the per-unit blocking timer.

use bevy::prelude::*;

use super::roster::{BlockProfile, SpawnStats, UnitArchetype, UnitKind};
use super::{DEATH_GRACE_SECS, Faction};

/// Stable handle for a spawned unit. Ids are never reused within a match,
/// so a stale id simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct UnitId(pub u32);

/// Behavioural state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum UnitState {
    /// Walking toward the enemy base.
    Advancing,
    /// Locked in a 1:1 fight with an enemy unit.
    Engaged,
    /// Standing at the enemy base, damaging it.
    AttackingBase,
    /// Dead, waiting out the death grace period.
    Dying,
    /// Gone. Pruned from the army at the end of the tick.
    Removed,
}

/// What an engaged unit is hitting. `Base` is always the opposing base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum EngageTarget {
    Unit(UnitId),
    Base,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BlockPhase {
    CoolingDown,
    Blocking,
}

/// Two-phase block cycle. Runs whenever the unit is alive, engaged or not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockTimer {
    pub phase: BlockPhase,
    pub remaining: f32,
    pub profile: BlockProfile,
}

impl BlockTimer {
    /// Starts cooling down. `None` for archetypes that cannot block.
    #[must_use]
    pub fn new(profile: BlockProfile) -> Option<Self> {
        profile.is_capable().then_some(Self {
            phase: BlockPhase::CoolingDown,
            remaining: profile.cooldown_secs,
            profile,
        })
    }

    /// Advances by `dt`. Large steps may cross several phase boundaries.
    pub fn advance(&mut self, dt: f32) {
        self.remaining -= dt;
        while self.remaining <= 0.0 {
            let (phase, length) = match self.phase {
                BlockPhase::CoolingDown => (BlockPhase::Blocking, self.profile.duration_secs),
                BlockPhase::Blocking => (BlockPhase::CoolingDown, self.profile.cooldown_secs),
            };
            self.phase = phase;
            self.remaining += length;
        }
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.phase == BlockPhase::Blocking
    }
}

/// One spawned combatant. All fields are declared up front.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInstance {
    pub id: UnitId,
    pub kind: UnitKind,
    pub faction: Faction,
    pub cost: u32,
    /// Position along the battlefield axis.
    pub position: f32,
    pub half_width: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    /// Damage per second.
    pub damage: f32,
    pub state: UnitState,
    pub target: Option<EngageTarget>,
    pub block: Option<BlockTimer>,
    /// Seconds left in `Dying` before removal.
    pub death_timer: f32,
}

impl UnitInstance {
    #[must_use]
    pub fn new(
        id: UnitId,
        faction: Faction,
        archetype: &UnitArchetype,
        stats: SpawnStats,
        position: f32,
    ) -> Self {
        Self {
            id,
            kind: archetype.kind,
            faction,
            cost: archetype.cost,
            position,
            half_width: archetype.half_width(),
            hp: stats.hp,
            max_hp: stats.hp,
            speed: stats.speed,
            damage: stats.damage,
            state: UnitState::Advancing,
            target: None,
            block: BlockTimer::new(archetype.block),
            death_timer: 0.0,
        }
    }

    /// Can move, fight and be targeted.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(
            self.state,
            UnitState::Advancing | UnitState::Engaged | UnitState::AttackingBase
        )
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.is_alive() && self.block.is_some_and(|timer| timer.is_blocking())
    }

    /// Incoming damage multiplier from an active block.
    #[must_use]
    pub fn mitigation(&self) -> f32 {
        match self.block {
            Some(timer) if self.is_alive() && timer.is_blocking() => 1.0 - timer.profile.reduction,
            _ => 1.0,
        }
    }

    #[must_use]
    pub fn engaged_unit(&self) -> Option<UnitId> {
        match self.target {
            Some(EngageTarget::Unit(id)) => Some(id),
            _ => None,
        }
    }

    /// Whether the two footprints overlap along the axis.
    #[must_use]
    pub fn in_contact(&self, other: &Self) -> bool {
        (self.position - other.position).abs() <= self.half_width + other.half_width
    }

    pub fn engage(&mut self, target: EngageTarget) {
        self.state = match target {
            EngageTarget::Unit(_) => UnitState::Engaged,
            EngageTarget::Base => UnitState::AttackingBase,
        };
        self.target = Some(target);
    }

    /// Drops the current target and resumes walking.
    pub fn release(&mut self) {
        if self.is_alive() {
            self.state = UnitState::Advancing;
        }
        self.target = None;
    }

    /// Subtracts HP, clamped at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        before - self.hp
    }

    /// Enters the death grace period.
    pub fn start_dying(&mut self) {
        self.state = UnitState::Dying;
        self.target = None;
        self.death_timer = DEATH_GRACE_SECS;
    }

    /// Runs block and death timers.
    pub fn advance_timers(&mut self, dt: f32) {
        if self.is_alive() {
            if let Some(timer) = &mut self.block {
                timer.advance(dt);
            }
        } else if self.state == UnitState::Dying {
            self.death_timer -= dt;
            if self.death_timer <= 0.0 {
                self.state = UnitState::Removed;
            }
        }
    }
}

/// One per faction, fixed at the battlefield edge.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Base {
    pub faction: Faction,
    pub position: f32,
    pub hp: f32,
    pub max_hp: f32,
}

impl Base {
    #[must_use]
    pub const fn new(faction: Faction, position: f32, max_hp: f32) -> Self {
        Self {
            faction,
            position,
            hp: max_hp,
            max_hp,
        }
    }

    /// Subtracts HP, clamped at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0.0)).max(0.0);
        before - self.hp
    }

    /// Restores HP up to `max_hp`. Returns the HP actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0.0)).min(self.max_hp);
        self.hp - before
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0.0
    }
}
