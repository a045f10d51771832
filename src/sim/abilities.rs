//! Player abilities: instants on a cooldown and one-time passive upgrades.

use std::fmt;

use bevy::prelude::*;

use super::combat::{KillCause, resolve_deaths};
use super::economy::cost_as_gold;
use super::{DamageTarget, Faction, MatchEvent, MatchState};

// === Catalog ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InstantAbility {
    /// Flat damage to every living enemy unit.
    Meteor,
    /// Flat heal to the player base.
    Repair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PassiveAbility {
    /// Unit speed multiplier.
    Swiftness,
    /// Gold income multiplier.
    Prosperity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Ability {
    Instant(InstantAbility),
    Passive(PassiveAbility),
}

impl InstantAbility {
    pub const ALL: [Self; 2] = [Self::Meteor, Self::Repair];

    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Meteor => 100,
            Self::Repair => 75,
        }
    }

    #[must_use]
    pub const fn cooldown_secs(self) -> f32 {
        match self {
            Self::Meteor => 30.0,
            Self::Repair => 45.0,
        }
    }

    /// Damage dealt or HP restored.
    #[must_use]
    pub const fn magnitude(self) -> f32 {
        match self {
            Self::Meteor => 40.0,
            Self::Repair => 150.0,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Meteor => 0,
            Self::Repair => 1,
        }
    }
}

impl PassiveAbility {
    pub const ALL: [Self; 2] = [Self::Swiftness, Self::Prosperity];

    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Swiftness => 150,
            Self::Prosperity => 200,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Swiftness => 1.25,
            Self::Prosperity => 1.5,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Swiftness => 0,
            Self::Prosperity => 1,
        }
    }
}

impl Ability {
    /// Shop order.
    pub const ALL: [Self; 4] = [
        Self::Instant(InstantAbility::Meteor),
        Self::Instant(InstantAbility::Repair),
        Self::Passive(PassiveAbility::Swiftness),
        Self::Passive(PassiveAbility::Prosperity),
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Instant(InstantAbility::Meteor) => "Meteor",
            Self::Instant(InstantAbility::Repair) => "Repair",
            Self::Passive(PassiveAbility::Swiftness) => "Swiftness",
            Self::Passive(PassiveAbility::Prosperity) => "Prosperity",
        }
    }

    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Instant(instant) => instant.cost(),
            Self::Passive(passive) => passive.cost(),
        }
    }
}

// === Runtime state ===

/// Cooldowns and ownership, reset with every match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityBook {
    cooldowns: [f32; 2],
    owned: [bool; 2],
}

impl AbilityBook {
    #[must_use]
    pub const fn remaining_cooldown(&self, ability: InstantAbility) -> f32 {
        self.cooldowns[ability.index()]
    }

    #[must_use]
    pub const fn is_owned(&self, ability: PassiveAbility) -> bool {
        self.owned[ability.index()]
    }

    #[must_use]
    pub const fn speed_multiplier(&self) -> f32 {
        if self.is_owned(PassiveAbility::Swiftness) {
            PassiveAbility::Swiftness.multiplier()
        } else {
            1.0
        }
    }

    /// Counts every cooldown down toward zero.
    pub fn tick(&mut self, dt: f32) {
        for remaining in &mut self.cooldowns {
            *remaining = (*remaining - dt).max(0.0);
        }
    }
}

// === Errors ===

/// Why a purchase was refused. No state changes on rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseError {
    InsufficientFunds { cost: u32, available: f32 },
    OnCooldown { remaining: f32 },
    AlreadyOwned,
    MatchEnded,
}

impl PurchaseError {
    #[must_use]
    pub const fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds { cost, available } => {
                write!(f, "not enough gold: need {cost}, have {available:.0}")
            }
            Self::OnCooldown { remaining } => write!(f, "on cooldown for {remaining:.1}s"),
            Self::AlreadyOwned => f.write_str("already owned"),
            Self::MatchEnded => f.write_str("the match is over"),
        }
    }
}

impl std::error::Error for PurchaseError {}

// === Purchases ===

impl MatchState {
    /// Dispatches to [`Self::purchase_instant`] or [`Self::purchase_passive`].
    ///
    /// # Errors
    ///
    /// See the two typed purchase functions.
    pub fn purchase(&mut self, ability: Ability) -> Result<(), PurchaseError> {
        match ability {
            Ability::Instant(instant) => self.purchase_instant(instant),
            Ability::Passive(passive) => self.purchase_passive(passive),
        }
    }

    /// Buys and fires an instant ability for the player.
    ///
    /// # Errors
    ///
    /// Rejects when the match is over, the ability is cooling down or the
    /// player cannot afford it.
    pub fn purchase_instant(&mut self, ability: InstantAbility) -> Result<(), PurchaseError> {
        if self.is_over() {
            return Err(PurchaseError::MatchEnded);
        }
        let remaining = self.abilities.remaining_cooldown(ability);
        if remaining > 0.0 {
            return Err(PurchaseError::OnCooldown { remaining });
        }
        self.spend_on(ability.cost())?;

        match ability {
            InstantAbility::Meteor => self.strike_all_enemies(ability.magnitude()),
            InstantAbility::Repair => {
                let healed = self.base_mut(Faction::Player).heal(ability.magnitude());
                debug!("Repair restored {healed:.0} base HP");
            }
        }
        self.abilities.cooldowns[ability.index()] = ability.cooldown_secs();
        self.events.push(MatchEvent::AbilityUsed {
            ability: Ability::Instant(ability),
        });
        Ok(())
    }

    /// Buys a passive upgrade for the player. Each passive is bought once.
    ///
    /// # Errors
    ///
    /// Rejects when the match is over, the passive is already owned or the
    /// player cannot afford it.
    pub fn purchase_passive(&mut self, ability: PassiveAbility) -> Result<(), PurchaseError> {
        if self.is_over() {
            return Err(PurchaseError::MatchEnded);
        }
        if self.abilities.is_owned(ability) {
            return Err(PurchaseError::AlreadyOwned);
        }
        self.spend_on(ability.cost())?;

        self.abilities.owned[ability.index()] = true;
        match ability {
            PassiveAbility::Swiftness => {
                // Applied once to the current army; later spawns pick it up in derive_stats.
                for unit in self.units_mut(Faction::Player).iter_mut() {
                    if unit.is_alive() {
                        unit.speed *= ability.multiplier();
                    }
                }
            }
            PassiveAbility::Prosperity => {
                self.economy_mut(Faction::Player)
                    .raise_income_multiplier(ability.multiplier());
            }
        }
        self.events.push(MatchEvent::AbilityUsed {
            ability: Ability::Passive(ability),
        });
        Ok(())
    }

    fn spend_on(&mut self, cost: u32) -> Result<(), PurchaseError> {
        let economy = self.economy_mut(Faction::Player);
        let available = economy.gold();
        if economy.try_spend(cost_as_gold(cost)) {
            Ok(())
        } else {
            debug!("Purchase rejected: need {cost}, have {available:.0}");
            Err(PurchaseError::InsufficientFunds { cost, available })
        }
    }

    /// Unmitigated flat damage; kills pay bounty.
    fn strike_all_enemies(&mut self, damage: f32) {
        let mut hits = Vec::new();
        for unit in self.units_mut(Faction::Enemy).iter_mut() {
            if unit.is_alive() {
                hits.push((unit.id, unit.take_damage(damage)));
            }
        }
        for (id, dealt) in hits {
            self.damage_ledger.record(DamageTarget::Unit(id), dealt);
        }
        resolve_deaths(self, KillCause::Ability);
    }
}
