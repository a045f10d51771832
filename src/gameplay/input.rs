//! Keyboard shortcuts for spawning units and buying abilities.
//!
//! Keys become [`PlayerCommand`]s, which are applied to the active match in
//! the same frame. Rejections come back as [`RequestRejected`] for the HUD.

use bevy::prelude::*;

use super::ActiveMatch;
use crate::sim::{Ability, Faction, InstantAbility, PassiveAbility, UnitKind};
use crate::{GameSet, gameplay_running};

// === Constants ===

const SPAWN_KEYS: [(KeyCode, UnitKind); 4] = [
    (KeyCode::Digit1, UnitKind::Archer),
    (KeyCode::Digit2, UnitKind::Warrior),
    (KeyCode::Digit3, UnitKind::Spearman),
    (KeyCode::Digit4, UnitKind::Giant),
];

const ABILITY_KEYS: [(KeyCode, Ability); 4] = [
    (KeyCode::KeyQ, Ability::Instant(InstantAbility::Meteor)),
    (KeyCode::KeyW, Ability::Instant(InstantAbility::Repair)),
    (KeyCode::KeyE, Ability::Passive(PassiveAbility::Swiftness)),
    (KeyCode::KeyR, Ability::Passive(PassiveAbility::Prosperity)),
];

// === Messages ===

/// A request from the player to the simulation.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Spawn(UnitKind),
    Purchase(Ability),
}

/// A player request the simulation refused.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct RequestRejected {
    pub command: PlayerCommand,
    pub reason: String,
    pub insufficient_funds: bool,
}

/// Key label shown next to a unit in the HUD.
#[must_use]
pub const fn spawn_key_label(kind: UnitKind) -> &'static str {
    match kind {
        UnitKind::Archer => "1",
        UnitKind::Warrior => "2",
        UnitKind::Spearman => "3",
        UnitKind::Giant => "4",
    }
}

/// Key label shown next to an ability in the HUD.
#[must_use]
pub const fn ability_key_label(ability: Ability) -> &'static str {
    match ability {
        Ability::Instant(InstantAbility::Meteor) => "Q",
        Ability::Instant(InstantAbility::Repair) => "W",
        Ability::Passive(PassiveAbility::Swiftness) => "E",
        Ability::Passive(PassiveAbility::Prosperity) => "R",
    }
}

// === Systems ===

fn read_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut requests: MessageWriter<PlayerCommand>) {
    for (key, kind) in SPAWN_KEYS {
        if keyboard.just_pressed(key) {
            requests.write(PlayerCommand::Spawn(kind));
        }
    }
    for (key, ability) in ABILITY_KEYS {
        if keyboard.just_pressed(key) {
            requests.write(PlayerCommand::Purchase(ability));
        }
    }
}

fn apply_commands(
    mut requests: MessageReader<PlayerCommand>,
    mut active: ResMut<ActiveMatch>,
    mut rejected: MessageWriter<RequestRejected>,
) {
    for command in requests.read() {
        let result = match *command {
            PlayerCommand::Spawn(kind) => active
                .try_spawn(Faction::Player, kind)
                .map(|_| ())
                .map_err(|err| (err.to_string(), err.is_insufficient_funds())),
            PlayerCommand::Purchase(ability) => active
                .purchase(ability)
                .map_err(|err| (err.to_string(), err.is_insufficient_funds())),
        };
        match result {
            Ok(()) => debug!("Applied {command:?}"),
            Err((reason, insufficient_funds)) => {
                debug!("Rejected {command:?}: {reason}");
                rejected.write(RequestRejected {
                    command: *command,
                    reason,
                    insufficient_funds,
                });
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_message::<PlayerCommand>()
        .add_message::<RequestRejected>();

    app.add_systems(
        Update,
        (read_keyboard, apply_commands)
            .chain()
            .in_set(GameSet::Input)
            .run_if(gameplay_running.and(resource_exists::<ActiveMatch>)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_unit_has_a_key() {
        for kind in UnitKind::ALL {
            assert!(SPAWN_KEYS.iter().any(|(_, k)| *k == kind));
        }
        assert_eq!(spawn_key_label(UnitKind::Giant), "4");
    }

    #[test]
    fn every_ability_has_a_key() {
        for ability in Ability::ALL {
            assert!(ABILITY_KEYS.iter().any(|(_, a)| *a == ability));
        }
        assert_eq!(
            ability_key_label(Ability::Instant(InstantAbility::Meteor)),
            "Q"
        );
    }
}
