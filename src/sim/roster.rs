//! Unit archetypes, difficulty and age profiles, and spawn-time stat derivation.

use bevy::prelude::*;

use super::Faction;
use super::weather::WeatherProfile;

// === Unit archetypes ===

/// Every archetype a side can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum UnitKind {
    Archer,
    Warrior,
    Spearman,
    Giant,
}

impl UnitKind {
    /// All unit kinds, in shop order.
    pub const ALL: [Self; 4] = [Self::Archer, Self::Warrior, Self::Spearman, Self::Giant];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Archer => "Archer",
            Self::Warrior => "Warrior",
            Self::Spearman => "Spearman",
            Self::Giant => "Giant",
        }
    }

    /// Position in [`UnitKind::ALL`], used to index per-kind tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Archer => 0,
            Self::Warrior => 1,
            Self::Spearman => 2,
            Self::Giant => 3,
        }
    }
}

/// Periodic damage mitigation. A zeroed profile means the unit never blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProfile {
    /// Fraction of incoming damage removed while blocking (0..=1).
    pub reduction: f32,
    pub duration_secs: f32,
    pub cooldown_secs: f32,
}

impl BlockProfile {
    pub const NONE: Self = Self {
        reduction: 0.0,
        duration_secs: 0.0,
        cooldown_secs: 0.0,
    };

    #[must_use]
    pub fn is_capable(&self) -> bool {
        self.reduction > 0.0 && self.duration_secs > 0.0 && self.cooldown_secs > 0.0
    }
}

/// Immutable catalog entry. Stats are pre-scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitArchetype {
    pub kind: UnitKind,
    pub cost: u32,
    pub hp: f32,
    /// Damage per second.
    pub damage: f32,
    pub speed: f32,
    /// Footprint along the battlefield axis.
    pub width: f32,
    pub is_archer: bool,
    pub block: BlockProfile,
}

impl UnitArchetype {
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// Look up the catalog entry for a unit kind.
#[must_use]
pub const fn archetype(kind: UnitKind) -> UnitArchetype {
    match kind {
        UnitKind::Archer => UnitArchetype {
            kind,
            cost: 25,
            hp: 25.0,
            damage: 15.0,
            speed: 50.0,
            width: 16.0,
            is_archer: true,
            block: BlockProfile::NONE,
        },
        UnitKind::Warrior => UnitArchetype {
            kind,
            cost: 50,
            hp: 50.0,
            damage: 10.0,
            speed: 50.0,
            width: 24.0,
            is_archer: false,
            block: BlockProfile {
                reduction: 0.5,
                duration_secs: 1.5,
                cooldown_secs: 4.0,
            },
        },
        UnitKind::Spearman => UnitArchetype {
            kind,
            cost: 75,
            hp: 65.0,
            damage: 12.0,
            speed: 60.0,
            width: 20.0,
            is_archer: false,
            block: BlockProfile::NONE,
        },
        UnitKind::Giant => UnitArchetype {
            kind,
            cost: 150,
            hp: 150.0,
            damage: 20.0,
            speed: 30.0,
            width: 36.0,
            is_archer: false,
            block: BlockProfile::NONE,
        },
    }
}

// === Difficulty ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Crazy,
}

/// Economy and enemy scaling for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub start_gold: f32,
    pub player_gold_per_sec: f32,
    pub enemy_gold_per_sec: f32,
    pub enemy_spawn_interval_secs: f32,
    pub enemy_hp_mult: f32,
    pub enemy_dmg_mult: f32,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Crazy];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Crazy => "Crazy",
        }
    }

    #[must_use]
    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                start_gold: 150.0,
                player_gold_per_sec: 8.0,
                enemy_gold_per_sec: 3.0,
                enemy_spawn_interval_secs: 7.0,
                enemy_hp_mult: 0.8,
                enemy_dmg_mult: 0.8,
            },
            Self::Medium => DifficultyProfile {
                start_gold: 100.0,
                player_gold_per_sec: 5.0,
                enemy_gold_per_sec: 5.0,
                enemy_spawn_interval_secs: 5.0,
                enemy_hp_mult: 1.0,
                enemy_dmg_mult: 1.0,
            },
            Self::Hard => DifficultyProfile {
                start_gold: 75.0,
                player_gold_per_sec: 4.0,
                enemy_gold_per_sec: 7.0,
                enemy_spawn_interval_secs: 3.5,
                enemy_hp_mult: 1.2,
                enemy_dmg_mult: 1.2,
            },
            Self::Crazy => DifficultyProfile {
                start_gold: 50.0,
                player_gold_per_sec: 3.0,
                enemy_gold_per_sec: 10.0,
                enemy_spawn_interval_secs: 2.0,
                enemy_hp_mult: 1.5,
                enemy_dmg_mult: 1.5,
            },
        }
    }
}

// === Ages ===

/// Progression tier: scales unit stats and base HP, and renames units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub stat_mult: f32,
    pub player_base_hp: f32,
    pub enemy_base_hp: f32,
    /// Display names per [`UnitKind::index`].
    pub unit_labels: [&'static str; 4],
}

pub const AGES: [AgeProfile; 4] = [
    AgeProfile {
        name: "Stone Age",
        description: "Clubs, rocks and stubbornness.",
        stat_mult: 1.0,
        player_base_hp: 500.0,
        enemy_base_hp: 500.0,
        unit_labels: ["Slinger", "Brute", "Hunter", "Mammoth Rider"],
    },
    AgeProfile {
        name: "Bronze Age",
        description: "Shields get shinier.",
        stat_mult: 1.3,
        player_base_hp: 600.0,
        enemy_base_hp: 750.0,
        unit_labels: ["Archer", "Warrior", "Spearman", "Giant"],
    },
    AgeProfile {
        name: "Iron Age",
        description: "Forged steel, tougher walls.",
        stat_mult: 1.7,
        player_base_hp: 700.0,
        enemy_base_hp: 1000.0,
        unit_labels: ["Crossbowman", "Legionary", "Pikeman", "War Elephant"],
    },
    AgeProfile {
        name: "Future Age",
        description: "Lasers. Obviously.",
        stat_mult: 2.2,
        player_base_hp: 800.0,
        enemy_base_hp: 1400.0,
        unit_labels: ["Sniper Drone", "Trooper", "Lancer", "Mech"],
    },
];

/// Age profile for an index, clamped to the last age.
#[must_use]
pub fn age_profile(index: usize) -> AgeProfile {
    AGES[index.min(AGES.len() - 1)]
}

// === Stat derivation ===

/// Effective stats fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnStats {
    pub hp: f32,
    pub damage: f32,
    pub speed: f32,
}

/// Scales an archetype by age, difficulty (enemy side only), weather and
/// the owning side's speed passive.
#[must_use]
pub fn derive_stats(
    archetype: &UnitArchetype,
    faction: Faction,
    age: &AgeProfile,
    difficulty: &DifficultyProfile,
    weather: &WeatherProfile,
    speed_passive_mult: f32,
) -> SpawnStats {
    let is_enemy = faction == Faction::Enemy;
    let hp_mult = if is_enemy { difficulty.enemy_hp_mult } else { 1.0 };
    let dmg_mult = if is_enemy { difficulty.enemy_dmg_mult } else { 1.0 };
    let weather_dmg = if archetype.is_archer {
        weather.archer_dmg_mult
    } else {
        weather.dmg_mult
    };
    let passive = if is_enemy { 1.0 } else { speed_passive_mult };

    SpawnStats {
        hp: (archetype.hp * age.stat_mult * hp_mult).round(),
        damage: archetype.damage * age.stat_mult * dmg_mult * weather_dmg,
        speed: archetype.speed * weather.speed_mult * passive,
    }
}
