//! Sprites for the battlefield, bases and units, synced from the match snapshot.

use std::collections::HashSet;

use bevy::prelude::*;

use super::LatestSnapshot;
use crate::screens::GameState;
use crate::sim::{
    BATTLEFIELD_LENGTH, BaseView, Faction, UnitBehavior, UnitId, UnitKind, UnitView, archetype,
};
use crate::theme::palette;
use crate::{GameSet, Z_BACKGROUND, Z_BASE, Z_UNIT, gameplay_running};

// === Constants ===

/// World y of the ground line.
const GROUND_Y: f32 = -200.0;
const GROUND_HEIGHT: f32 = 20.0;
const BASE_SIZE: Vec2 = Vec2::new(80.0, 120.0);

// === Components ===

/// Links a sprite to a simulated unit.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct UnitSprite(pub UnitId);

/// Links a sprite to a base.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BaseSprite(pub Faction);

// === Helpers ===

/// Battlefield axis position to world x, centred on the camera.
#[must_use]
pub fn world_x(position: f32) -> f32 {
    position - BATTLEFIELD_LENGTH / 2.0
}

#[must_use]
pub const fn unit_height(kind: UnitKind) -> f32 {
    match kind {
        UnitKind::Archer => 32.0,
        UnitKind::Warrior => 40.0,
        UnitKind::Spearman => 44.0,
        UnitKind::Giant => 52.0,
    }
}

#[must_use]
pub const fn unit_color(view: &UnitView) -> Color {
    match (view.behavior, view.faction) {
        (UnitBehavior::Dying, _) => palette::DYING_UNIT,
        (UnitBehavior::Blocking, _) => palette::BLOCKING_UNIT,
        (_, Faction::Player) => palette::PLAYER_UNIT,
        (_, Faction::Enemy) => palette::ENEMY_UNIT,
    }
}

const fn base_color(faction: Faction) -> Color {
    match faction {
        Faction::Player => palette::PLAYER_BASE,
        Faction::Enemy => palette::ENEMY_BASE,
    }
}

/// Bases shrink with their HP.
fn base_height(view: &BaseView) -> f32 {
    if view.max_hp <= 0.0 {
        return 0.0;
    }
    BASE_SIZE.y * (view.hp / view.max_hp).clamp(0.0, 1.0)
}

fn unit_translation(view: &UnitView) -> Vec3 {
    Vec3::new(
        world_x(view.position),
        GROUND_Y + unit_height(view.kind) / 2.0,
        Z_UNIT,
    )
}

// === Systems ===

fn spawn_battlefield(mut commands: Commands) {
    commands.spawn((
        Name::new("Ground"),
        Sprite::from_color(palette::GROUND, Vec2::new(BATTLEFIELD_LENGTH, GROUND_HEIGHT)),
        Transform::from_xyz(0.0, GROUND_Y - GROUND_HEIGHT / 2.0, Z_BACKGROUND),
        DespawnOnExit(GameState::InGame),
    ));

    for faction in Faction::BOTH {
        commands.spawn((
            Name::new(format!("{faction:?} Base")),
            BaseSprite(faction),
            Sprite::from_color(base_color(faction), BASE_SIZE),
            Transform::from_xyz(
                world_x(faction.base_x()),
                GROUND_Y + BASE_SIZE.y / 2.0,
                Z_BASE,
            ),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn sync_bases(
    snapshot: Res<LatestSnapshot>,
    mut bases: Query<(&BaseSprite, &mut Sprite, &mut Transform)>,
) {
    for (base, mut sprite, mut transform) in &mut bases {
        let height = base_height(snapshot.base(base.0));
        sprite.custom_size = Some(Vec2::new(BASE_SIZE.x, height));
        transform.translation.y = GROUND_Y + height / 2.0;
    }
}

/// Moves, recolors, spawns and despawns unit sprites to match the snapshot.
fn sync_units(
    mut commands: Commands,
    snapshot: Res<LatestSnapshot>,
    mut sprites: Query<(Entity, &UnitSprite, &mut Sprite, &mut Transform)>,
) {
    let mut drawn: HashSet<UnitId> = HashSet::new();

    for (entity, unit, mut sprite, mut transform) in &mut sprites {
        match snapshot.units.iter().find(|view| view.id == unit.0) {
            Some(view) => {
                transform.translation = unit_translation(view);
                sprite.color = unit_color(view);
                drawn.insert(unit.0);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for view in snapshot.units.iter().filter(|view| !drawn.contains(&view.id)) {
        let size = Vec2::new(archetype(view.kind).width, unit_height(view.kind));
        commands.spawn((
            Name::new(format!("{:?} {}", view.faction, view.kind.display_name())),
            UnitSprite(view.id),
            Sprite::from_color(unit_color(view), size),
            Transform::from_translation(unit_translation(view)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<UnitSprite>()
        .register_type::<BaseSprite>();

    app.add_systems(OnEnter(GameState::InGame), spawn_battlefield);
    app.add_systems(
        Update,
        (sync_bases, sync_units)
            .in_set(GameSet::Ui)
            .run_if(gameplay_running.and(resource_exists::<LatestSnapshot>)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn view(behavior: UnitBehavior, faction: Faction) -> UnitView {
        UnitView {
            id: UnitId(0),
            kind: UnitKind::Warrior,
            faction,
            position: 1000.0,
            hp: 10.0,
            max_hp: 10.0,
            behavior,
        }
    }

    #[test]
    fn battlefield_is_centred() {
        assert_eq!(world_x(0.0), -1000.0);
        assert_eq!(world_x(BATTLEFIELD_LENGTH), 1000.0);
    }

    #[test]
    fn unit_color_follows_behavior() {
        assert_eq!(
            unit_color(&view(UnitBehavior::Advancing, Faction::Player)),
            palette::PLAYER_UNIT
        );
        assert_eq!(
            unit_color(&view(UnitBehavior::Engaged, Faction::Enemy)),
            palette::ENEMY_UNIT
        );
        assert_eq!(
            unit_color(&view(UnitBehavior::Blocking, Faction::Enemy)),
            palette::BLOCKING_UNIT
        );
        assert_eq!(
            unit_color(&view(UnitBehavior::Dying, Faction::Player)),
            palette::DYING_UNIT
        );
    }

    #[test]
    fn base_height_tracks_hp() {
        let mut base = BaseView {
            faction: Faction::Enemy,
            position: 1940.0,
            hp: 250.0,
            max_hp: 500.0,
        };
        assert_eq!(base_height(&base), BASE_SIZE.y / 2.0);
        base.hp = 0.0;
        assert_eq!(base_height(&base), 0.0);
    }
}
