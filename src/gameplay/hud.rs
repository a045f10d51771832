//! Text HUD: gold, base HP, shop keys, ability status and request feedback.

use bevy::prelude::*;

use super::input::{ability_key_label, spawn_key_label};
use super::{ActiveMatch, LatestSnapshot, RequestRejected};
use crate::screens::GameState;
use crate::sim::{
    Ability, AbilityView, AgeProfile, Faction, MatchSnapshot, UnitKind, archetype,
};
use crate::theme::{palette, widget};
use crate::{GameSet, gameplay_running};

/// How long a rejection message stays up.
const FEEDBACK_SECS: f32 = 1.5;

// === Components ===

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum HudLine {
    Gold,
    Bases,
    Shop,
    Abilities,
    Conditions,
    Feedback,
}

// === Resources ===

/// Most recent rejection, cleared after [`FEEDBACK_SECS`].
#[derive(Resource, Debug, Default)]
pub struct Feedback {
    pub text: String,
    pub timer: Option<Timer>,
}

// === Formatting ===

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f32) -> u32 {
    value.max(0.0).floor() as u32
}

#[must_use]
pub fn gold_line(snapshot: &MatchSnapshot) -> String {
    format!("Gold: {}", whole(snapshot.gold(Faction::Player)))
}

#[must_use]
pub fn bases_line(snapshot: &MatchSnapshot) -> String {
    let player = snapshot.base(Faction::Player);
    let enemy = snapshot.base(Faction::Enemy);
    format!(
        "Your base: {}/{}   Enemy base: {}/{}",
        whole(player.hp.ceil()),
        whole(player.max_hp),
        whole(enemy.hp.ceil()),
        whole(enemy.max_hp)
    )
}

/// Spawn keys with the age's unit names.
#[must_use]
pub fn shop_line(age: &AgeProfile) -> String {
    UnitKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "[{}] {} ({}g)",
                spawn_key_label(*kind),
                age.unit_labels[kind.index()],
                archetype(*kind).cost
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn ability_status(view: &AbilityView) -> String {
    match view.ability {
        Ability::Passive(_) if view.owned => "owned".to_string(),
        Ability::Instant(_) if view.remaining_cooldown > 0.0 => {
            format!("{}s", whole(view.remaining_cooldown.ceil()))
        }
        _ => format!("{}g", view.cost),
    }
}

#[must_use]
pub fn abilities_line(snapshot: &MatchSnapshot) -> String {
    snapshot
        .abilities
        .iter()
        .map(|view| {
            format!(
                "[{}] {} {}",
                ability_key_label(view.ability),
                view.ability.display_name(),
                ability_status(view)
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

// === Systems ===

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HUD"),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
        children![
            (HudLine::Gold, widget::hud_text("", palette::GOLD_TEXT)),
            (HudLine::Bases, widget::hud_text("", palette::HEADER_TEXT)),
            (HudLine::Shop, widget::hud_text("", palette::BODY_TEXT)),
            (HudLine::Abilities, widget::hud_text("", palette::BODY_TEXT)),
            (HudLine::Conditions, widget::hud_text("", palette::BODY_TEXT)),
            (HudLine::Feedback, widget::hud_text("", palette::WARNING_TEXT)),
        ],
    ));
}

fn track_rejections(
    time: Res<Time>,
    mut rejected: MessageReader<RequestRejected>,
    mut feedback: ResMut<Feedback>,
) {
    if let Some(last) = rejected.read().last() {
        feedback.text = last.reason.clone();
        feedback.timer = Some(Timer::from_seconds(FEEDBACK_SECS, TimerMode::Once));
        return;
    }
    let expired = feedback
        .timer
        .as_mut()
        .is_some_and(|timer| timer.tick(time.delta()).just_finished());
    if expired {
        feedback.text.clear();
        feedback.timer = None;
    }
}

fn update_hud(
    active: Res<ActiveMatch>,
    snapshot: Res<LatestSnapshot>,
    feedback: Res<Feedback>,
    mut lines: Query<(&HudLine, &mut Text)>,
) {
    for (line, mut text) in &mut lines {
        text.0 = match line {
            HudLine::Gold => gold_line(&snapshot),
            HudLine::Bases => bases_line(&snapshot),
            HudLine::Shop => shop_line(active.age()),
            HudLine::Abilities => abilities_line(&snapshot),
            HudLine::Conditions => format!(
                "{} | {} | {}",
                active.age().name,
                active.config().difficulty.label(),
                active.config().weather.label()
            ),
            HudLine::Feedback => feedback.text.clone(),
        };
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<HudLine>().init_resource::<Feedback>();

    app.add_systems(OnEnter(GameState::InGame), spawn_hud);
    app.add_systems(
        Update,
        (track_rejections, update_hud)
            .chain()
            .in_set(GameSet::Ui)
            .run_if(
                gameplay_running
                    .and(resource_exists::<ActiveMatch>)
                    .and(resource_exists::<LatestSnapshot>),
            ),
    );
}
