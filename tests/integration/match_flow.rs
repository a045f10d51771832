//! Whole matches driven through `MatchState` alone.

use lane_siege::sim::{
    Ability, Difficulty, Faction, InstantAbility, MatchConfig, MatchEvent, MatchOutcome,
    MatchState, PurchaseError, SpawnError, UnitKind, Weather,
};
use pretty_assertions::assert_eq;

const STEP: f32 = 0.1;

fn lone_player_match() -> MatchState {
    MatchState::new(MatchConfig {
        enemy_ai: false,
        ..MatchConfig::default()
    })
}

#[test]
fn unopposed_army_wins_and_completes_the_age() {
    let mut state = lone_player_match();
    let mut events = Vec::new();

    for _ in 0..5000 {
        let _ = state.try_spawn(Faction::Player, UnitKind::Archer);
        state.tick(STEP);
        events.extend(state.drain_events());
        if state.is_over() {
            break;
        }
    }

    assert_eq!(state.outcome(), MatchOutcome::Victory);
    assert_eq!(state.winner(), Some(Faction::Player));
    assert_eq!(state.base(Faction::Enemy).hp, 0.0);
    assert!(events.contains(&MatchEvent::MatchEnded {
        outcome: MatchOutcome::Victory
    }));
    assert!(events.contains(&MatchEvent::AgeCompleted { age: 0 }));
}

#[test]
fn finished_match_rejects_requests_and_stops_ticking() {
    let mut state = lone_player_match();
    for _ in 0..5000 {
        let _ = state.try_spawn(Faction::Player, UnitKind::Warrior);
        state.tick(STEP);
        if state.is_over() {
            break;
        }
    }
    assert!(state.is_over());
    state.drain_events();

    let elapsed = state.elapsed_secs();
    state.tick(STEP);

    assert_eq!(state.elapsed_secs(), elapsed);
    assert_eq!(
        state.try_spawn(Faction::Player, UnitKind::Archer),
        Err(SpawnError::MatchEnded)
    );
    assert_eq!(
        state.purchase(Ability::Instant(InstantAbility::Repair)),
        Err(PurchaseError::MatchEnded)
    );
    assert!(state.drain_events().is_empty());
}

#[test]
fn idle_player_loses_to_the_enemy_director() {
    let mut state = MatchState::new(MatchConfig {
        difficulty: Difficulty::Crazy,
        weather: Weather::Clear,
        seed: 11,
        ..MatchConfig::default()
    });

    for _ in 0..20_000 {
        state.tick(STEP);
        if state.is_over() {
            break;
        }
    }

    assert_eq!(state.outcome(), MatchOutcome::Defeat);
    let events = state.drain_events();
    assert!(!events.iter().any(|e| matches!(e, MatchEvent::AgeCompleted { .. })));
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let config = MatchConfig {
        difficulty: Difficulty::Hard,
        weather: Weather::Storm,
        seed: 7,
        ..MatchConfig::default()
    };
    let mut first = MatchState::new(config);
    let mut second = MatchState::new(config);

    for step in 0..1200 {
        for state in [&mut first, &mut second] {
            if step % 40 == 0 {
                let _ = state.try_spawn(Faction::Player, UnitKind::Spearman);
            }
            state.tick(0.05);
        }
        assert_eq!(first.drain_events(), second.drain_events());
    }

    assert_eq!(first.snapshot(), second.snapshot());
}
