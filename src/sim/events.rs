//! Outbox of things the host may want to react to, plus batched damage reports.

use std::collections::HashMap;

use super::{Ability, Faction, MatchOutcome, UnitId, UnitKind};

/// Minimum gap between two damage reports for the same target.
pub const REPORT_INTERVAL_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageTarget {
    Unit(UnitId),
    Base(Faction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    UnitSpawned {
        id: UnitId,
        faction: Faction,
        kind: UnitKind,
    },
    /// HP reached zero. `bounty` is the gold credited to the player, if any.
    UnitKilled {
        id: UnitId,
        faction: Faction,
        bounty: u32,
    },
    /// Death grace period elapsed. The id no longer resolves.
    UnitRemoved { id: UnitId, faction: Faction },
    /// Damage accumulated on one target since its previous report.
    DamageReport { target: DamageTarget, amount: f32 },
    AbilityUsed { ability: Ability },
    LightningStrike { id: UnitId, faction: Faction },
    MatchEnded { outcome: MatchOutcome },
    /// The player won a match in this age.
    AgeCompleted { age: usize },
}

#[derive(Debug, Clone, Copy)]
struct PendingDamage {
    amount: f32,
    since_report: f32,
}

/// Accumulates damage per target and releases it at most every
/// [`REPORT_INTERVAL_SECS`]. HP itself is always updated immediately.
#[derive(Debug, Clone, Default)]
pub struct DamageLedger {
    pending: HashMap<DamageTarget, PendingDamage>,
}

impl DamageLedger {
    /// Adds damage dealt this tick. A target seen for the first time reports
    /// on the next flush.
    pub fn record(&mut self, target: DamageTarget, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.pending
            .entry(target)
            .or_insert(PendingDamage {
                amount: 0.0,
                since_report: REPORT_INTERVAL_SECS,
            })
            .amount += amount;
    }

    /// Ages every entry by `dt` and emits reports for the ones that are due.
    pub fn flush(&mut self, dt: f32, events: &mut Vec<MatchEvent>) {
        let mut due: Vec<(DamageTarget, f32)> = Vec::new();
        for (target, pending) in &mut self.pending {
            pending.since_report += dt;
            if pending.amount > 0.0 && pending.since_report >= REPORT_INTERVAL_SECS {
                due.push((*target, pending.amount));
                pending.amount = 0.0;
                pending.since_report = 0.0;
            }
        }
        emit_reports(due, events);
    }

    /// Emits every nonzero pending amount regardless of the interval.
    /// Used once the match has ended and no later flush will come.
    pub fn flush_all(&mut self, events: &mut Vec<MatchEvent>) {
        let due: Vec<(DamageTarget, f32)> = self
            .pending
            .drain()
            .filter(|(_, pending)| pending.amount > 0.0)
            .map(|(target, pending)| (target, pending.amount))
            .collect();
        emit_reports(due, events);
    }

    /// Drops any unreported damage for a target that no longer exists.
    pub fn forget(&mut self, target: DamageTarget) {
        self.pending.remove(&target);
    }

    #[must_use]
    pub fn pending(&self, target: DamageTarget) -> f32 {
        self.pending.get(&target).map_or(0.0, |pending| pending.amount)
    }
}

fn emit_reports(mut due: Vec<(DamageTarget, f32)>, events: &mut Vec<MatchEvent>) {
    // HashMap order is arbitrary; keep the outbox stable.
    due.sort_by_key(|(target, _)| match target {
        DamageTarget::Base(Faction::Player) => (0, 0),
        DamageTarget::Base(Faction::Enemy) => (0, 1),
        DamageTarget::Unit(id) => (1, id.0),
    });
    events.extend(
        due.into_iter()
            .map(|(target, amount)| MatchEvent::DamageReport { target, amount }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reports(events: &[MatchEvent]) -> Vec<f32> {
        events
            .iter()
            .filter_map(|event| match event {
                MatchEvent::DamageReport { amount, .. } => Some(*amount),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_hit_reports_immediately() {
        let mut ledger = DamageLedger::default();
        let mut events = Vec::new();

        ledger.record(DamageTarget::Unit(UnitId(3)), 1.5);
        ledger.flush(0.1, &mut events);

        assert_eq!(
            events,
            vec![MatchEvent::DamageReport {
                target: DamageTarget::Unit(UnitId(3)),
                amount: 1.5
            }]
        );
    }

    #[test]
    fn reports_are_batched_per_interval() {
        let mut ledger = DamageLedger::default();
        let mut events = Vec::new();
        let target = DamageTarget::Base(Faction::Enemy);

        // 2 seconds of steady damage at 0.1s ticks.
        for _ in 0..20 {
            ledger.record(target, 1.0);
            ledger.flush(0.1, &mut events);
        }

        let amounts = reports(&events);
        assert!(amounts.len() <= 5, "too many reports: {amounts:?}");
        let total: f32 = amounts.iter().sum::<f32>() + ledger.pending(target);
        assert!((total - 20.0).abs() < 1e-4);
    }

    #[test]
    fn flush_all_releases_damage_before_the_interval() {
        let mut ledger = DamageLedger::default();
        let mut events = Vec::new();
        let base = DamageTarget::Base(Faction::Enemy);
        let unit = DamageTarget::Unit(UnitId(4));

        ledger.record(base, 2.0);
        ledger.flush(0.1, &mut events);
        ledger.record(base, 1.5);
        ledger.flush(0.1, &mut events);
        ledger.record(unit, 3.0);
        assert_eq!(reports(&events), vec![2.0]);

        ledger.flush_all(&mut events);

        assert_eq!(reports(&events), vec![2.0, 1.5, 3.0]);
        assert_eq!(ledger.pending(base), 0.0);
    }

    #[test]
    fn forget_discards_pending_damage() {
        let mut ledger = DamageLedger::default();
        let mut events = Vec::new();
        let target = DamageTarget::Unit(UnitId(1));

        ledger.record(target, 2.0);
        ledger.flush(0.1, &mut events);
        ledger.record(target, 2.0);
        ledger.forget(target);
        ledger.flush(1.0, &mut events);

        assert_eq!(reports(&events), vec![2.0]);
    }

    #[test]
    fn zero_damage_is_ignored() {
        let mut ledger = DamageLedger::default();
        let mut events = Vec::new();
        ledger.record(DamageTarget::Unit(UnitId(1)), 0.0);
        ledger.flush(1.0, &mut events);
        assert!(events.is_empty());
    }
}
