//! Per-side gold: passive income, atomic spending and kill bounties.

/// Gold balance for one side. The balance never goes negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Economy {
    gold: f32,
    income_per_sec: f32,
    income_multiplier: f32,
}

impl Economy {
    #[must_use]
    pub const fn new(start_gold: f32, income_per_sec: f32) -> Self {
        Self {
            gold: start_gold,
            income_per_sec,
            income_multiplier: 1.0,
        }
    }

    #[must_use]
    pub const fn gold(&self) -> f32 {
        self.gold
    }

    #[must_use]
    pub const fn income_multiplier(&self) -> f32 {
        self.income_multiplier
    }

    /// Effective gold per second after passives.
    #[must_use]
    pub fn income_rate(&self) -> f32 {
        self.income_per_sec * self.income_multiplier
    }

    /// Linear in `dt`, so one long step pays the same as many short ones.
    pub fn accrue_income(&mut self, dt: f32) {
        if dt > 0.0 {
            self.gold += self.income_rate() * dt;
        }
    }

    #[must_use]
    pub fn can_afford(&self, amount: f32) -> bool {
        self.gold >= amount
    }

    /// Deducts `amount` if the balance covers it. Leaves the balance alone otherwise.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if amount < 0.0 || !self.can_afford(amount) {
            return false;
        }
        self.gold -= amount;
        true
    }

    pub fn award_bounty(&mut self, amount: f32) {
        self.gold += amount.max(0.0);
    }

    /// Passive upgrade. Only ever raises the multiplier.
    pub fn raise_income_multiplier(&mut self, multiplier: f32) {
        self.income_multiplier = self.income_multiplier.max(multiplier);
    }

    #[cfg(test)]
    pub(crate) const fn set_gold(&mut self, gold: f32) {
        self.gold = gold;
    }
}

/// Gold paid to the player for killing an enemy unit of this cost.
#[must_use]
pub const fn bounty_for(cost: u32) -> u32 {
    cost / 5
}

/// Catalog prices are small integers, so the conversion is exact.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn cost_as_gold(cost: u32) -> f32 {
    cost as f32
}
