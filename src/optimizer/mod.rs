//! Store selection: cheapest store per card, optionally restricted to a
//! fixed number of stores.

mod combinations;
mod search;
mod select;
mod sweep;

pub use combinations::{combination_count, Combinations};
pub use search::optimize;
pub use select::select;
pub use sweep::{sweep, Stage, StageOutcome};

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Cost of a plan.
///
/// Ordered by the number of unsourced cards first and by the cost of the
/// sourced cards second, so any unsourced card outweighs every realizable sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Total {
    unsourced: usize,
    cost: Decimal,
}

impl Total {
    pub const ZERO: Total = Total {
        unsourced: 0,
        cost: Decimal::ZERO,
    };

    /// Saturates at `Decimal::MAX` instead of overflowing
    fn plus_cost(self, cost: Decimal) -> Self {
        Self {
            cost: self.cost.checked_add(cost).unwrap_or(Decimal::MAX),
            ..self
        }
    }

    fn plus_unsourced(self) -> Self {
        Self {
            unsourced: self.unsourced + 1,
            ..self
        }
    }

    /// True when every card has a store
    pub fn is_feasible(&self) -> bool {
        self.unsourced == 0
    }

    /// The real price, `None` when some card has no store
    pub fn cost(&self) -> Option<Decimal> {
        self.is_feasible().then_some(self.cost)
    }

    /// Cost of the cards that do have a store
    pub fn sourced_cost(&self) -> Decimal {
        self.cost
    }

    pub fn unsourced(&self) -> usize {
        self.unsourced
    }
}

/// Store chosen for one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub store: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl Pick {
    /// Price of `quantity` copies, saturating at `Decimal::MAX`
    pub fn cost(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Store assignment per card. Cards no allowed store can supply are listed
/// in `unsourced` and never get a pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    picks: BTreeMap<String, Pick>,
    unsourced: Vec<String>,
}

impl Selection {
    pub fn get(&self, card: &str) -> Option<&Pick> {
        self.picks.get(card)
    }

    pub fn store_for(&self, card: &str) -> Option<&str> {
        self.picks.get(card).map(|pick| pick.store.as_str())
    }

    pub fn picks(&self) -> impl Iterator<Item = (&str, &Pick)> {
        self.picks.iter().map(|(card, pick)| (card.as_str(), pick))
    }

    pub fn unsourced(&self) -> &[String] {
        &self.unsourced
    }

    /// Distinct stores the buyer would order from
    pub fn stores_used(&self) -> BTreeSet<&str> {
        self.picks.values().map(|pick| pick.store.as_str()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unsourced.is_empty()
    }
}

/// A selection together with its total and the stores it was allowed to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub stores: Vec<String>,
    pub selection: Selection,
    pub total: Total,
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod tests;
