//! Sparse card × store price matrix
//!
//! A `(card, store)` entry exists only when that store has a single listing
//! covering the card's full required quantity. The stored value is the
//! lowest such unit price; totals multiply it by the required quantity.

use crate::models::Listing;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Offers for a single card, keyed by store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    quantity: u32,
    offers: BTreeMap<String, Decimal>,
}

impl CardRow {
    /// Required quantity of the card
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Effective unit cost at `store`, `None` if the store can't supply the card
    pub fn cost(&self, store: &str) -> Option<Decimal> {
        self.offers.get(store).copied()
    }

    /// Offers in store name order
    pub fn offers(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.offers.iter().map(|(store, cost)| (store.as_str(), *cost))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceMatrix {
    rows: BTreeMap<String, CardRow>,
}

impl PriceMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card's listings. Listings that can't cover `required` copies,
    /// or whose price for `required` copies doesn't fit a `Decimal`, are
    /// dropped; per store the cheapest qualifying price is kept.
    /// Returns false (and leaves the matrix untouched) when nothing qualifies.
    pub fn insert_listings(&mut self, card: &str, required: u32, listings: &[Listing]) -> bool {
        let mut offers: BTreeMap<String, Decimal> = BTreeMap::new();

        for listing in listings {
            if listing.available_quantity < required || listing.unit_price.is_sign_negative() {
                continue;
            }
            if listing
                .unit_price
                .checked_mul(Decimal::from(required))
                .is_none()
            {
                log::warn!(
                    "Ignoring {} listing of {} at {}: price out of range",
                    listing.store,
                    card,
                    listing.unit_price
                );
                continue;
            }
            offers
                .entry(listing.store.clone())
                .and_modify(|best| *best = (*best).min(listing.unit_price))
                .or_insert(listing.unit_price);
        }

        if offers.is_empty() {
            log::debug!("No listing of {} covers {} copies", card, required);
            return false;
        }

        self.rows.insert(
            card.to_string(),
            CardRow {
                quantity: required,
                offers,
            },
        );
        true
    }

    pub fn row(&self, card: &str) -> Option<&CardRow> {
        self.rows.get(card)
    }

    pub fn cost(&self, card: &str, store: &str) -> Option<Decimal> {
        self.rows.get(card).and_then(|row| row.cost(store))
    }

    pub fn contains_card(&self, card: &str) -> bool {
        self.rows.contains_key(card)
    }

    /// Cards present in the matrix, sorted
    pub fn cards(&self) -> Vec<String> {
        self.rows.keys().cloned().collect()
    }

    /// Every store that supplies at least one card, sorted
    pub fn stores(&self) -> Vec<String> {
        self.rows
            .values()
            .flat_map(|row| row.offers.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
