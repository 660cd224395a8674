use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Collapses runs of whitespace and trims the ends
pub fn clean_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Identity key for a card name: whitespace collapsed, lower-cased
pub fn normalize_name(name: &str) -> String {
    clean_name(name).to_lowercase()
}

/// One line of the deck after aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckEntry {
    pub name: String,
    pub quantity: u32,
}

/// Cards the buyer needs, keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    entries: BTreeMap<String, DeckEntry>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds copies of a card, summing with an existing entry.
    /// Zero quantities and blank names are ignored.
    pub fn add(&mut self, name: &str, quantity: u32) {
        let name = clean_name(name);
        if quantity == 0 || name.is_empty() {
            return;
        }
        self.entries
            .entry(name.to_lowercase())
            .and_modify(|entry| entry.quantity = entry.quantity.saturating_add(quantity))
            .or_insert(DeckEntry { name, quantity });
    }

    /// Removes every entry whose name is in `names` and returns the removed entries
    pub fn exclude(&mut self, names: &[String]) -> Vec<DeckEntry> {
        names
            .iter()
            .filter_map(|name| self.entries.remove(&normalize_name(name)))
            .collect()
    }

    /// Required quantity for a card, if it is in the deck
    pub fn quantity(&self, name: &str) -> Option<u32> {
        self.entries.get(&normalize_name(name)).map(|e| e.quantity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of copies across all entries
    pub fn total_cards(&self) -> u32 {
        self.entries.values().map(|e| e.quantity).sum()
    }
}

/// One seller's offer for one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub store: String,
    /// Display only
    pub edition: String,
    pub available_quantity: u32,
    pub unit_price: Decimal,
}
