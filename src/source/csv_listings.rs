use super::ListingSource;
use crate::error::Result;
use crate::io::read_listings_csv;
use crate::models::{normalize_name, Listing};
use std::collections::HashMap;
use std::path::Path;

/// Offline listings loaded from a CSV export
/// (`card,store,edition,quantity,price`)
#[derive(Debug, Default)]
pub struct CsvListings {
    by_card: HashMap<String, Vec<Listing>>,
}

impl CsvListings {
    pub fn load(path: &Path) -> Result<Self> {
        let mut by_card: HashMap<String, Vec<Listing>> = HashMap::new();
        for (card, listing) in read_listings_csv(path)? {
            by_card.entry(normalize_name(&card)).or_default().push(listing);
        }
        Ok(Self { by_card })
    }

    /// Number of distinct cards with at least one listing
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }
}

impl ListingSource for CsvListings {
    async fn listings(&self, card: &str) -> Result<Option<Vec<Listing>>> {
        Ok(self.by_card.get(&normalize_name(card)).cloned())
    }
}
