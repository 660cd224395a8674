//! Listing sources: where per-seller offers for a card come from

mod csv_listings;
mod marketplace;

pub use csv_listings::CsvListings;
pub use marketplace::{parse_listings, unescape_html, Marketplace};

use crate::error::Result;
use crate::matrix::PriceMatrix;
use crate::models::{Deck, Listing};

/// Something that can list the offers for a card
#[allow(async_fn_in_trait)]
pub trait ListingSource {
    /// Offers for `card`, or `None` when the card is unknown to the source
    async fn listings(&self, card: &str) -> Result<Option<Vec<Listing>>>;
}

/// Price matrix for a deck plus the cards that couldn't be priced
#[derive(Debug, Default)]
pub struct Gathered {
    pub matrix: PriceMatrix,
    pub unsourced: Vec<String>,
}

/// Looks up every deck entry and builds the price matrix.
///
/// `on_listings` sees the raw listings of each card that was found. Cards
/// that are unknown, have no listing covering the required quantity, or
/// fail to load end up in `unsourced`.
pub async fn gather<S, F>(source: &S, deck: &Deck, mut on_listings: F) -> Gathered
where
    S: ListingSource,
    F: FnMut(&str, &[Listing]),
{
    let mut gathered = Gathered::default();

    for entry in deck.iter() {
        log::info!("Loading prices for: {}", entry.name);

        let listings = match source.listings(&entry.name).await {
            Ok(Some(listings)) => listings,
            Ok(None) => {
                log::warn!("Card not found: {}", entry.name);
                gathered.unsourced.push(entry.name.clone());
                continue;
            }
            Err(e) => {
                log::warn!("Failed to load prices for {}: {}", entry.name, e);
                gathered.unsourced.push(entry.name.clone());
                continue;
            }
        };

        on_listings(&entry.name, &listings);

        if !gathered
            .matrix
            .insert_listings(&entry.name, entry.quantity, &listings)
        {
            log::warn!(
                "No store has {} copies of {} in a single listing",
                entry.quantity,
                entry.name
            );
            gathered.unsourced.push(entry.name.clone());
        }
    }

    log::info!(
        "Priced {} of {} cards",
        gathered.matrix.len(),
        deck.len()
    );
    gathered
}
