use crate::error::{Error, Result};
use crate::models::{clean_name, Deck, Listing};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

lazy_static! {
    static ref DECK_LINE: Regex = Regex::new(r"^([0-9]+)x?\s+(.+)$").expect("valid deck line regex");
}

fn parse_deck_line(line: &str) -> Option<(u32, String)> {
    let caps = DECK_LINE.captures(line.trim())?;
    let quantity = caps[1].parse().ok()?;
    let name = clean_name(&caps[2]);
    if name.is_empty() {
        return None;
    }
    Some((quantity, name))
}

/// Parses a deck list (`4 Lightning Bolt` per line), dropping excluded names.
/// Lines that don't look like a card entry are skipped.
pub fn parse_deck(text: &str, exclude: &[String]) -> Deck {
    let mut deck = Deck::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_deck_line(line) {
            Some((quantity, name)) => deck.add(&name, quantity),
            None => log::debug!("Skipping deck line: {:?}", line.trim()),
        }
    }

    for entry in deck.exclude(exclude) {
        log::info!("Ignoring {}x {}", entry.quantity, entry.name);
    }

    deck
}

/// Reads a deck file. Fails when the file can't be read or has no cards.
pub fn read_deck(path: &Path, exclude: &[String]) -> Result<Deck> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::DeckRead {
        path: path.to_path_buf(),
        source,
    })?;

    let deck = parse_deck(&text, exclude);
    if deck.is_empty() {
        return Err(Error::EmptyDeck(path.to_path_buf()));
    }

    log::info!(
        "Loaded deck {}: {} cards ({} copies)",
        path.display(),
        deck.len(),
        deck.total_cards()
    );
    Ok(deck)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    card: String,
    store: String,
    #[serde(default)]
    edition: String,
    quantity: String,
    price: String,
}

/// Parses a price written either as `1234.56` or in Brazilian form `1.234,56`.
/// Mixed forms such as `1,234.56` are rejected.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    let normalized = if let Some(comma) = raw.rfind(',') {
        if raw[comma..].contains('.') {
            return None;
        }
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    Decimal::from_str(&normalized)
        .ok()
        .filter(|price| !price.is_sign_negative())
}

/// Reads listings from a CSV with headers `card,store,edition,quantity,price`.
/// Returns `(card name, listing)` pairs; unparsable rows are skipped.
pub fn read_listings_csv(path: &Path) -> Result<Vec<(String, Listing)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut listings = Vec::new();

    for result in rdr.deserialize() {
        let row: ListingRow = match result {
            Ok(row) => row,
            Err(e) => {
                log::debug!("Skipping listing row: {}", e);
                continue;
            }
        };

        let quantity = row.quantity.replace(',', "").parse::<u32>().ok();
        let price = parse_price(&row.price);
        match (quantity, price) {
            (Some(available_quantity), Some(unit_price)) if !row.store.is_empty() => {
                listings.push((
                    clean_name(&row.card),
                    Listing {
                        store: row.store,
                        edition: row.edition,
                        available_quantity,
                        unit_price,
                    },
                ));
            }
            _ => log::debug!("Skipping malformed listing for {}", row.card),
        }
    }

    log::info!("Read {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_deck_line_variants() {
        assert_eq!(parse_deck_line("4 Lightning Bolt"), Some((4, "Lightning Bolt".into())));
        assert_eq!(parse_deck_line("  2x  Sol Ring "), Some((2, "Sol Ring".into())));
        assert_eq!(parse_deck_line("Deck"), None);
        assert_eq!(parse_deck_line("abc Lightning Bolt"), None);
        assert_eq!(parse_deck_line("99999999999 Sol Ring"), None);
    }

    #[test]
    fn parse_deck_sums_and_filters() {
        let text = "4 Lightning Bolt\n\nSideboard\n2 Lightning Bolt\n20 Mountain\n0 Black Lotus\n";
        let deck = parse_deck(text, &["Mountain".to_string()]);

        assert_eq!(deck.len(), 1);
        assert_eq!(deck.quantity("Lightning Bolt"), Some(6));
        assert!(!deck.contains("Mountain"));
        assert!(!deck.contains("Black Lotus"));
    }

    #[test]
    fn parse_price_formats() {
        assert_eq!(parse_price("4.50"), Some(dec!(4.50)));
        assert_eq!(parse_price("4,50"), Some(dec!(4.50)));
        assert_eq!(parse_price("1.234,56"), Some(dec!(1234.56)));
        assert_eq!(parse_price("1,234.56"), None);
        assert_eq!(parse_price("1,2,3"), None);
        assert_eq!(parse_price(" 0 "), Some(dec!(0)));
        assert_eq!(parse_price("-1.00"), None);
        assert_eq!(parse_price("n/a"), None);
    }
}
