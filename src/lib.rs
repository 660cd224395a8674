//! Deck Buyer - cheapest way to buy an MTG deck
//!
//! Loads a deck list, collects per-store listings for every card and finds
//! the cheapest store per card, both without restriction and when buying
//! from at most a fixed number of stores.

pub mod cache;
pub mod config;
pub mod error;
pub mod io;
pub mod matrix;
pub mod models;
pub mod optimizer;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{Error, Result};
pub use io::{read_deck, read_listings_csv};
pub use matrix::PriceMatrix;
pub use models::{Deck, DeckEntry, Listing};
pub use optimizer::{optimize, select, sweep, Plan, Selection, Stage, StageOutcome, Total};
pub use source::{gather, CsvListings, Gathered, ListingSource, Marketplace};
