//! Deck Buyer - finds the cheapest stores for a deck list
//!
//! Prices every card of the deck, then prints the cheapest store per card
//! and the best plans when ordering from a limited number of stores.

use clap::Parser;
use deck_buyer::cache::PageCache;
use deck_buyer::report::{format_deck, format_listings, format_stage, format_unsourced, json_report};
use deck_buyer::{
    gather, read_deck, sweep, Config, CsvListings, Deck, Gathered, ListingSource, Marketplace,
};
use std::path::PathBuf;

/// Find the cheapest way to buy a deck from a limited number of stores
#[derive(Parser, Debug)]
#[command(name = "deck_buyer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Deck list, one `<quantity> <card name>` per line
    deck: PathBuf,

    /// Read listings from a CSV file (card,store,edition,quantity,price) instead of the marketplace
    #[arg(short, long)]
    listings: Option<PathBuf>,

    /// JSON configuration file (default: ~/.config/deck_buyer/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Largest number of stores to optimize for
    #[arg(short, long)]
    max_stores: Option<usize>,

    /// Skip store budgets with more subsets than this
    #[arg(long)]
    combination_limit: Option<u64>,

    /// Keep basic lands in the deck
    #[arg(long, default_value_t = false)]
    keep_basics: bool,

    /// Marketplace base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Directory for cached marketplace pages
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Always fetch pages, never use the page cache
    #[arg(long, default_value_t = false)]
    no_cache: bool,

    /// Maximum age of cached pages in hours
    #[arg(long)]
    cache_max_age_hours: Option<u64>,

    /// Print each card's listings while loading
    #[arg(long, default_value_t = false)]
    show_listings: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Print a JSON report instead of tables
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    /// Load the config file and apply command line overrides
    fn load_config(&self) -> deck_buyer::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };

        if let Some(max_stores) = self.max_stores {
            config.max_stores = max_stores;
        }
        if let Some(limit) = self.combination_limit {
            config.combination_limit = limit;
        }
        if self.keep_basics {
            config.filter_basics = false;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(hours) = self.cache_max_age_hours {
            config.cache_max_age_hours = hours;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(&args).await {
        log::error!("{}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> deck_buyer::Result<()> {
    let config = args.load_config()?;
    let deck = read_deck(&args.deck, config.excluded_names())?;

    let gathered = match &args.listings {
        Some(path) => {
            let source = CsvListings::load(path)?;
            log::info!("Using offline listings for {} cards", source.len());
            price_deck(&source, &deck, args, &config).await
        }
        None => {
            let mut source = Marketplace::new(&config.base_url, &config.user_agent);
            if !args.no_cache {
                source = source.with_cache(PageCache::new(
                    &config.resolved_cache_dir(),
                    config.cache_max_age(),
                ));
            }
            price_deck(&source, &deck, args, &config).await
        }
    };

    let stages = sweep(
        &gathered.matrix,
        config.max_stores,
        config.combination_limit,
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json_report(&deck, &gathered, &stages))?
        );
        return Ok(());
    }

    let colored = !args.no_color;
    println!();
    print!("{}", format_deck(&deck));
    print!("{}", format_unsourced(&gathered.unsourced));
    for stage in &stages {
        print!(
            "{}",
            format_stage(stage, &deck, &gathered, &config.currency, colored)
        );
    }

    Ok(())
}

async fn price_deck<S: ListingSource>(
    source: &S,
    deck: &Deck,
    args: &Args,
    config: &Config,
) -> Gathered {
    gather(source, deck, |card, listings| {
        if args.show_listings && !args.json {
            print!("{}", format_listings(card, listings, &config.currency));
        }
    })
    .await
}
