use crate::matrix::PriceMatrix;
use crate::models::{Deck, Listing};
use crate::optimizer::{Plan, Selection, Stage, StageOutcome};
use crate::source::Gathered;
use owo_colors::OwoColorize;
use serde_json::json;
use std::collections::BTreeMap;

const CELL_WIDTH: usize = 7;

/// Table of the raw offers for one card, cheapest first
pub fn format_listings(card: &str, listings: &[Listing], currency: &str) -> String {
    let mut sorted: Vec<&Listing> = listings.iter().collect();
    sorted.sort_by(|a, b| a.unit_price.cmp(&b.unit_price));

    let rule = "-".repeat(80);
    let mut output = String::new();

    output.push_str(&format!("\n{card}\n{rule}\n"));
    output.push_str(&format!(
        "| {:^32} | {:^22} | {:^5} | {:^8} |\n",
        "Store", "Edition", "Qty", "Price"
    ));
    output.push_str(&format!("{rule}\n"));
    for listing in sorted {
        output.push_str(&format!(
            "| {:32.32} | {:22.22} | {:>5} | {:>8.8} |\n",
            listing.store,
            listing.edition,
            listing.available_quantity,
            format!("{currency} {:.2}", listing.unit_price)
        ));
    }
    output.push_str(&format!("{rule}\n"));

    output
}

/// Numbered card list; the numbers are the price table's column labels
pub fn format_deck(deck: &Deck) -> String {
    let mut output = String::from("# Cards -------\n");
    for (index, entry) in deck.iter().enumerate() {
        output.push_str(&format!(
            "{:3}: {}x {}\n",
            index, entry.quantity, entry.name
        ));
    }
    output
}

pub fn format_unsourced(unsourced: &[String]) -> String {
    if unsourced.is_empty() {
        return String::new();
    }
    format!(
        "WARNING: {} card(s) can't be bought at the required quantity and are left out: {}\n",
        unsourced.len(),
        unsourced.join(", ")
    )
}

/// Store × card grid of unit prices. Stores used by `selection` and the
/// chosen cells are highlighted (or marked with `*` without color).
pub fn format_price_table(
    deck: &Deck,
    matrix: &PriceMatrix,
    selection: Option<&Selection>,
    colored: bool,
) -> String {
    let columns: Vec<(usize, &str)> = deck
        .iter()
        .enumerate()
        .filter(|(_, entry)| matrix.contains_card(&entry.name))
        .map(|(index, entry)| (index, entry.name.as_str()))
        .collect();

    let mut header = format!("| {:^15.15} |", "Store / Card");
    for (index, _) in &columns {
        header.push_str(&format!(" {:>width$}", index, width = CELL_WIDTH));
    }
    header.push_str(" |");
    let rule = "-".repeat(header.chars().count());

    let mut output = format!("{rule}\n{header}\n{rule}\n");

    let used = selection.map(|s| s.stores_used()).unwrap_or_default();

    for store in matrix.stores() {
        let is_used = used.contains(store.as_str());
        let name = match (is_used, colored) {
            (true, true) => format!("{:15.15}", store).red().to_string(),
            (true, false) => format!("{:15.15}", format!("* {store}")),
            (false, _) => format!("{:15.15}", store),
        };
        output.push_str(&format!("| {name} |"));

        for (_, card) in &columns {
            let chosen = selection.and_then(|s| s.store_for(card)) == Some(store.as_str());
            let value = matrix
                .cost(card, &store)
                .map_or_else(|| ".".to_string(), |cost| format!("{cost:.2}"));
            let cell = match (chosen, colored) {
                (true, true) => format!("{:>width$}", value, width = CELL_WIDTH)
                    .green()
                    .to_string(),
                (true, false) => format!("{:>width$}", format!("{value}*"), width = CELL_WIDTH),
                (false, _) => format!("{:>width$}", value, width = CELL_WIDTH),
            };
            output.push(' ');
            output.push_str(&cell);
        }
        output.push_str(" |\n");
    }
    output.push_str(&format!("{rule}\n"));

    output
}

/// Total line. An infeasible plan never shows a number. `unpriced` counts
/// deck cards that never made it into the matrix; a total that leaves them
/// out is marked partial.
pub fn format_total(plan: &Plan, unpriced: usize, currency: &str) -> String {
    if plan.selection.picks().next().is_none() && plan.total.is_feasible() && unpriced > 0 {
        return format!("# No cards could be priced: {unpriced} card(s) left out\n");
    }

    match plan.total.cost() {
        Some(cost) => {
            let stores: Vec<&str> = plan.selection.stores_used().into_iter().collect();
            let mut line = format!(
                "# Total = {currency} {cost:.2} ({} store{}: {})",
                stores.len(),
                if stores.len() == 1 { "" } else { "s" },
                stores.join(", ")
            );
            if unpriced > 0 {
                line.push_str(&format!(", partial: {unpriced} card(s) not priced"));
            }
            line.push('\n');
            line
        }
        None => format!(
            "# No feasible assignment with these stores: {} card(s) can't be sourced ({})\n",
            plan.total.unsourced(),
            plan.selection.unsourced().join(", ")
        ),
    }
}

/// What to buy where
pub fn format_shopping_list(plan: &Plan, currency: &str) -> String {
    let mut by_store: BTreeMap<&str, Vec<(&str, u32, String)>> = BTreeMap::new();
    for (card, pick) in plan.selection.picks() {
        by_store.entry(pick.store.as_str()).or_default().push((
            card,
            pick.quantity,
            format!("{:.2}", pick.unit_price),
        ));
    }

    let mut output = String::new();
    for (store, items) in by_store {
        output.push_str(&format!("{store}\n"));
        for (card, quantity, price) in items {
            output.push_str(&format!("    {quantity}x {card} @ {currency} {price}\n"));
        }
    }
    output
}

/// One section of the sweep: heading, price table and total
pub fn format_stage(
    stage: &Stage,
    deck: &Deck,
    gathered: &Gathered,
    currency: &str,
    colored: bool,
) -> String {
    let matrix = &gathered.matrix;
    let unpriced = gathered.unsourced.len();
    let mut output = match stage.limit {
        None => "\n# Cheapest per card ----------\n".to_string(),
        Some(k) => format!("\n# Optimized {k} ----------\n"),
    };

    match &stage.outcome {
        StageOutcome::Planned(plan) => {
            if !matrix.is_empty() {
                output.push_str(&format_price_table(
                    deck,
                    matrix,
                    Some(&plan.selection),
                    colored,
                ));
                output.push('\n');
            }
            if plan.total.is_feasible() {
                output.push_str(&format_shopping_list(plan, currency));
            }
            output.push_str(&format_total(plan, unpriced, currency));
        }
        StageOutcome::Skipped { combinations } => {
            let count = combinations.map_or_else(|| "too many".to_string(), |c| c.to_string());
            output.push_str(&format!(
                "Skipped: {count} store combinations exceed the combination limit\n"
            ));
        }
    }

    output
}

/// Machine readable summary of a run. A stage is `complete` when it is
/// feasible and no deck card was left out of the matrix.
pub fn json_report(deck: &Deck, gathered: &Gathered, stages: &[Stage]) -> serde_json::Value {
    let all_priced = gathered.unsourced.is_empty();
    let stages: Vec<serde_json::Value> = stages
        .iter()
        .map(|stage| match &stage.outcome {
            StageOutcome::Planned(plan) => {
                let picks: Vec<serde_json::Value> = plan
                    .selection
                    .picks()
                    .map(|(card, pick)| {
                        json!({
                            "card": card,
                            "store": pick.store,
                            "quantity": pick.quantity,
                            "unit_price": pick.unit_price,
                            "cost": pick.cost(),
                        })
                    })
                    .collect();
                json!({
                    "limit": stage.limit,
                    "skipped": false,
                    "feasible": plan.total.is_feasible(),
                    "complete": all_priced && plan.total.is_feasible(),
                    "total": plan.total.cost(),
                    "stores": plan.selection.stores_used(),
                    "picks": picks,
                    "unsourced": plan.selection.unsourced(),
                })
            }
            StageOutcome::Skipped { combinations } => json!({
                "limit": stage.limit,
                "skipped": true,
                "combinations": combinations.map(|c| c.to_string()),
            }),
        })
        .collect();

    json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "deck": deck.iter().collect::<Vec<_>>(),
        "unsourced": gathered.unsourced,
        "complete": all_priced,
        "stages": stages,
    })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
