//! Tests for report formatting

use super::*;
use crate::optimizer::{optimize, select, sweep};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn listing(store: &str, quantity: u32, price: Decimal) -> Listing {
    Listing {
        store: store.to_string(),
        edition: "Fourth Edition".to_string(),
        available_quantity: quantity,
        unit_price: price,
    }
}

/// Sol Ring only at StoreB, Lightning Bolt only at StoreA
fn split_fixture() -> (Deck, PriceMatrix) {
    let mut deck = Deck::new();
    deck.add("Lightning Bolt", 4);
    deck.add("Sol Ring", 1);

    let mut matrix = PriceMatrix::new();
    matrix.insert_listings("Lightning Bolt", 4, &[listing("StoreA", 10, dec!(1.00))]);
    matrix.insert_listings("Sol Ring", 1, &[listing("StoreB", 1, dec!(4.50))]);
    (deck, matrix)
}

#[test]
fn format_listings_sorts_by_price() {
    let output = format_listings(
        "Sol Ring",
        &[listing("Pricey", 1, dec!(9.00)), listing("Cheap", 1, dec!(1.00))],
        "R$",
    );

    assert!(output.contains("Sol Ring"));
    assert!(output.contains("R$ 1.00"));
    assert!(output.find("Cheap").unwrap() < output.find("Pricey").unwrap());
}

#[test]
fn format_deck_numbers_cards() {
    let (deck, _) = split_fixture();
    let output = format_deck(&deck);

    assert!(output.contains("  0: 4x Lightning Bolt"));
    assert!(output.contains("  1: 1x Sol Ring"));
}

#[test]
fn format_unsourced_lists_cards() {
    assert_eq!(format_unsourced(&[]), "");
    let output = format_unsourced(&["Black Lotus".to_string()]);
    assert!(output.starts_with("WARNING: 1 card(s)"));
    assert!(output.contains("Black Lotus"));
}

#[test]
fn price_table_marks_selection_without_color() {
    let (deck, matrix) = split_fixture();
    let plan = select(&matrix, &matrix.cards(), &matrix.stores());

    let output = format_price_table(&deck, &matrix, Some(&plan.selection), false);

    assert!(output.contains("* StoreA"));
    assert!(output.contains("* StoreB"));
    assert!(output.contains("1.00*"));
    assert!(output.contains("4.50*"));
    assert!(output.contains('.'));
    assert!(!output.contains('\u{1b}'));
}

#[test]
fn price_table_colors_selection() {
    let (deck, matrix) = split_fixture();
    let plan = select(&matrix, &matrix.cards(), &matrix.stores());

    let output = format_price_table(&deck, &matrix, Some(&plan.selection), true);

    assert!(output.contains('\u{1b}'));
    assert!(!output.contains('*'));
}

#[test]
fn price_table_skips_cards_missing_from_matrix() {
    let (mut deck, matrix) = split_fixture();
    deck.add("Black Lotus", 1);

    let output = format_price_table(&deck, &matrix, None, false);
    let header = output.lines().nth(1).unwrap();

    // Black Lotus sorts first, so it would have been column 0
    assert!(!header.contains(" 0 "));
    assert!(header.contains('1'));
    assert!(header.contains('2'));
}

#[test]
fn format_total_feasible() {
    let (_, matrix) = split_fixture();
    let plan = select(&matrix, &matrix.cards(), &matrix.stores());

    let output = format_total(&plan, 0, "R$");
    assert_eq!(output, "# Total = R$ 8.50 (2 stores: StoreA, StoreB)\n");
}

#[test]
fn format_total_marks_partial_coverage() {
    let (_, matrix) = split_fixture();
    let plan = select(&matrix, &matrix.cards(), &matrix.stores());

    let output = format_total(&plan, 2, "R$");
    assert_eq!(
        output,
        "# Total = R$ 8.50 (2 stores: StoreA, StoreB), partial: 2 card(s) not priced\n"
    );
}

#[test]
fn format_total_infeasible_hides_number() {
    let (_, matrix) = split_fixture();
    let plan = optimize(&matrix, &matrix.stores(), &matrix.cards(), 1);

    let output = format_total(&plan, 0, "R$");

    assert!(output.starts_with("# No feasible assignment"));
    assert!(output.contains("1 card(s)"));
    assert!(!output.contains("R$"));
}

#[test]
fn shopping_list_groups_by_store() {
    let (_, matrix) = split_fixture();
    let plan = select(&matrix, &matrix.cards(), &matrix.stores());

    let output = format_shopping_list(&plan, "R$");

    assert_eq!(
        output,
        "StoreA\n    4x Lightning Bolt @ R$ 1.00\nStoreB\n    1x Sol Ring @ R$ 4.50\n"
    );
}

#[test]
fn format_stage_headings() {
    let (deck, matrix) = split_fixture();
    let stages = sweep(&matrix, 5, 100);
    let gathered = Gathered {
        matrix: matrix.clone(),
        unsourced: Vec::new(),
    };

    let unconstrained = format_stage(&stages[0], &deck, &gathered, "R$", false);
    assert!(unconstrained.contains("# Cheapest per card"));
    assert!(unconstrained.contains("# Total = R$ 8.50"));

    let single = format_stage(&stages[2], &deck, &gathered, "R$", false);
    assert!(single.contains("# Optimized 1"));
    assert!(single.contains("# No feasible assignment"));

    let skipped = Stage {
        limit: Some(3),
        outcome: StageOutcome::Skipped {
            combinations: Some(120),
        },
    };
    let output = format_stage(&skipped, &deck, &gathered, "R$", false);
    assert!(output.contains("Skipped: 120 store combinations"));
}

#[test]
fn json_report_shape() {
    let (deck, matrix) = split_fixture();
    let stages = sweep(&matrix, 5, 100);
    let gathered = Gathered {
        matrix: matrix.clone(),
        unsourced: vec!["Black Lotus".to_string()],
    };

    let report = json_report(&deck, &gathered, &stages);

    assert!(report["generated_at"].is_string());
    assert_eq!(report["unsourced"][0], "Black Lotus");
    assert_eq!(report["stages"].as_array().unwrap().len(), 3);
    assert_eq!(report["complete"], false);
    assert_eq!(report["stages"][0]["feasible"], true);
    assert_eq!(report["stages"][0]["complete"], false);
    assert_eq!(report["stages"][0]["picks"].as_array().unwrap().len(), 2);
    assert_eq!(report["stages"][2]["feasible"], false);
    assert_eq!(report["stages"][2]["complete"], false);
    assert!(report["stages"][2]["total"].is_null());
}

#[test]
fn json_report_complete_when_every_card_priced() {
    let (deck, matrix) = split_fixture();
    let stages = sweep(&matrix, 5, 100);
    let gathered = Gathered {
        matrix,
        unsourced: Vec::new(),
    };

    let report = json_report(&deck, &gathered, &stages);

    assert_eq!(report["complete"], true);
    assert_eq!(report["stages"][0]["complete"], true);
    assert_eq!(report["stages"][2]["complete"], false);
}

#[test]
fn format_stage_with_nothing_priced() {
    let mut deck = Deck::new();
    deck.add("Black Lotus", 1);
    let gathered = Gathered {
        matrix: PriceMatrix::new(),
        unsourced: vec!["Black Lotus".to_string()],
    };
    let stages = sweep(&gathered.matrix, 5, 1000);
    assert_eq!(stages.len(), 1);

    let output = format_stage(&stages[0], &deck, &gathered, "R$", false);

    assert!(output.contains("# No cards could be priced: 1 card(s) left out"));
    assert!(!output.contains("Store / Card"));
    assert!(!output.contains("R$ 0.00"));

    let report = json_report(&deck, &gathered, &stages);
    assert_eq!(report["stages"][0]["complete"], false);
}
