use super::{Pick, Plan, Selection, Total};
use crate::matrix::{CardRow, PriceMatrix};
use rust_decimal::Decimal;

/// Cheapest offer for a row among `stores`, scanned in order. A later store
/// only wins when strictly cheaper, so ties go to the first store scanned.
fn cheapest<'a>(row: &CardRow, stores: &'a [String]) -> Option<(&'a str, Decimal)> {
    stores
        .iter()
        .filter_map(|store| row.cost(store).map(|cost| (store.as_str(), cost)))
        .fold(None, |best, candidate| match best {
            Some((_, best_cost)) if candidate.1 >= best_cost => best,
            _ => Some(candidate),
        })
}

/// Picks the cheapest store for each card, using only `stores`.
///
/// Stores are scanned in the order given; callers pass them sorted.
/// Cards missing from the matrix or not sold by any allowed store end up
/// unsourced and count against the total.
pub fn select(matrix: &PriceMatrix, cards: &[String], stores: &[String]) -> Plan {
    let mut selection = Selection::default();
    let mut total = Total::ZERO;

    for card in cards {
        let found = matrix
            .row(card)
            .and_then(|row| cheapest(row, stores).map(|(store, cost)| (row.quantity(), store, cost)));

        match found {
            Some((quantity, store, unit_price)) => {
                let pick = Pick {
                    store: store.to_string(),
                    unit_price,
                    quantity,
                };
                total = total.plus_cost(pick.cost());
                selection.picks.insert(card.clone(), pick);
            }
            None => {
                total = total.plus_unsourced();
                selection.unsourced.push(card.clone());
            }
        }
    }

    Plan {
        stores: stores.to_vec(),
        selection,
        total,
    }
}
