use super::{select, Combinations, Plan};
use crate::matrix::PriceMatrix;

/// Finds the cheapest plan that uses exactly `k` of `stores`.
///
/// Every k-subset of the sorted store list is scored with [`select`] in
/// lexicographic order; a later subset replaces the best only when its total
/// is strictly lower. `k` is clamped to the number of stores, so a budget at
/// or above it gives the unconstrained result. When no subset can source
/// every card the returned plan's total is infeasible.
pub fn optimize(matrix: &PriceMatrix, stores: &[String], cards: &[String], k: usize) -> Plan {
    let mut universe = stores.to_vec();
    universe.sort();
    universe.dedup();
    let k = k.min(universe.len());

    log::debug!("Evaluating {}-store subsets of {} stores", k, universe.len());

    Combinations::new(universe.len(), k)
        .map(|indices| {
            let subset: Vec<String> = indices.iter().map(|&i| universe[i].clone()).collect();
            select(matrix, cards, &subset)
        })
        .fold(None, |best: Option<Plan>, plan| match best {
            Some(best) if plan.total >= best.total => Some(best),
            _ => Some(plan),
        })
        .unwrap_or_else(|| select(matrix, cards, &[]))
}
