use super::{combination_count, optimize, select, Plan};
use crate::matrix::PriceMatrix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Planned(Plan),
    /// Too many subsets to evaluate within the combination limit
    Skipped { combinations: Option<u128> },
}

/// One report section: the unconstrained plan (`limit == None`) or the best
/// plan for a fixed number of stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub limit: Option<usize>,
    pub outcome: StageOutcome,
}

impl Stage {
    pub fn plan(&self) -> Option<&Plan> {
        match &self.outcome {
            StageOutcome::Planned(plan) => Some(plan),
            StageOutcome::Skipped { .. } => None,
        }
    }
}

/// Runs the unconstrained selection, then the subset search for every store
/// budget from `max_stores` (capped at the number of stores) down to one.
pub fn sweep(matrix: &PriceMatrix, max_stores: usize, combination_limit: u64) -> Vec<Stage> {
    let cards = matrix.cards();
    let stores = matrix.stores();

    log::info!(
        "Optimizing {} cards across {} stores",
        cards.len(),
        stores.len()
    );

    let mut stages = vec![Stage {
        limit: None,
        outcome: StageOutcome::Planned(select(matrix, &cards, &stores)),
    }];

    for k in (1..=max_stores.min(stores.len())).rev() {
        let combinations = combination_count(stores.len(), k);
        let outcome = match combinations {
            Some(count) if count <= u128::from(combination_limit) => {
                StageOutcome::Planned(optimize(matrix, &stores, &cards, k))
            }
            _ => {
                log::warn!(
                    "Skipping {}-store search: {} combinations exceed the limit of {}",
                    k,
                    combinations.map_or_else(|| "too many".to_string(), |c| c.to_string()),
                    combination_limit
                );
                StageOutcome::Skipped { combinations }
            }
        };
        stages.push(Stage {
            limit: Some(k),
            outcome,
        });
    }

    stages
}
