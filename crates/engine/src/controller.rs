//! Least-cost controller selection for one line's reader demand.
//!
//! Bounded exhaustive search over the three catalog variants. Each
//! variant's trial count runs from zero to `max(1, readers / per_unit + 2)`
//! inclusive, so the space stays small and always contains a feasible
//! combination. Demands above [`MAX_READERS`] are refused before searching.

use crate::catalog::Catalog;
use dcsize_core::{
    ControllerAllocation, ControllerCounts, Cost, SizingError, SizingResult, MAX_DEVICE_COUNT,
};

/// Largest reader demand one line can carry: both reader kinds at their ceiling.
pub const MAX_READERS: u32 = 2 * MAX_DEVICE_COUNT;

/// Finds the cheapest controller multiset providing at least
/// `readers_required` readers.
///
/// Enumeration order is kt-400 (outer), kt-2, kt-1 (inner); a candidate
/// replaces the incumbent only when strictly cheaper, so ties resolve to the
/// first combination enumerated.
pub fn select_controllers(
    readers_required: u32,
    catalog: &Catalog,
) -> SizingResult<ControllerAllocation> {
    if readers_required > MAX_READERS {
        return Err(SizingError::InvalidInput(format!(
            "{readers_required} readers on one line, at most {MAX_READERS} supported"
        )));
    }

    let [large, medium, small] = &catalog.controllers;

    let max_large = search_bound(readers_required, large.readers);
    let max_medium = search_bound(readers_required, medium.readers);
    let max_small = search_bound(readers_required, small.readers);

    let mut best: Option<(Cost, ControllerCounts)> = None;

    for n_large in 0..=max_large {
        for n_medium in 0..=max_medium {
            for n_small in 0..=max_small {
                let readers = u64::from(n_large) * u64::from(large.readers)
                    + u64::from(n_medium) * u64::from(medium.readers)
                    + u64::from(n_small) * u64::from(small.readers);
                if readers < u64::from(readers_required) {
                    continue;
                }

                let cost = n_large as Cost * large.cost
                    + n_medium as Cost * medium.cost
                    + n_small as Cost * small.cost;

                if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                    best = Some((
                        cost,
                        ControllerCounts {
                            kt_400: n_large,
                            kt_2: n_medium,
                            kt_1: n_small,
                        },
                    ));
                }
            }
        }
    }

    let Some((_, counts)) = best else {
        tracing::warn!(readers_required, "no feasible controller combination");
        return Err(SizingError::Infeasible { readers_required });
    };

    let allocation = allocation_for(counts, catalog);
    tracing::debug!(
        readers_required,
        kt_400 = counts.kt_400,
        kt_2 = counts.kt_2,
        kt_1 = counts.kt_1,
        cost = allocation.cost,
        "controllers selected"
    );
    Ok(allocation)
}

/// Capacity and cost of a given controller mix.
pub fn allocation_for(counts: ControllerCounts, catalog: &Catalog) -> ControllerAllocation {
    let mut allocation = ControllerAllocation {
        counts,
        ..Default::default()
    };
    for model in &catalog.controllers {
        let n = counts.get(model.kind);
        allocation.readers_provided = allocation
            .readers_provided
            .saturating_add(n.saturating_mul(model.readers));
        allocation.inputs_provided = allocation
            .inputs_provided
            .saturating_add(n.saturating_mul(model.inputs));
        allocation.outputs_provided = allocation
            .outputs_provided
            .saturating_add(n.saturating_mul(model.outputs));
        allocation.cost = allocation
            .cost
            .saturating_add(Cost::from(n).saturating_mul(model.cost));
    }
    allocation
}

/// Upper trial count for one variant.
fn search_bound(readers_required: u32, per_unit: u32) -> u32 {
    readers_required
        .checked_div(per_unit)
        .map_or(1, |units| units.saturating_add(2))
        .max(1)
}
