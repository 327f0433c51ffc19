//! Least-cost expansion module selection for a line's I/O shortage.
//!
//! Staged search, first satisfying tier wins:
//!   1. Nothing, when both shortages are zero.
//!   2. Cheapest single module covering both shortages.
//!   3. Cheapest ordered pair (repeats allowed) covering both shortages.
//!   4. Fallback: `ceil(inputs / 16)` x in16 plus `ceil(outputs / 8)` x r8,
//!      sized independently. Not jointly minimized.

use crate::catalog::Catalog;
use dcsize_core::{Cost, ExpansionAllocation, ExpansionModule, ModuleId, ModulePick, Shortage};
use smallvec::{smallvec, SmallVec};

/// Picks the modules that cover `shortage` at least cost.
pub fn select_expansion(shortage: Shortage, catalog: &Catalog) -> ExpansionAllocation {
    let allocation = if shortage.is_zero() {
        ExpansionAllocation::none()
    } else if let Some(single) = best_single(shortage, catalog) {
        single
    } else if let Some(pair) = best_pair(shortage, catalog) {
        pair
    } else {
        fallback(shortage, catalog)
    };

    tracing::debug!(
        input_shortage = shortage.inputs,
        output_shortage = shortage.outputs,
        modules = %allocation,
        cost = allocation.cost,
        "expansion selected"
    );
    allocation
}

fn covers(inputs: u32, outputs: u32, shortage: Shortage) -> bool {
    inputs >= shortage.inputs && outputs >= shortage.outputs
}

fn best_single(shortage: Shortage, catalog: &Catalog) -> Option<ExpansionAllocation> {
    let mut best: Option<&ExpansionModule> = None;
    for module in &catalog.modules {
        if !covers(module.inputs, module.outputs, shortage) {
            continue;
        }
        if best.map_or(true, |b| module.cost < b.cost) {
            best = Some(module);
        }
    }

    best.map(|m| ExpansionAllocation {
        picks: smallvec![ModulePick::one(m.id)],
        cost: m.cost,
    })
}

fn best_pair(shortage: Shortage, catalog: &Catalog) -> Option<ExpansionAllocation> {
    let mut best: Option<(Cost, ModuleId, ModuleId)> = None;
    for first in &catalog.modules {
        for second in &catalog.modules {
            if !covers(
                first.inputs + second.inputs,
                first.outputs + second.outputs,
                shortage,
            ) {
                continue;
            }
            let cost = first.cost + second.cost;
            if best.map_or(true, |(best_cost, _, _)| cost < best_cost) {
                best = Some((cost, first.id, second.id));
            }
        }
    }

    best.map(|(cost, first, second)| ExpansionAllocation {
        picks: smallvec![ModulePick::one(first), ModulePick::one(second)],
        cost,
    })
}

fn fallback(shortage: Shortage, catalog: &Catalog) -> ExpansionAllocation {
    let mut picks: SmallVec<[ModulePick; 2]> = SmallVec::new();
    let mut cost = 0;

    let sides: [(ModuleId, u32, fn(&ExpansionModule) -> u32); 2] = [
        (catalog.fallback_input, shortage.inputs, |m| m.inputs),
        (catalog.fallback_output, shortage.outputs, |m| m.outputs),
    ];
    for (id, needed, capacity) in sides {
        if needed == 0 {
            continue;
        }
        let Some(module) = catalog.module(id) else {
            continue;
        };
        let count = needed.div_ceil(capacity(module));
        picks.push(ModulePick::fallback(id, count));
        cost += count as Cost * module.cost;
    }

    ExpansionAllocation { picks, cost }
}
