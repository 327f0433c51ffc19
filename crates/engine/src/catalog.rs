//! Static hardware catalog: controller models and expansion modules.
//!
//! Fixed reference data for the lifetime of a run. The entry order is part
//! of the contract: selectors break cost ties by taking the first
//! combination found in this order.

use dcsize_core::{ControllerKind, ControllerModel, ExpansionModule, ModuleId};

/// Controllers and expansion modules available to the selectors.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Search order: kt-400, kt-2, kt-1.
    pub controllers: [ControllerModel; 3],
    pub modules: [ExpansionModule; 7],
    /// Input-focused module used when no two-module combination suffices.
    pub fallback_input: ModuleId,
    /// Output-focused module used when no two-module combination suffices.
    pub fallback_output: ModuleId,
}

impl Catalog {
    /// The standard catalog.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn controller(&self, kind: ControllerKind) -> &ControllerModel {
        match kind {
            ControllerKind::Kt400 => &self.controllers[0],
            ControllerKind::Kt2 => &self.controllers[1],
            ControllerKind::Kt1 => &self.controllers[2],
        }
    }

    pub fn module(&self, id: ModuleId) -> Option<&ExpansionModule> {
        self.modules.iter().find(|m| m.id == id)
    }
}

static STANDARD: Catalog = Catalog {
    controllers: [
        ControllerModel::new(ControllerKind::Kt400, 4, 16, 4, 1400),
        ControllerModel::new(ControllerKind::Kt2, 2, 8, 2, 750),
        ControllerModel::new(ControllerKind::Kt1, 1, 4, 2, 450),
    ],
    modules: [
        // ── inout16: one board, 16 channels split between inputs and outputs ──
        module(ModuleId::Inout16In16, 16, 0, 447),
        module(ModuleId::Inout16In12, 12, 4, 447),
        module(ModuleId::Inout16In8, 8, 8, 447),
        module(ModuleId::Inout16In4, 4, 12, 447),
        module(ModuleId::Inout16In0, 0, 16, 447),
        // ── dedicated boards ──
        module(ModuleId::In16, 16, 0, 470),
        module(ModuleId::R8, 0, 8, 470),
    ],
    fallback_input: ModuleId::In16,
    fallback_output: ModuleId::R8,
};

const fn module(id: ModuleId, inputs: u32, outputs: u32, cost: u64) -> ExpansionModule {
    ExpansionModule {
        id,
        inputs,
        outputs,
        cost,
    }
}
