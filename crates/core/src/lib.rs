//! Domain models, shared types, and error definitions.
//!
//! Foundation crate -- no I/O dependencies.

pub mod error;
pub mod types;

pub use error::{SizingError, SizingResult};
pub use types::{
    AddOn, AddOnKind, ControllerAllocation, ControllerCounts, ControllerKind, ControllerModel,
    Cost, DcLine, DeviceKind, DeviceTally, ExpansionAllocation, ExpansionModule, FleetResult,
    FleetTotals, LicenseDecision, LicenseOutcome, LicensePricing, LicenseTier, LineDemand,
    LineId, LineResult, ModuleId, ModulePick, Shortage, MAX_DEVICE_COUNT,
};
