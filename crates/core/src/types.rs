//! Domain types for the door-control sizing engine.

use crate::error::{SizingError, SizingResult};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Whole currency units.
pub type Cost = u64;

// ---------------------------------------------------------------------------
// Lines and device tallies
// ---------------------------------------------------------------------------

/// Stable identifier of a DC line, assigned in insertion order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LineId {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(LineId)
            .map_err(|_| SizingError::InvalidInput(format!("not a DC line number: {s:?}")))
    }
}

/// The eleven device kinds tallied per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    SmartCard,
    Fingerprint,
    DoorSensor,
    MagneticLock,
    ElectricLock,
    RexButton,
    PushButton,
    BreakGlass,
    Buzzer,
    DoubleDoorLock,
    DdlSensors,
}

impl DeviceKind {
    /// Entry order used by prompts and summaries.
    pub const ALL: [DeviceKind; 11] = [
        DeviceKind::SmartCard,
        DeviceKind::Fingerprint,
        DeviceKind::DoorSensor,
        DeviceKind::MagneticLock,
        DeviceKind::ElectricLock,
        DeviceKind::RexButton,
        DeviceKind::PushButton,
        DeviceKind::BreakGlass,
        DeviceKind::Buzzer,
        DeviceKind::DoubleDoorLock,
        DeviceKind::DdlSensors,
    ];

    /// Machine name, as accepted on the command line and in project files.
    pub fn name(self) -> &'static str {
        match self {
            DeviceKind::SmartCard => "smart_card",
            DeviceKind::Fingerprint => "fingerprint",
            DeviceKind::DoorSensor => "door_sensor",
            DeviceKind::MagneticLock => "magnetic_lock",
            DeviceKind::ElectricLock => "electric_lock",
            DeviceKind::RexButton => "rex_button",
            DeviceKind::PushButton => "push_button",
            DeviceKind::BreakGlass => "break_glass",
            DeviceKind::Buzzer => "buzzer",
            DeviceKind::DoubleDoorLock => "double_door_lock",
            DeviceKind::DdlSensors => "ddl_sensors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::SmartCard => "Indoor Smart Card Reader",
            DeviceKind::Fingerprint => "Fingerprint Reader",
            DeviceKind::DoorSensor => "Door Sensor",
            DeviceKind::MagneticLock => "Magnetic Door Lock",
            DeviceKind::ElectricLock => "Electric Door Lock",
            DeviceKind::RexButton => "REX Button",
            DeviceKind::PushButton => "Push Button w/ Indicator",
            DeviceKind::BreakGlass => "Break Glass",
            DeviceKind::Buzzer => "Buzzer",
            DeviceKind::DoubleDoorLock => "Double Door Lock",
            DeviceKind::DdlSensors => "DDL Sensors",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeviceKind {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        DeviceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == key)
            .ok_or_else(|| SizingError::InvalidInput(format!("unknown device kind: {s:?}")))
    }
}

/// Largest count accepted for any single device kind on one line.
pub const MAX_DEVICE_COUNT: u32 = 100;

impl DeviceKind {
    /// Accepts `value` if it is within [`MAX_DEVICE_COUNT`].
    pub fn check_count(self, value: u32) -> SizingResult<u32> {
        if value > MAX_DEVICE_COUNT {
            return Err(SizingError::InvalidInput(format!(
                "{self}: at most {MAX_DEVICE_COUNT} per line, got {value}"
            )));
        }
        Ok(value)
    }
}

/// Raw device counts for one DC line.
///
/// Counts are unsigned, so a tally that exists is already non-negative;
/// rejecting negative or non-numeric input is the parser's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceTally {
    pub smart_card: u32,
    pub fingerprint: u32,
    pub door_sensor: u32,
    pub magnetic_lock: u32,
    pub electric_lock: u32,
    pub rex_button: u32,
    pub push_button: u32,
    pub break_glass: u32,
    pub buzzer: u32,
    pub double_door_lock: u32,
    pub ddl_sensors: u32,
}

impl DeviceTally {
    pub fn get(&self, kind: DeviceKind) -> u32 {
        match kind {
            DeviceKind::SmartCard => self.smart_card,
            DeviceKind::Fingerprint => self.fingerprint,
            DeviceKind::DoorSensor => self.door_sensor,
            DeviceKind::MagneticLock => self.magnetic_lock,
            DeviceKind::ElectricLock => self.electric_lock,
            DeviceKind::RexButton => self.rex_button,
            DeviceKind::PushButton => self.push_button,
            DeviceKind::BreakGlass => self.break_glass,
            DeviceKind::Buzzer => self.buzzer,
            DeviceKind::DoubleDoorLock => self.double_door_lock,
            DeviceKind::DdlSensors => self.ddl_sensors,
        }
    }

    pub fn set(&mut self, kind: DeviceKind, value: u32) {
        let slot = match kind {
            DeviceKind::SmartCard => &mut self.smart_card,
            DeviceKind::Fingerprint => &mut self.fingerprint,
            DeviceKind::DoorSensor => &mut self.door_sensor,
            DeviceKind::MagneticLock => &mut self.magnetic_lock,
            DeviceKind::ElectricLock => &mut self.electric_lock,
            DeviceKind::RexButton => &mut self.rex_button,
            DeviceKind::PushButton => &mut self.push_button,
            DeviceKind::BreakGlass => &mut self.break_glass,
            DeviceKind::Buzzer => &mut self.buzzer,
            DeviceKind::DoubleDoorLock => &mut self.double_door_lock,
            DeviceKind::DdlSensors => &mut self.ddl_sensors,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, kind: DeviceKind, value: u32) -> Self {
        self.set(kind, value);
        self
    }

    /// Fails on the first device kind above [`MAX_DEVICE_COUNT`].
    pub fn validate(&self) -> SizingResult<()> {
        for kind in DeviceKind::ALL {
            kind.check_count(self.get(kind))?;
        }
        Ok(())
    }

    /// Derives the reader/input/output demand for this line.
    ///
    /// A double door lock occupies one input channel and one output
    /// channel, so it is counted once on each side. Sums saturate at
    /// `u32::MAX`.
    pub fn demand(&self) -> LineDemand {
        let total = |counts: &[u32]| counts.iter().fold(0u32, |acc, n| acc.saturating_add(*n));
        LineDemand {
            readers: total(&[self.smart_card, self.fingerprint]),
            inputs: total(&[
                self.door_sensor,
                self.rex_button,
                self.push_button,
                self.break_glass,
                self.buzzer,
                self.magnetic_lock,
                self.ddl_sensors,
                self.double_door_lock,
            ]),
            outputs: total(&[
                self.magnetic_lock,
                self.electric_lock,
                self.ddl_sensors,
                self.double_door_lock,
            ]),
        }
    }
}

/// One DC line: identifier plus its device tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcLine {
    pub id: LineId,
    pub tally: DeviceTally,
}

/// Demand triple derived from a [`DeviceTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDemand {
    pub readers: u32,
    pub inputs: u32,
    pub outputs: u32,
}

impl Add for LineDemand {
    type Output = LineDemand;

    fn add(self, rhs: LineDemand) -> LineDemand {
        LineDemand {
            readers: self.readers.saturating_add(rhs.readers),
            inputs: self.inputs.saturating_add(rhs.inputs),
            outputs: self.outputs.saturating_add(rhs.outputs),
        }
    }
}

impl Sum for LineDemand {
    fn sum<I: Iterator<Item = LineDemand>>(iter: I) -> LineDemand {
        iter.fold(LineDemand::default(), Add::add)
    }
}

impl fmt::Display for LineDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}R/{}I/{}O", self.readers, self.inputs, self.outputs)
    }
}

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// Controller variants, in search order (largest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    #[serde(rename = "kt-400")]
    Kt400,
    #[serde(rename = "kt-2")]
    Kt2,
    #[serde(rename = "kt-1")]
    Kt1,
}

impl ControllerKind {
    pub const ALL: [ControllerKind; 3] = [
        ControllerKind::Kt400,
        ControllerKind::Kt2,
        ControllerKind::Kt1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControllerKind::Kt400 => "kt-400",
            ControllerKind::Kt2 => "kt-2",
            ControllerKind::Kt1 => "kt-1",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerModel {
    pub kind: ControllerKind,
    pub readers: u32,
    pub inputs: u32,
    pub outputs: u32,
    pub cost: Cost,
}

impl ControllerModel {
    pub const fn new(
        kind: ControllerKind,
        readers: u32,
        inputs: u32,
        outputs: u32,
        cost: Cost,
    ) -> Self {
        Self {
            kind,
            readers,
            inputs,
            outputs,
            cost,
        }
    }
}

/// Expansion module identifiers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleId {
    #[serde(rename = "inout16 (16/0)")]
    Inout16In16,
    #[serde(rename = "inout16 (12/4)")]
    Inout16In12,
    #[serde(rename = "inout16 (8/8)")]
    Inout16In8,
    #[serde(rename = "inout16 (4/12)")]
    Inout16In4,
    #[serde(rename = "inout16 (0/16)")]
    Inout16In0,
    #[serde(rename = "in16")]
    In16,
    #[serde(rename = "r8")]
    R8,
}

impl ModuleId {
    pub fn name(self) -> &'static str {
        match self {
            ModuleId::Inout16In16 => "inout16 (16/0)",
            ModuleId::Inout16In12 => "inout16 (12/4)",
            ModuleId::Inout16In8 => "inout16 (8/8)",
            ModuleId::Inout16In4 => "inout16 (4/12)",
            ModuleId::Inout16In0 => "inout16 (0/16)",
            ModuleId::In16 => "in16",
            ModuleId::R8 => "r8",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionModule {
    pub id: ModuleId,
    pub inputs: u32,
    pub outputs: u32,
    pub cost: Cost,
}

// ---------------------------------------------------------------------------
// Allocations
// ---------------------------------------------------------------------------

/// Unit counts per controller variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerCounts {
    #[serde(rename = "kt-400")]
    pub kt_400: u32,
    #[serde(rename = "kt-2")]
    pub kt_2: u32,
    #[serde(rename = "kt-1")]
    pub kt_1: u32,
}

impl ControllerCounts {
    pub fn get(&self, kind: ControllerKind) -> u32 {
        match kind {
            ControllerKind::Kt400 => self.kt_400,
            ControllerKind::Kt2 => self.kt_2,
            ControllerKind::Kt1 => self.kt_1,
        }
    }

    pub fn total(&self) -> u32 {
        self.kt_400 + self.kt_2 + self.kt_1
    }
}

impl AddAssign for ControllerCounts {
    fn add_assign(&mut self, rhs: ControllerCounts) {
        self.kt_400 += rhs.kt_400;
        self.kt_2 += rhs.kt_2;
        self.kt_1 += rhs.kt_1;
    }
}

/// `kt-400(1) kt-1(2)`; zero variants omitted, `None` when empty.
impl fmt::Display for ControllerCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ControllerKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) > 0)
            .map(|kind| format!("{}({})", kind, self.get(kind)))
            .collect();
        if parts.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Controllers chosen for one line plus the capacity they bring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerAllocation {
    pub counts: ControllerCounts,
    pub readers_provided: u32,
    pub inputs_provided: u32,
    pub outputs_provided: u32,
    pub cost: Cost,
}

impl ControllerAllocation {
    /// Input/output gap left after these controllers, floored at zero.
    pub fn shortage(&self, demand: &LineDemand) -> Shortage {
        Shortage {
            inputs: demand.inputs.saturating_sub(self.inputs_provided),
            outputs: demand.outputs.saturating_sub(self.outputs_provided),
        }
    }

    pub fn extra_readers(&self, demand: &LineDemand) -> u32 {
        self.readers_provided.saturating_sub(demand.readers)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortage {
    pub inputs: u32,
    pub outputs: u32,
}

impl Shortage {
    pub fn is_zero(&self) -> bool {
        self.inputs == 0 && self.outputs == 0
    }
}

/// `count` units of one module.
///
/// Picks sized by the per-side fallback always carry their multiplier, even
/// for a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePick {
    pub module: ModuleId,
    pub count: u32,
    #[serde(default)]
    pub sized: bool,
}

impl ModulePick {
    pub fn one(module: ModuleId) -> Self {
        Self {
            module,
            count: 1,
            sized: false,
        }
    }

    /// `count` units sized to cover one side of a shortage.
    pub fn fallback(module: ModuleId, count: u32) -> Self {
        Self {
            module,
            count,
            sized: true,
        }
    }
}

impl fmt::Display for ModulePick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 && !self.sized {
            write!(f, "{}", self.module)
        } else {
            write!(f, "{} (x{})", self.module, self.count)
        }
    }
}

/// Expansion modules chosen for one line.
///
/// `SmallVec<[ModulePick; 2]>`: no search tier ever yields more than two picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionAllocation {
    pub picks: SmallVec<[ModulePick; 2]>,
    pub cost: Cost,
}

impl ExpansionAllocation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Physical module count, repeats included.
    pub fn module_count(&self) -> u32 {
        self.picks.iter().map(|p| p.count).sum()
    }

    /// One identifier per physical module.
    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.picks
            .iter()
            .flat_map(|p| std::iter::repeat(p.module).take(p.count as usize))
    }
}

/// `inout16 (8/8), in16 (x3)`, or `None` when empty.
impl fmt::Display for ExpansionAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.picks.is_empty() {
            return f.write_str("None");
        }
        for (i, pick) in self.picks.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pick}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResult {
    pub line: LineId,
    pub demand: LineDemand,
    pub controllers: ControllerAllocation,
    pub expansion: ExpansionAllocation,
    pub total_cost: Cost,
}

impl LineResult {
    pub fn shortage(&self) -> Shortage {
        self.controllers.shortage(&self.demand)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetTotals {
    pub controllers: ControllerCounts,
    pub controller_cost: Cost,
    pub expansion_cost: Cost,
    pub grand_total: Cost,
}

/// Per-line results in input order plus their grand totals.
///
/// Rebuilt from scratch on every calculation; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetResult {
    pub lines: Vec<LineResult>,
    pub totals: FleetTotals,
}

impl FleetResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: LineResult) {
        self.totals.controllers += line.controllers.counts;
        self.totals.controller_cost += line.controllers.cost;
        self.totals.expansion_cost += line.expansion.cost;
        self.totals.grand_total += line.total_cost;
        self.lines.push(line);
    }

    pub fn total_controllers(&self) -> u32 {
        self.totals.controllers.total()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Licensing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseTier {
    Special,
    Corporate,
    Global,
}

impl LicenseTier {
    pub fn name(self) -> &'static str {
        match self {
            LicenseTier::Special => "special",
            LicenseTier::Corporate => "corporate",
            LicenseTier::Global => "global",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LicenseTier::Special => "Kantech Special License",
            LicenseTier::Corporate => "Kantech Corporate License",
            LicenseTier::Global => "Global License",
        }
    }
}

impl fmt::Display for LicenseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    Gateway,
    Redundancy,
}

impl AddOnKind {
    pub fn display_name(self) -> &'static str {
        match self {
            AddOnKind::Gateway => "Gateway License",
            AddOnKind::Redundancy => "Redundancy License",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    pub kind: AddOnKind,
    pub cost: Cost,
}

/// Fixed add-on prices for redundant systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePricing {
    pub gateway: Cost,
    pub redundancy: Cost,
}

impl Default for LicensePricing {
    fn default() -> Self {
        Self {
            gateway: 500,
            redundancy: 750,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseDecision {
    pub tier: LicenseTier,
    pub redundancy: bool,
    pub total_controllers: u32,
    pub add_ons: SmallVec<[AddOn; 2]>,
    pub total_license_cost: Cost,
}

/// Zero controllers means the configuration is incomplete, not unlicensed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LicenseOutcome {
    NotApplicable,
    Licensed(LicenseDecision),
}

impl LicenseOutcome {
    pub fn decision(&self) -> Option<&LicenseDecision> {
        match self {
            LicenseOutcome::Licensed(d) => Some(d),
            LicenseOutcome::NotApplicable => None,
        }
    }
}
