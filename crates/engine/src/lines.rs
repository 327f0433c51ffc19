//! Insertion-ordered store of DC lines keyed by stable identifiers.

use dcsize_core::{DcLine, DeviceKind, DeviceTally, LineDemand, LineId, SizingError, SizingResult};
use serde::{Deserialize, Serialize};

/// The lines of one project.
///
/// Identifiers start at 1 and are never reused, even after [`clear`](Self::clear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBook {
    lines: Vec<DcLine>,
    next_id: u32,
}

impl Default for LineBook {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            next_id: 1,
        }
    }
}

impl LineBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tally: DeviceTally) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        self.lines.push(DcLine { id, tally });
        tracing::debug!(line = %id, demand = %tally.demand(), "line added");
        id
    }

    pub fn get(&self, id: LineId) -> Option<&DcLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Sets one device count on an existing line.
    pub fn set_device(&mut self, id: LineId, kind: DeviceKind, value: u32) -> SizingResult<()> {
        let value = kind.check_count(value)?;
        let line = self.get_mut(id)?;
        line.tally.set(kind, value);
        Ok(())
    }

    pub fn replace(&mut self, id: LineId, tally: DeviceTally) -> SizingResult<()> {
        tally.validate()?;
        self.get_mut(id)?.tally = tally;
        Ok(())
    }

    /// Checks every line's counts, e.g. after loading a project file.
    pub fn validate(&self) -> SizingResult<()> {
        for line in &self.lines {
            line.tally.validate().map_err(|e| match e {
                SizingError::InvalidInput(reason) => {
                    SizingError::InvalidInput(format!("DC line {}: {reason}", line.id))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[DcLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &DcLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every line's demand.
    pub fn total_demand(&self) -> LineDemand {
        self.lines.iter().map(|l| l.tally.demand()).sum()
    }

    fn get_mut(&mut self, id: LineId) -> SizingResult<&mut DcLine> {
        self.lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(SizingError::LineNotFound(id))
    }
}
