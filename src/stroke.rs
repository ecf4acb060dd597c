use std::collections::HashMap;

use egui::Color32;

use crate::grid::{CellPos, Grid};

/// One cell transition recorded by a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub pos: CellPos,
    /// Color the stroke leaves in the cell
    pub color: Color32,
    /// Color the cell held before the stroke began
    pub previous: Color32,
}

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    /// A press-to-release drawing gesture
    Draw,
    /// Resetting the canvas to its background
    Clear,
}

impl StrokeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Draw => "Draw",
            Self::Clear => "Clear",
        }
    }
}

// Immutable stroke owned by the history
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    kind: StrokeKind,
    changes: Vec<CellChange>,
}

impl Stroke {
    pub fn new(kind: StrokeKind, changes: Vec<CellChange>) -> Self {
        Self { kind, changes }
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Put back the colors every touched cell had before the stroke.
    /// Returns the cells that need repainting.
    pub fn undo_on(&self, grid: &mut Grid) -> Vec<CellPos> {
        self.write(grid, |change| change.previous)
    }

    /// Reapply the stroke's colors. Returns the cells that need repainting.
    pub fn redo_on(&self, grid: &mut Grid) -> Vec<CellPos> {
        self.write(grid, |change| change.color)
    }

    fn write(&self, grid: &mut Grid, pick: impl Fn(&CellChange) -> Color32) -> Vec<CellPos> {
        let mut dirty = Vec::with_capacity(self.changes.len());
        for change in &self.changes {
            match grid.set(change.pos.x, change.pos.y, pick(change)) {
                Ok(_) => dirty.push(change.pos),
                Err(err) => log::error!("Stroke cell no longer fits the grid: {}", err),
            }
        }
        dirty
    }
}

// Mutable stroke buffer for the gesture in progress
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    kind: StrokeKind,
    changes: Vec<CellChange>,
    /// Position of each cell's entry in `changes`
    seen: HashMap<CellPos, usize>,
}

impl StrokeBuilder {
    pub fn new(kind: StrokeKind) -> Self {
        Self {
            kind,
            changes: Vec::new(),
            seen: HashMap::new(),
        }
    }

    /// Record that `pos` now holds `color` after holding `previous`.
    ///
    /// The first recorded `previous` for a cell wins; later writes only
    /// update the color the stroke leaves behind.
    pub fn record(&mut self, pos: CellPos, color: Color32, previous: Color32) {
        match self.seen.get(&pos) {
            Some(&index) => self.changes[index].color = color,
            None => {
                self.seen.insert(pos, self.changes.len());
                self.changes.push(CellChange { pos, color, previous });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Undo this buffer's writes on `grid` without producing a stroke
    pub fn revert(&self, grid: &mut Grid) -> Vec<CellPos> {
        Stroke::new(self.kind, self.changes.clone()).undo_on(grid)
    }

    /// Convert to an immutable stroke, or `None` if nothing was recorded
    pub fn finish(self) -> Option<Stroke> {
        if self.changes.is_empty() {
            None
        } else {
            Some(Stroke::new(self.kind, self.changes))
        }
    }
}
