use egui::Color32;

use crate::color::parse_color;
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::grid::{CellPos, Grid};
use crate::history::History;
use crate::raster::{clip_line, rasterize};
use crate::stroke::{Stroke, StrokeBuilder, StrokeKind};

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A pointer is held down; writes accumulate into `buffer`
    Stroking {
        /// Last cell the pointer visited, on or off the grid
        last: CellPos,
        brush: Color32,
        buffer: StrokeBuilder,
    },
}

impl SessionState {
    /// Label shown in the tools panel
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Stroking { .. } => "Stroking",
        }
    }
}

/// Owns one canvas's grid and history and turns pointer gestures into
/// undoable strokes.
///
/// Pointer positions are grid coordinates and may lie outside the grid;
/// such cells are skipped, as are reserved cells. Every operation leaves the
/// grid ready for a full redraw.
#[derive(Debug)]
pub struct EditSession {
    grid: Grid,
    history: History,
    state: SessionState,
    brush: Color32,
}

impl EditSession {
    pub fn new(config: &CanvasConfig) -> CanvasResult<Self> {
        let grid = Grid::new(config)?;
        let brush = parse_color(&config.brush)?;
        Ok(Self::with_grid(grid, History::new(config.max_history), brush))
    }

    pub fn with_grid(grid: Grid, history: History, brush: Color32) -> Self {
        Self {
            grid,
            history,
            state: SessionState::Idle,
            brush,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, SessionState::Stroking { .. })
    }

    pub fn brush(&self) -> Color32 {
        self.brush
    }

    /// Change the brush. A stroke already in progress keeps the color it
    /// started with.
    pub fn set_brush(&mut self, color: Color32) {
        self.brush = color;
    }

    /// Color under the cursor, for hover highlighting
    pub fn color_at(&self, x: i32, y: i32) -> CanvasResult<Color32> {
        self.grid.get(x, y)
    }

    /// Begin a stroke at `(x, y)` and paint that cell.
    ///
    /// Pressing while a stroke is already open commits it first. Returns the
    /// cells that changed.
    pub fn press(&mut self, x: i32, y: i32) -> Vec<CellPos> {
        if self.is_stroking() {
            log::warn!("Pointer pressed during an open stroke, committing it first");
            self.release();
        }

        let pos = CellPos::new(x, y);
        let brush = self.brush;
        let mut buffer = StrokeBuilder::new(StrokeKind::Draw);
        let mut dirty = Vec::new();
        paint_cell(&mut self.grid, &mut buffer, pos, brush, &mut dirty);

        self.state = SessionState::Stroking { last: pos, brush, buffer };
        dirty
    }

    /// Extend the open stroke to `(x, y)`, painting every cell on the line
    /// from the previously visited cell. Ignored while idle.
    pub fn move_to(&mut self, x: i32, y: i32) -> Vec<CellPos> {
        let SessionState::Stroking { last, brush, buffer } = &mut self.state else {
            return Vec::new();
        };

        let target = CellPos::new(x, y);
        let mut dirty = Vec::new();
        // Only the stretch over the grid plus a one-cell margin is walked
        let edge = self.grid.size() as i32;
        if let Some((from, to)) = clip_line(*last, target, -1, edge) {
            let mut previous = *last;
            for pos in rasterize(from.x, from.y, to.x, to.y) {
                if pos == previous {
                    continue;
                }
                paint_cell(&mut self.grid, buffer, pos, *brush, &mut dirty);
                previous = pos;
            }
        }
        *last = target;
        dirty
    }

    /// Close the open stroke, committing it as one history entry if it
    /// touched any cell. Returns whether a stroke was committed.
    pub fn release(&mut self) -> bool {
        let SessionState::Stroking { buffer, .. } = std::mem::take(&mut self.state) else {
            return false;
        };
        match buffer.finish() {
            Some(stroke) => {
                self.history.commit(stroke);
                true
            }
            None => false,
        }
    }

    /// Abandon the open stroke without committing it, restoring the cells it
    /// painted. Returns the cells that changed.
    pub fn abort(&mut self) -> Vec<CellPos> {
        let SessionState::Stroking { buffer, .. } = std::mem::take(&mut self.state) else {
            return Vec::new();
        };
        if !buffer.is_empty() {
            log::debug!("Aborting stroke over {} cells", buffer.len());
        }
        buffer.revert(&mut self.grid)
    }

    /// Revert the most recent committed stroke. Refused while a stroke is
    /// open. Returns the reverted stroke.
    pub fn undo(&mut self) -> Option<&Stroke> {
        if self.is_stroking() {
            log::debug!("Undo ignored while stroking");
            return None;
        }
        let stroke = self.history.undo()?;
        stroke.undo_on(&mut self.grid);
        log::debug!("Undid {} stroke", stroke.kind().label());
        Some(stroke)
    }

    /// Reapply the most recently undone stroke. Refused while a stroke is
    /// open. Returns the reapplied stroke.
    pub fn redo(&mut self) -> Option<&Stroke> {
        if self.is_stroking() {
            log::debug!("Redo ignored while stroking");
            return None;
        }
        let stroke = self.history.redo()?;
        stroke.redo_on(&mut self.grid);
        log::debug!("Redid {} stroke", stroke.kind().label());
        Some(stroke)
    }

    pub fn can_undo(&self) -> bool {
        !self.is_stroking() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_stroking() && self.history.can_redo()
    }

    /// Reset every editable cell to the background as one undoable stroke.
    ///
    /// Only cells that differ from the background are recorded. Returns
    /// whether anything was cleared; refused while a stroke is open.
    pub fn clear_all(&mut self) -> bool {
        if self.is_stroking() {
            log::debug!("Clear ignored while stroking");
            return false;
        }

        let background = self.grid.background();
        let mut buffer = StrokeBuilder::new(StrokeKind::Clear);
        for (pos, color) in self.grid.cells() {
            if color != background && !self.grid.is_reserved(pos.x, pos.y) {
                buffer.record(pos, background, color);
            }
        }
        self.grid.fill(background);

        match buffer.finish() {
            Some(stroke) => {
                self.history.commit(stroke);
                true
            }
            None => false,
        }
    }
}

fn paint_cell(
    grid: &mut Grid,
    buffer: &mut StrokeBuilder,
    pos: CellPos,
    brush: Color32,
    dirty: &mut Vec<CellPos>,
) {
    if grid.is_reserved(pos.x, pos.y) {
        return;
    }
    match grid.set(pos.x, pos.y, brush) {
        Ok(previous) => {
            buffer.record(pos, brush, previous);
            dirty.push(pos);
        }
        Err(err) => log::trace!("Skipping cell: {}", err),
    }
}
