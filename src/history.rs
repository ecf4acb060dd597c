use std::collections::VecDeque;

use crate::stroke::Stroke;

/// Manages committed strokes for undo/redo.
///
/// The undo stack is bounded: once it holds `max_depth` strokes, committing
/// another one drops the oldest for good. The redo stack only ever holds
/// strokes popped by [`History::undo`] since the last commit.
#[derive(Debug, Clone)]
pub struct History {
    /// Strokes that can be undone, most recent last
    undo_stack: VecDeque<Stroke>,
    /// Strokes that can be redone, most recent last
    redo_stack: Vec<Stroke>,
    max_depth: usize,
}

impl History {
    /// Creates an empty history keeping at most `max_depth` strokes
    /// (at least one).
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Record a finished stroke, invalidating everything that could be redone
    pub fn commit(&mut self, stroke: Stroke) {
        log::debug!("Committing {} stroke over {} cells", stroke.kind().label(), stroke.len());
        self.undo_stack.push_back(stroke);
        self.redo_stack.clear();

        while self.undo_stack.len() > self.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                log::debug!("History full, dropping oldest {} stroke", evicted.kind().label());
            }
        }
    }

    /// Move the most recent stroke to the redo stack and return it so the
    /// caller can restore each cell's previous color.
    pub fn undo(&mut self) -> Option<&Stroke> {
        let stroke = self.undo_stack.pop_back()?;
        self.redo_stack.push(stroke);
        self.redo_stack.last()
    }

    /// Move the most recently undone stroke back to the undo stack and
    /// return it so the caller can reapply its colors.
    pub fn redo(&mut self) -> Option<&Stroke> {
        let stroke = self.redo_stack.pop()?;
        self.undo_stack.push_back(stroke);
        self.undo_stack.back()
    }

    /// Returns true if there are strokes that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are strokes that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undoable strokes, oldest first
    pub fn undo_stack(&self) -> impl Iterator<Item = &Stroke> + '_ {
        self.undo_stack.iter()
    }

    /// Redoable strokes, oldest first
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo_stack
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellPos;
    use crate::stroke::{CellChange, StrokeKind};
    use egui::Color32;

    // Each test stroke is identified by the x coordinate of its only cell
    fn stroke(id: i32) -> Stroke {
        Stroke::new(
            StrokeKind::Draw,
            vec![CellChange {
                pos: CellPos::new(id, 0),
                color: Color32::RED,
                previous: Color32::WHITE,
            }],
        )
    }

    fn id(stroke: &Stroke) -> i32 {
        stroke.changes()[0].pos.x
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new(5);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_undo_then_redo_returns_same_stroke() {
        let mut history = History::new(5);
        history.commit(stroke(1));
        history.commit(stroke(2));

        assert_eq!(history.undo().map(id), Some(2));
        assert!(history.can_redo());
        assert_eq!(history.redo().map(id), Some(2));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = History::new(5);
        history.commit(stroke(1));
        history.commit(stroke(2));
        history.undo();
        history.commit(stroke(3));

        assert!(history.redo().is_none());
        let ids: Vec<i32> = history.undo_stack().map(id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::new(3);
        for n in 0..4 {
            history.commit(stroke(n));
        }
        assert_eq!(history.undo_len(), 3);

        let undone: Vec<i32> = std::iter::from_fn(|| history.undo().map(id)).collect();
        assert_eq!(undone, vec![3, 2, 1]);
        assert!(history.undo().is_none());
        assert_eq!(history.redo_len(), 3);
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        let mut history = History::new(0);
        history.commit(stroke(1));
        assert_eq!(history.max_depth(), 1);
        assert!(history.can_undo());
    }
}
