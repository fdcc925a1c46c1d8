use tracing::debug;

use super::board::Board;
use super::board::CellStatus;
use super::board::Point;

/// FIFO of cells waiting to be expanded by [`flood_reveal`].
///
/// Every cell is pushed at most once per fill, so the queue never needs more
/// than one slot per cell and never reuses a slot.
#[derive(Debug)]
pub struct RevealQueue {
    items: Vec<Point>,
    head: usize,
    capacity: usize
}

impl RevealQueue {
    pub fn with_capacity(capacity: usize) -> RevealQueue {
        RevealQueue{items: Vec::with_capacity(capacity), head: 0, capacity}
    }

    /// # Panics
    /// When more than `capacity` points have been pushed over the queue's lifetime.
    pub fn push(&mut self, point: Point) {
        assert!(self.items.len() < self.capacity, "reveal queue overflow at {} entries", self.capacity);
        self.items.push(point);
    }

    pub fn pop(&mut self) -> Option<Point> {
        let point = self.items.get(self.head).copied()?;
        self.head += 1;
        Some(point)
    }

    pub fn total_pushed(&self) -> usize {
        self.items.len()
    }
}

/// Reveals `start` and, breadth first, every hidden cell reachable from it
/// through cells with no adjacent mines. Cells with a nonzero count are
/// revealed but not expanded. Flagged cells and mines are never touched.
///
/// Returns how many cells changed to `Revealed`.
///
/// # Panics
/// If `start` is out of range, not hidden, or a mine. Those are for the
/// caller to rule out.
pub fn flood_reveal(board: &mut Board, start: Point) -> usize {
    let cell = board.get(&start);
    assert!(cell.status.is_hidden(), "flood fill started on {:?} cell {:?}", cell.status, start);
    assert!(!cell.is_mine, "flood fill started on mine {:?}", start);

    let mut queue = RevealQueue::with_capacity(board.size.area());
    board.set_status(&start, CellStatus::Revealed);
    queue.push(start);

    while let Some(point) = queue.pop() {
        if board.count_adjacent_mines(&point) != 0 {
            continue;
        }
        for neighbor in board.neighbor_points(&point) {
            let cell = board.get(&neighbor);
            if cell.status.is_hidden() && !cell.is_mine {
                board.set_status(&neighbor, CellStatus::Revealed);
                queue.push(neighbor);
            }
        }
    }

    let revealed = queue.total_pushed();
    debug!(x = start.0, y = start.1, revealed, "flood fill finished");
    revealed
}

#[cfg(test)]
use proptest::prelude::*;
