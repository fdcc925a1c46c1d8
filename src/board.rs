use itertools::iproduct;
use rand::Rng;
use tracing::debug;

/// Smallest selectable field side.
pub const MIN_SIDE: usize = 9;
/// Largest selectable field side; the widest one a single hex digit can address.
pub const MAX_SIDE: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Hidden,
    Revealed,
    Flagged
}

impl CellStatus {
    pub fn is_hidden(&self) -> bool {
        matches!(*self, CellStatus::Hidden)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(*self, CellStatus::Revealed)
    }

    pub fn is_flagged(&self) -> bool {
        matches!(*self, CellStatus::Flagged)
    }
}

/// A single field position. Whether it holds a mine is independent of what the
/// player knows about it; a revealed mine is never stored, it ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub status: CellStatus
}

impl Cell {
    fn create_empty() -> Cell {
        Cell{is_mine: false, status: CellStatus::Hidden}
    }
}

/// Zero-based `(x, y)` position, `x` being the column.
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    side: usize
}

impl BoardSize {
    pub fn new(side: usize) -> BoardSize {
        BoardSize{side}
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn area(&self) -> usize {
        self.side * self.side
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.side && point.1 < self.side
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|i| self.point_from_integer(i)).collect()
    }

    pub fn point_from_integer(&self, i: usize) -> Option<Point> {
        if i >= self.area() {
            return None
        }
        Some(Point(i % self.side, i / self.side))
    }

    /// Row-major buffer index of `point`.
    ///
    /// # Panics
    /// If either coordinate is outside `0..side`.
    pub fn index_of(&self, point: &Point) -> usize {
        assert!(self.contains(point), "{:?} is outside the {}x{} field", point, self.side, self.side);
        point.1 * self.side + point.0
    }
}

/// Largest mine count allowed for a field of `side`: three quarters of the
/// cells, with the quarter taken by integer division.
pub fn max_mines(side: usize) -> usize {
    let area = side * side;
    area - area / 4
}

#[derive(Debug, Clone)]
pub struct Board {
    pub size: BoardSize,
    cells: Vec<Cell>
}

impl Board {
    pub fn new(side: usize) -> Board {
        let size = BoardSize::new(side);
        Board{size, cells: vec![Cell::create_empty(); size.area()]}
    }

    pub fn get(&self, point: &Point) -> Cell {
        self.cells[self.size.index_of(point)]
    }

    pub fn set_status(&mut self, point: &Point, status: CellStatus) {
        let index = self.size.index_of(point);
        self.cells[index].status = status;
    }

    pub fn is_mine(&self, point: &Point) -> bool {
        self.get(point).is_mine
    }

    pub fn set_mine(&mut self, point: &Point) {
        let index = self.size.index_of(point);
        self.cells[index].is_mine = true;
    }

    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.cells.iter().enumerate()
            .filter_map(move |(i, cell)| self.size.point_from_integer(i).map(|point| (point, cell)))
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_mine).count()
    }

    pub fn count_status(&self, status: CellStatus) -> usize {
        self.cells.iter().filter(|cell| cell.status == status).count()
    }

    pub fn count_flagged_mines(&self) -> usize {
        self.cells.iter()
            .filter(|cell| cell.is_mine && cell.status.is_flagged())
            .count()
    }

    /// The in-bounds members of the 8-neighborhood of `point`. Nothing wraps
    /// around the edges, so corners have three neighbors and edges five.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point> {
        let side = self.size.side() as i64;
        iproduct!(-1i64..=1, -1i64..=1)
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| (point.0 as i64 + dx, point.1 as i64 + dy))
            .filter(|&(x, y)| x >= 0 && x < side && y >= 0 && y < side)
            .map(|(x, y)| Point(x as usize, y as usize))
            .collect()
    }

    pub fn count_adjacent_mines(&self, point: &Point) -> u8 {
        assert!(self.size.contains(point), "{:?} is outside the field", point);
        self.neighbor_points(point).iter()
            .filter(|neighbor| self.is_mine(neighbor))
            .count() as u8
    }

    /// Scatters `count` more mines by rejection sampling: pick a uniformly
    /// random cell, keep it if it is not a mine yet, repeat. Every position is
    /// eligible. Returns the number of draws it took.
    ///
    /// # Panics
    /// If fewer than `count` cells are still free of mines; the loop would
    /// never finish otherwise.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        let free = self.size.area() - self.mine_count();
        assert!(count <= free, "cannot place {} mines in {} free cells", count, free);

        let side = self.size.side();
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count {
            attempts += 1;
            let point = Point(rng.gen_range(0..side), rng.gen_range(0..side));
            if !self.is_mine(&point) {
                self.set_mine(&point);
                placed += 1;
            }
        }
        debug!(mines = count, attempts, "placed mines");
        attempts
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod board_tests {
    use super::*;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brute_force_count(board: &Board, point: &Point) -> u8 {
        let mut count = 0;
        for other in board.size.points() {
            let dx = (other.0 as i64 - point.0 as i64).abs();
            let dy = (other.1 as i64 - point.1 as i64).abs();
            if other != *point && dx <= 1 && dy <= 1 && board.is_mine(&other) {
                count += 1;
            }
        }
        count
    }

    #[test]
    fn max_mines_uses_integer_division() {
        assert_eq!(max_mines(9), 81 - 20);
        assert_eq!(max_mines(10), 75);
        assert_eq!(max_mines(15), 225 - 56);
    }

    #[test]
    fn new_board_is_hidden_and_empty() {
        let board = Board::new(9);
        assert_eq!(board.mine_count(), 0);
        assert_eq!(board.count_status(CellStatus::Hidden), 81);
        assert_eq!(board.count_adjacent_mines(&Point(4, 4)), 0);
    }

    #[test]
    fn set_status_only_touches_target() {
        let mut board = Board::new(9);
        board.set_status(&Point(2, 3), CellStatus::Flagged);
        assert_eq!(board.get(&Point(2, 3)).status, CellStatus::Flagged);
        assert_eq!(board.get(&Point(3, 2)).status, CellStatus::Hidden);
        assert_eq!(board.count_status(CellStatus::Flagged), 1);
    }

    #[test]
    #[should_panic]
    fn out_of_range_access_panics() {
        let board = Board::new(9);
        board.get(&Point(9, 0));
    }

    #[test]
    #[should_panic]
    fn out_of_range_column_does_not_alias_next_row() {
        let mut board = Board::new(9);
        board.set_status(&Point(10, 0), CellStatus::Revealed);
    }

    #[test]
    fn neighbor_counts_at_corners_edges_and_center() {
        let board = Board::new(9);
        assert_eq!(board.neighbor_points(&Point(0, 0)).len(), 3);
        assert_eq!(board.neighbor_points(&Point(8, 8)).len(), 3);
        assert_eq!(board.neighbor_points(&Point(0, 4)).len(), 5);
        assert_eq!(board.neighbor_points(&Point(4, 4)).len(), 8);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        let mut board = Board::new(9);
        board.set_mine(&Point(8, 0));
        assert_eq!(board.count_adjacent_mines(&Point(0, 0)), 0);
        assert_eq!(board.count_adjacent_mines(&Point(0, 1)), 0);
        assert_eq!(board.count_adjacent_mines(&Point(7, 1)), 1);
    }

    #[test]
    fn placement_can_fill_to_cap() {
        let mut board = Board::new(9);
        let mut rng = StdRng::seed_from_u64(7);
        board.place_mines(max_mines(9), &mut rng);
        assert_eq!(board.mine_count(), max_mines(9));
    }

    #[test]
    #[should_panic]
    fn placement_refuses_more_mines_than_cells() {
        let mut board = Board::new(9);
        let mut rng = StdRng::seed_from_u64(7);
        board.place_mines(82, &mut rng);
    }

    proptest! {
        #[test]
        fn placement_places_exact_count(side in MIN_SIDE..=MAX_SIDE, percent in 0..=100usize, seed in any::<u64>()) {
            let mines = max_mines(side) * percent / 100;
            let mut board = Board::new(side);
            let mut rng = StdRng::seed_from_u64(seed);
            let attempts = board.place_mines(mines, &mut rng);
            prop_assert_eq!(board.mine_count(), mines);
            prop_assert!(attempts >= mines);
            prop_assert_eq!(board.count_status(CellStatus::Hidden), side * side);
        }

        #[test]
        fn adjacency_matches_brute_force(side in MIN_SIDE..=MAX_SIDE, seed in any::<u64>(), percent in 0..=100usize) {
            let mines = max_mines(side) * percent / 100;
            let mut board = Board::new(side);
            board.place_mines(mines, &mut StdRng::seed_from_u64(seed));
            for point in board.size.points() {
                prop_assert_eq!(board.count_adjacent_mines(&point), brute_force_count(&board, &point));
            }
        }

        #[test]
        fn points_cover_board_once(side in 1..=MAX_SIDE) {
            let size = BoardSize::new(side);
            let points = size.points();
            prop_assert_eq!(points.len(), size.area());
            prop_assert!(points.iter().all(|point| size.contains(point)));
            prop_assert_eq!(points.iter().unique().count(), size.area());
            for point in points {
                prop_assert_eq!(size.point_from_integer(size.index_of(&point)), Some(point));
            }
        }
    }
}
