//! Occupancy store for one match.
//! Cells live on the speed lattice: a coordinate maps to cell `(x / speed, y / speed)`.
//! Occupancy only ever grows; nothing in here clears a cell.

use crate::types::{Pos, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Wall,
    Trail(Side),
}

impl Occupant {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Wall => 1,
            Self::Trail(Side::Red) => 2,
            Self::Trail(Side::Blue) => 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    grid_size: i32,
    speed: i32,
    cells_per_side: usize,
    cells: Vec<Occupant>,
}

impl Grid {
    /// Builds an empty arena framed by a one-cell wall. Callers validate
    /// `grid_size` and `speed` through `MatchConfig::validate` first.
    pub fn new(grid_size: u32, speed: u32) -> Self {
        assert!(speed > 0 && grid_size % speed == 0, "grid size must be a multiple of speed");
        let cells_per_side = (grid_size / speed) as usize;
        let mut cells = vec![Occupant::Empty; cells_per_side * cells_per_side];
        let last = cells_per_side - 1;
        for row in 0..cells_per_side {
            for col in 0..cells_per_side {
                if row == 0 || col == 0 || row == last || col == last {
                    cells[row * cells_per_side + col] = Occupant::Wall;
                }
            }
        }
        Self { grid_size: grid_size as i32, speed: speed as i32, cells_per_side, cells }
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    /// True when `pos` is a lattice point inside the declared arena.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.x < self.grid_size
            && pos.y < self.grid_size
            && pos.x % self.speed == 0
            && pos.y % self.speed == 0
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.occupant(pos) != Occupant::Empty
    }

    pub fn occupant(&self, pos: Pos) -> Occupant {
        self.cells[self.index(pos)]
    }

    /// Records a trail cell. Cells already holding a wall or trail keep it.
    pub fn mark_occupied(&mut self, pos: Pos, side: Side) {
        let idx = self.index(pos);
        if self.cells[idx] == Occupant::Empty {
            self.cells[idx] = Occupant::Trail(side);
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Occupant::Empty).count()
    }

    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    /// Text dump with north at the top: `#` wall, `r`/`b` trails, `.` open.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.cells_per_side + 1) * self.cells_per_side);
        for row in (0..self.cells_per_side).rev() {
            for col in 0..self.cells_per_side {
                out.push(match self.cells[row * self.cells_per_side + col] {
                    Occupant::Empty => '.',
                    Occupant::Wall => '#',
                    Occupant::Trail(Side::Red) => 'r',
                    Occupant::Trail(Side::Blue) => 'b',
                });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(self.contains(pos), "cell {pos:?} is outside the {} arena lattice", self.grid_size);
        let col = (pos.x / self.speed) as usize;
        let row = (pos.y / self.speed) as usize;
        row * self.cells_per_side + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_frame_is_occupied_and_interior_is_open() {
        let grid = Grid::new(40, 4);
        assert_eq!(grid.cells_per_side(), 10);
        assert!(grid.is_occupied(Pos { x: 0, y: 0 }));
        assert!(grid.is_occupied(Pos { x: 36, y: 20 }));
        assert!(grid.is_occupied(Pos { x: 20, y: 36 }));
        assert!(!grid.is_occupied(Pos { x: 4, y: 4 }));
        assert!(!grid.is_occupied(Pos { x: 32, y: 32 }));
        assert_eq!(grid.occupied_count(), 36);
    }

    #[test]
    fn marking_is_monotonic_and_keeps_walls() {
        let mut grid = Grid::new(40, 4);
        let cell = Pos { x: 12, y: 8 };
        grid.mark_occupied(cell, Side::Red);
        grid.mark_occupied(cell, Side::Blue);
        assert_eq!(grid.occupant(cell), Occupant::Trail(Side::Red));

        grid.mark_occupied(Pos { x: 0, y: 8 }, Side::Blue);
        assert_eq!(grid.occupant(Pos { x: 0, y: 8 }), Occupant::Wall);
        assert_eq!(grid.occupied_count(), 37);
    }

    #[test]
    fn contains_requires_lattice_points_inside_the_arena() {
        let grid = Grid::new(40, 4);
        assert!(grid.contains(Pos { x: 36, y: 36 }));
        assert!(!grid.contains(Pos { x: 40, y: 0 }));
        assert!(!grid.contains(Pos { x: -4, y: 0 }));
        assert!(!grid.contains(Pos { x: 2, y: 4 }));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_range_lookup_is_a_programmer_error() {
        let grid = Grid::new(40, 4);
        let _ = grid.is_occupied(Pos { x: 40, y: 4 });
    }

    #[test]
    fn ascii_dump_puts_north_on_top() {
        let mut grid = Grid::new(12, 4);
        grid.mark_occupied(Pos { x: 4, y: 4 }, Side::Blue);
        assert_eq!(grid.render_ascii(), "###\n#b#\n###\n");

        let mut grid = Grid::new(16, 4);
        grid.mark_occupied(Pos { x: 4, y: 8 }, Side::Red);
        assert_eq!(grid.render_ascii(), "####\n#r.#\n#..#\n####\n");
    }
}
