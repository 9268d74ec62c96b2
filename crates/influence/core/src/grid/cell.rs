use std::fmt;

/// Discrete grid position expressed in cell coordinates relative to the grid origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbors in [`Direction::ALL`] order.
    pub fn neighbors(self) -> [Cell; 4] {
        Direction::ALL.map(|direction| self.step(direction))
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal step directions. `Up` increases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed evaluation order. Ties between equally scored neighbors resolve to
    /// the earliest entry.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_fixed_order() {
        let cell = Cell::new(3, 3);
        assert_eq!(
            cell.neighbors(),
            [
                Cell::new(3, 4),
                Cell::new(3, 2),
                Cell::new(2, 3),
                Cell::new(4, 3),
            ]
        );
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(-2, 5);
        let b = Cell::new(1, 1);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
    }
}
