use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Fixed order in which pursuers consider candidate directions. Ties in
    /// target distance go to the earliest entry.
    pub const PRIORITY: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// One maze cell, addressed by column and row. Signed so that targets and
/// neighbours may fall outside the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    pub col: i32,
    pub row: i32,
}

impl Tile {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn step(self, dir: Dir) -> Tile {
        let (dx, dy) = dir.delta();
        Tile::new(self.col + dx, self.row + dy)
    }

    pub fn offset(self, dir: Dir, tiles: i32) -> Tile {
        let (dx, dy) = dir.delta();
        Tile::new(self.col + dx * tiles, self.row + dy * tiles)
    }

    pub fn manhattan(self, other: Tile) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }

    /// Center of this tile in position units.
    pub fn center(self, tile_size: i32) -> Position {
        Position {
            x: self.col * tile_size + tile_size / 2,
            y: self.row * tile_size + tile_size / 2,
        }
    }
}

impl From<(i32, i32)> for Tile {
    fn from((col, row): (i32, i32)) -> Self {
        Tile::new(col, row)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Sub-tile position. Integer units keep the centering test exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn tile(self, tile_size: i32) -> Tile {
        Tile::new(self.x.div_euclid(tile_size), self.y.div_euclid(tile_size))
    }

    pub fn distance_sq(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}
