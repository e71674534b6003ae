use crate::components::{Dir, Position, Tile};
use crate::level::Maze;

/// Tile-aligned movement shared by the player and the pursuers.
///
/// Direction changes only commit while centered. `advance` never carries an
/// actor past a tile center, so every center along a path is visited and
/// checked regardless of speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub pos: Position,
    pub dir: Option<Dir>,
    tile_size: i32,
}

impl Motion {
    pub fn at_tile(tile: Tile, dir: Option<Dir>, tile_size: i32) -> Self {
        Self {
            pos: tile.center(tile_size),
            dir,
            tile_size,
        }
    }

    pub fn tile(&self) -> Tile {
        self.pos.tile(self.tile_size)
    }

    pub fn is_centered(&self) -> bool {
        let half = self.tile_size / 2;
        self.pos.x.rem_euclid(self.tile_size) == half
            && self.pos.y.rem_euclid(self.tile_size) == half
    }

    pub fn snap_to_center(&mut self) {
        self.pos = self.tile().center(self.tile_size);
    }

    /// Whether the tile next to the current one in `dir` is open.
    pub fn can_move(&self, maze: &Maze, dir: Dir) -> bool {
        !maze.is_wall(self.tile().step(dir))
    }

    pub fn advance(&mut self, speed: i32, maze: &Maze) {
        if let Some(dir) = self.dir {
            let (dx, dy) = dir.delta();
            let along = if dx != 0 { self.pos.x } else { self.pos.y };
            let sign = dx + dy;
            let travel = speed.min(self.distance_to_center(along, sign));
            self.pos.x += dx * travel;
            self.pos.y += dy * travel;
        }
        self.clamp_to(maze);
    }

    /// Distance along one axis to the next tile center ahead.
    fn distance_to_center(&self, coord: i32, sign: i32) -> i32 {
        let offset = coord.rem_euclid(self.tile_size) - self.tile_size / 2;
        if sign > 0 {
            if offset < 0 {
                -offset
            } else {
                self.tile_size - offset
            }
        } else if offset > 0 {
            offset
        } else {
            self.tile_size + offset
        }
    }

    fn clamp_to(&mut self, maze: &Maze) {
        let half = self.tile_size / 2;
        let max_x = maze.width() as i32 * self.tile_size - half;
        let max_y = maze.height() as i32 * self.tile_size - half;
        self.pos.x = self.pos.x.clamp(half, max_x);
        self.pos.y = self.pos.y.clamp(half, max_y);
    }
}
