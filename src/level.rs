use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::components::{Dir, Tile};
use crate::constants::{
    DEFAULT_BLINKY_SPAWN, DEFAULT_MAZE, DEFAULT_PINKY_SPAWN, DEFAULT_PLAYER_SPAWN, FLOOR,
    PELLET, POWER_PELLET, WALL,
};
use crate::error::LevelError;
use crate::ghost::GhostKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// Immutable wall grid. Anything outside the grid reads as wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Maze {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.col >= 0
            && tile.row >= 0
            && (tile.col as usize) < self.width
            && (tile.row as usize) < self.height
    }

    pub fn cell(&self, tile: Tile) -> Cell {
        if !self.contains(tile) {
            return Cell::Wall;
        }
        self.cells[tile.row as usize * self.width + tile.col as usize]
    }

    pub fn is_wall(&self, tile: Tile) -> bool {
        self.cell(tile) == Cell::Wall
    }

    /// Nearest in-bounds tile.
    pub fn clamp(&self, tile: Tile) -> Tile {
        Tile::new(
            tile.col.clamp(0, self.width as i32 - 1),
            tile.row.clamp(0, self.height as i32 - 1),
        )
    }

    /// Walking distance from `start` to every open tile.
    pub fn distances_from(&self, start: Tile) -> DistanceMap {
        let mut steps = vec![None; self.width * self.height];
        if self.is_wall(start) {
            return DistanceMap { width: self.width, steps };
        }
        let mut q = VecDeque::new();
        steps[self.index(start)] = Some(0);
        q.push_back(start);
        while let Some(tile) = q.pop_front() {
            let base = steps[self.index(tile)].unwrap_or(0);
            for dir in Dir::PRIORITY {
                let next = tile.step(dir);
                if self.is_wall(next) || steps[self.index(next)].is_some() {
                    continue;
                }
                steps[self.index(next)] = Some(base + 1);
                q.push_back(next);
            }
        }
        DistanceMap { width: self.width, steps }
    }

    fn index(&self, tile: Tile) -> usize {
        tile.row as usize * self.width + tile.col as usize
    }
}

/// Breadth-first walking distances over a maze from one origin tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    width: usize,
    steps: Vec<Option<u32>>,
}

impl DistanceMap {
    /// `None` for walls, out-of-bounds tiles and anything cut off from the origin.
    pub fn get(&self, tile: Tile) -> Option<u32> {
        if tile.col < 0 || tile.row < 0 || tile.col as usize >= self.width {
            return None;
        }
        self.steps
            .get(tile.row as usize * self.width + tile.col as usize)
            .copied()
            .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PursuerSpawn {
    pub kind: GhostKind,
    pub tile: Tile,
}

/// A validated level: the maze, the pellet markers it was drawn with, and
/// where every actor starts.
#[derive(Debug, Clone)]
pub struct Level {
    pub maze: Maze,
    pub pellets: BTreeSet<Tile>,
    pub power_pellets: BTreeSet<Tile>,
    pub player_spawn: Tile,
    pub pursuers: Vec<PursuerSpawn>,
}

impl Level {
    pub fn parse<S: AsRef<str>>(
        rows: &[S],
        player_spawn: Tile,
        pursuers: Vec<PursuerSpawn>,
    ) -> Result<Level, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut pellets = BTreeSet::new();
        let mut power_pellets = BTreeSet::new();
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let tile = Tile::new(x as i32, y as i32);
                let cell = match symbol {
                    WALL => Cell::Wall,
                    PELLET => {
                        pellets.insert(tile);
                        Cell::Open
                    }
                    POWER_PELLET => {
                        power_pellets.insert(tile);
                        Cell::Open
                    }
                    FLOOR => Cell::Open,
                    _ => {
                        return Err(LevelError::UnknownSymbol {
                            symbol,
                            col: x,
                            row: y,
                        })
                    }
                };
                cells.push(cell);
            }
        }

        let maze = Maze {
            width,
            height,
            cells,
        };
        if pursuers.is_empty() {
            return Err(LevelError::NoPursuers);
        }

        check_spawn(&maze, "player", player_spawn)?;
        for spawn in &pursuers {
            check_spawn(&maze, spawn.kind.name(), spawn.tile)?;
        }
        let reachable = maze.distances_from(player_spawn);
        for spawn in &pursuers {
            if reachable.get(spawn.tile).is_none() {
                return Err(LevelError::SpawnUnreachable {
                    what: spawn.kind.name(),
                    tile: spawn.tile,
                });
            }
        }

        debug!(
            width,
            height,
            pellets = pellets.len(),
            power_pellets = power_pellets.len(),
            pursuers = pursuers.len(),
            "level built"
        );
        Ok(Level {
            maze,
            pellets,
            power_pellets,
            player_spawn,
            pursuers,
        })
    }

    /// The stock maze with Blinky and Pinky.
    pub fn classic() -> Result<Level, LevelError> {
        Level::parse(
            &DEFAULT_MAZE,
            DEFAULT_PLAYER_SPAWN.into(),
            vec![
                PursuerSpawn {
                    kind: GhostKind::Blinky,
                    tile: DEFAULT_BLINKY_SPAWN.into(),
                },
                PursuerSpawn {
                    kind: GhostKind::Pinky,
                    tile: DEFAULT_PINKY_SPAWN.into(),
                },
            ],
        )
    }
}

fn check_spawn(maze: &Maze, what: &'static str, tile: Tile) -> Result<(), LevelError> {
    if !maze.contains(tile) {
        return Err(LevelError::SpawnOutOfBounds { what, tile });
    }
    if maze.is_wall(tile) {
        return Err(LevelError::SpawnOnWall { what, tile });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinky_at(col: i32, row: i32) -> Vec<PursuerSpawn> {
        vec![PursuerSpawn {
            kind: GhostKind::Blinky,
            tile: Tile::new(col, row),
        }]
    }

    #[test]
    fn test_classic_level_builds() {
        let level = Level::classic().unwrap();
        assert_eq!(level.maze.width(), 20);
        assert_eq!(level.maze.height(), 15);
        assert_eq!(level.power_pellets.len(), 4);
        assert!(level.pellets.is_disjoint(&level.power_pellets));
        assert!(level.pellets.contains(&Tile::new(1, 1)));
        assert!(level.power_pellets.contains(&Tile::new(1, 3)));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let level = Level::classic().unwrap();
        let maze = &level.maze;
        assert!(maze.is_wall(Tile::new(-1, 5)));
        assert!(maze.is_wall(Tile::new(5, -1)));
        assert!(maze.is_wall(Tile::new(20, 1)));
        assert!(maze.is_wall(Tile::new(1, 15)));
        assert!(!maze.is_wall(Tile::new(1, 1)));
        assert!(maze.is_wall(Tile::new(0, 0)));
    }

    #[test]
    fn test_clamp_pulls_into_bounds() {
        let level = Level::classic().unwrap();
        assert_eq!(level.maze.clamp(Tile::new(-3, 40)), Tile::new(0, 14));
        assert_eq!(level.maze.clamp(Tile::new(4, 4)), Tile::new(4, 4));
    }

    #[test]
    fn test_distances_follow_corridors() {
        let level = Level::classic().unwrap();
        let home = level.maze.distances_from(Tile::new(9, 7));
        assert_eq!(home.get(Tile::new(9, 7)), Some(0));
        assert_eq!(home.get(Tile::new(10, 7)), Some(1));
        assert_eq!(home.get(Tile::new(0, 0)), None);
        assert_eq!(home.get(Tile::new(-1, 3)), None);
        // (9, 4) sits right above the pen wall; the walk goes around it.
        let around = home.get(Tile::new(9, 4)).unwrap();
        assert!(around > Tile::new(9, 4).manhattan(Tile::new(9, 7)) as u32);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = ["#####", "#..#", "#####"];
        let err = Level::parse(&rows, Tile::new(1, 1), blinky_at(2, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::Ragged {
                row: 1,
                expected: 5,
                found: 4
            }
        );
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let rows = ["####", "#.x#", "####"];
        let err = Level::parse(&rows, Tile::new(1, 1), blinky_at(1, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::UnknownSymbol {
                symbol: 'x',
                col: 2,
                row: 1
            }
        );
    }

    #[test]
    fn test_empty_layout_rejected() {
        let rows: [&str; 0] = [];
        let err = Level::parse(&rows, Tile::new(0, 0), blinky_at(0, 0)).unwrap_err();
        assert_eq!(err, LevelError::Empty);
    }

    #[test]
    fn test_spawn_on_wall_rejected() {
        let rows = ["#####", "#...#", "#####"];
        let err = Level::parse(&rows, Tile::new(0, 1), blinky_at(2, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::SpawnOnWall {
                what: "player",
                tile: Tile::new(0, 1)
            }
        );
    }

    #[test]
    fn test_unreachable_spawn_rejected() {
        let rows = ["#####", "#.#.#", "#####"];
        let err = Level::parse(&rows, Tile::new(1, 1), blinky_at(3, 1)).unwrap_err();
        assert_eq!(
            err,
            LevelError::SpawnUnreachable {
                what: "Blinky",
                tile: Tile::new(3, 1)
            }
        );
    }

    #[test]
    fn test_no_pursuers_rejected() {
        let rows = ["#####", "#...#", "#####"];
        let err = Level::parse(&rows, Tile::new(1, 1), Vec::new()).unwrap_err();
        assert_eq!(err, LevelError::NoPursuers);
    }
}
