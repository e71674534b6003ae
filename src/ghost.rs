use rand::seq::SliceRandom;
use rand::Rng;

use crate::actor::Motion;
use crate::components::{Dir, Position, Tile};
use crate::config::Rules;
use crate::level::{DistanceMap, Maze};

/// Pursuer personality. All kinds share one steering algorithm and differ
/// only in the tile they aim for while chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostKind {
    /// Aims straight at the player's tile.
    Blinky,
    /// Aims a few tiles ahead of the player's heading.
    Pinky,
}

impl GhostKind {
    pub fn name(self) -> &'static str {
        match self {
            GhostKind::Blinky => "Blinky",
            GhostKind::Pinky => "Pinky",
        }
    }

    pub fn chase_target(self, player_tile: Tile, heading: Dir, lookahead: i32) -> Tile {
        match self {
            GhostKind::Blinky => player_tile,
            GhostKind::Pinky => player_tile.offset(heading, lookahead),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostMode {
    Chase,
    Frightened,
    Eyes,
}

/// What the presentation layer should draw for a pursuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostLook {
    Normal(GhostKind),
    Frightened,
    Flashing,
    Eyes,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    kind: GhostKind,
    pub motion: Motion,
    mode: GhostMode,
    spawn: Tile,
    home: DistanceMap,
    flash: bool,
    tile_size: i32,
}

impl Ghost {
    pub fn new(kind: GhostKind, spawn: Tile, maze: &Maze, tile_size: i32) -> Self {
        Self {
            kind,
            motion: Motion::at_tile(spawn, Some(Dir::Up), tile_size),
            mode: GhostMode::Chase,
            spawn,
            home: maze.distances_from(spawn),
            flash: false,
            tile_size,
        }
    }

    pub fn reset(&mut self) {
        self.motion = Motion::at_tile(self.spawn, Some(Dir::Up), self.tile_size);
        self.mode = GhostMode::Chase;
        self.flash = false;
    }

    pub fn kind(&self) -> GhostKind {
        self.kind
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn spawn(&self) -> Tile {
        self.spawn
    }

    pub fn tile(&self) -> Tile {
        self.motion.tile()
    }

    pub fn position(&self) -> Position {
        self.motion.pos
    }

    pub fn direction(&self) -> Option<Dir> {
        self.motion.dir
    }

    pub fn is_flashing(&self) -> bool {
        self.flash
    }

    pub fn look(&self) -> GhostLook {
        match self.mode {
            GhostMode::Chase => GhostLook::Normal(self.kind),
            GhostMode::Frightened if self.flash => GhostLook::Flashing,
            GhostMode::Frightened => GhostLook::Frightened,
            GhostMode::Eyes => GhostLook::Eyes,
        }
    }

    /// Eyes ignore power pellets. Anything else turns around on the spot.
    pub fn enter_frightened(&mut self) {
        if self.mode == GhostMode::Eyes {
            return;
        }
        self.mode = GhostMode::Frightened;
        self.motion.dir = self.motion.dir.map(Dir::reverse);
        self.flash = false;
    }

    pub fn exit_frightened(&mut self) {
        if self.mode == GhostMode::Frightened {
            self.mode = GhostMode::Chase;
            self.flash = false;
        }
    }

    /// Only a frightened pursuer can be eaten.
    pub fn eaten(&mut self) {
        if self.mode != GhostMode::Frightened {
            return;
        }
        self.mode = GhostMode::Eyes;
        self.motion.dir = None;
        self.motion.snap_to_center();
        self.flash = false;
    }

    pub fn set_flash(&mut self, on: bool) {
        self.flash = on && self.mode == GhostMode::Frightened;
    }

    pub fn speed(&self, rules: &Rules) -> i32 {
        match self.mode {
            GhostMode::Chase => rules.ghost_speed,
            GhostMode::Frightened => rules.frightened_speed,
            GhostMode::Eyes => rules.eyes_speed,
        }
    }

    /// Tile the pursuer steers toward in its current mode, clamped into the
    /// maze. Frightened pursuers wander and have no target.
    pub fn target_tile(
        &self,
        maze: &Maze,
        player_tile: Tile,
        heading: Dir,
        lookahead: i32,
    ) -> Option<Tile> {
        match self.mode {
            GhostMode::Eyes => Some(self.spawn),
            GhostMode::Chase => {
                let target = self.kind.chase_target(player_tile, heading, lookahead);
                Some(maze.clamp(target))
            }
            GhostMode::Frightened => None,
        }
    }

    /// Picks the next direction. Called only while centered.
    pub fn choose_direction<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        player_tile: Tile,
        heading: Dir,
        lookahead: i32,
        rng: &mut R,
    ) {
        let here = self.tile();
        let reverse = self.motion.dir.map(Dir::reverse);

        let mut options = Vec::with_capacity(4);
        for dir in Dir::PRIORITY {
            if self.mode != GhostMode::Eyes && Some(dir) == reverse {
                continue;
            }
            if maze.is_wall(here.step(dir)) {
                continue;
            }
            options.push(dir);
        }
        if options.is_empty() {
            // Dead end: turning back is the only way out.
            if let Some(back) = reverse.filter(|d| !maze.is_wall(here.step(*d))) {
                options.push(back);
            }
        }

        self.motion.dir = match self.mode {
            GhostMode::Frightened => options.choose(rng).copied(),
            // Walking distance, so eyes cannot get trapped behind a wall
            // that sits between them and the spawn.
            GhostMode::Eyes => options
                .iter()
                .copied()
                .min_by_key(|dir| self.home.get(here.step(*dir)).unwrap_or(u32::MAX)),
            GhostMode::Chase => {
                let target = self
                    .target_tile(maze, player_tile, heading, lookahead)
                    .unwrap_or(here);
                options
                    .iter()
                    .copied()
                    .min_by_key(|dir| here.step(*dir).manhattan(target))
            }
        };
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        maze: &Maze,
        player_tile: Tile,
        heading: Dir,
        rules: &Rules,
        rng: &mut R,
    ) {
        if self.motion.is_centered() {
            self.choose_direction(maze, player_tile, heading, rules.ambush_lookahead, rng);
        }
        self.motion.advance(self.speed(rules), maze);

        if self.mode == GhostMode::Eyes && self.motion.is_centered() && self.tile() == self.spawn {
            self.mode = GhostMode::Chase;
            self.motion.dir = Some(Dir::Up);
        }
    }
}
