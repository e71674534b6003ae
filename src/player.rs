use crate::actor::Motion;
use crate::components::{Dir, Position, Tile};
use crate::level::Maze;

/// The input-driven actor.
#[derive(Debug, Clone)]
pub struct Player {
    pub motion: Motion,
    desired: Option<Dir>,
    heading: Dir,
    spawn: Tile,
    speed: i32,
    tile_size: i32,
}

impl Player {
    pub fn new(spawn: Tile, speed: i32, tile_size: i32) -> Self {
        Self {
            motion: Motion::at_tile(spawn, None, tile_size),
            desired: None,
            heading: Dir::Right,
            spawn,
            speed,
            tile_size,
        }
    }

    pub fn reset(&mut self) {
        self.motion = Motion::at_tile(self.spawn, None, self.tile_size);
        self.desired = None;
        self.heading = Dir::Right;
    }

    /// Replaces any earlier request; only the latest one is tried.
    pub fn set_desired_direction(&mut self, dir: Dir) {
        self.desired = Some(dir);
    }

    pub fn desired_direction(&self) -> Option<Dir> {
        self.desired
    }

    /// Last direction the player actually moved in.
    pub fn heading(&self) -> Dir {
        self.heading
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

    pub fn step(&mut self, maze: &Maze) {
        if self.motion.is_centered() {
            if let Some(want) = self.desired {
                if self.motion.can_move(maze, want) {
                    self.motion.dir = Some(want);
                }
            }
            let blocked = match self.motion.dir {
                Some(dir) => !self.motion.can_move(maze, dir),
                None => false,
            };
            if blocked {
                self.motion.dir = None;
                self.motion.snap_to_center();
            }
        }
        if let Some(dir) = self.motion.dir {
            self.heading = dir;
        }
        self.motion.advance(self.speed, maze);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn setup() -> (Maze, Player) {
        let level = Level::classic().unwrap();
        let player = Player::new(level.player_spawn, 2, 8);
        (level.maze, player)
    }

    #[test]
    fn test_idle_until_input() {
        let (maze, mut player) = setup();
        player.step(&maze);
        assert_eq!(player.direction(), None);
        assert_eq!(player.heading(), Dir::Right);
        assert_eq!(player.tile(), Tile::new(9, 11));
    }

    #[test]
    fn test_moves_in_desired_direction() {
        let (maze, mut player) = setup();
        player.set_desired_direction(Dir::Left);
        for _ in 0..4 {
            player.step(&maze);
        }
        assert_eq!(player.direction(), Some(Dir::Left));
        assert_eq!(player.heading(), Dir::Left);
        assert_eq!(player.tile(), Tile::new(8, 11));
        assert!(player.motion.is_centered());
    }

    #[test]
    fn test_blocked_request_is_ignored() {
        let (maze, mut player) = setup();
        // (9, 12) is a wall.
        player.set_desired_direction(Dir::Down);
        player.step(&maze);
        assert_eq!(player.direction(), None);
    }

    #[test]
    fn test_latest_request_wins() {
        let (maze, mut player) = setup();
        player.set_desired_direction(Dir::Left);
        player.set_desired_direction(Dir::Right);
        player.step(&maze);
        assert_eq!(player.direction(), Some(Dir::Right));
    }

    #[test]
    fn test_stops_and_snaps_at_wall() {
        let (maze, mut player) = setup();
        player.set_desired_direction(Dir::Right);
        // Row 11 is open from column 1 to 18.
        for _ in 0..60 {
            player.step(&maze);
        }
        assert_eq!(player.direction(), None);
        assert_eq!(player.tile(), Tile::new(18, 11));
        assert_eq!(player.position(), Tile::new(18, 11).center(8));
        assert_eq!(player.heading(), Dir::Right);
    }

    #[test]
    fn test_turn_commits_only_at_center() {
        let (maze, mut player) = setup();
        player.set_desired_direction(Dir::Left);
        player.step(&maze);
        assert!(!player.motion.is_centered());
        // (9, 10) is open but the player is between tiles.
        player.set_desired_direction(Dir::Up);
        player.step(&maze);
        assert_eq!(player.direction(), Some(Dir::Left));
    }

    #[test]
    fn test_reset_returns_to_spawn() {
        let (maze, mut player) = setup();
        player.set_desired_direction(Dir::Left);
        for _ in 0..10 {
            player.step(&maze);
        }
        player.reset();
        assert_eq!(player.tile(), Tile::new(9, 11));
        assert_eq!(player.direction(), None);
        assert_eq!(player.desired_direction(), None);
    }
}
