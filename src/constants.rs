//! Default gameplay tuning. `Rules::default()` is built from these.

/// Edge length of one maze tile in position units.
pub const TILE_SIZE: i32 = 8;

/// Duration of one fixed logic step.
pub const STEP_MS: u64 = 30;

pub const PLAYER_SPEED: i32 = 2;
pub const GHOST_SPEED: i32 = 2;
pub const GHOST_FRIGHTENED_SPEED: i32 = 1;
pub const GHOST_EYES_SPEED: i32 = 3;

pub const FRIGHTENED_MS: u64 = 6000;
/// Pursuers start flashing once this much frightened time is left.
pub const FLASH_WINDOW_MS: u64 = 2000;
pub const FLASH_PERIOD_MS: u64 = 200;

pub const DYING_PAUSE_MS: u64 = 1200;
pub const WIN_PAUSE_MS: u64 = 1500;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE_ORDER: [u32; 4] = [200, 400, 800, 1600];

/// Squared center distance at or below which the player touches a pursuer.
pub const COLLISION_RADIUS_SQ: i32 = 25;

pub const STARTING_LIVES: u32 = 3;

/// How many tiles ahead of the player's heading an ambushing pursuer aims.
pub const AMBUSH_LOOKAHEAD: i32 = 2;

pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Layout symbols.
pub const WALL: char = '#';
pub const PELLET: char = '.';
pub const POWER_PELLET: char = 'o';
pub const FLOOR: char = ' ';

pub const DEFAULT_MAZE: [&str; 15] = [
    "####################",
    "#........##........#",
    "#.####.#.##.#.####.#",
    "#o####.#.##.#.####o#",
    "#......#....#......#",
    "#.####.######.####.#",
    "#......#....#......#",
    "#...##........##...#",
    "#.####.#....#.####.#",
    "#.####.######.####.#",
    "#......#....#......#",
    "#..................#",
    "#o####.#.##.#.####o#",
    "#........##........#",
    "####################",
];

pub const DEFAULT_PLAYER_SPAWN: (i32, i32) = (9, 11);
pub const DEFAULT_BLINKY_SPAWN: (i32, i32) = (9, 7);
pub const DEFAULT_PINKY_SPAWN: (i32, i32) = (10, 7);
