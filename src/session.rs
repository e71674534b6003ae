//! Top-level game flow.
//!
//! A [`Session`] owns every piece of mutable game state and is driven by the
//! host once per frame through [`Session::update`]. While playing, elapsed
//! host time is turned into zero or more fixed logic steps; each step moves
//! the player, then every pursuer in list order, then resolves pellets, the
//! frightened timer and collisions. Nothing changes between updates, so the
//! host can read a [`Snapshot`] for drawing at any time.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};

use crate::components::{Dir, Position, Tile};
use crate::config::Rules;
use crate::error::ConfigError;
use crate::ghost::{Ghost, GhostKind, GhostLook, GhostMode};
use crate::level::{Level, Maze};
use crate::pellets::{Consumed, PelletField};
use crate::player::Player;
use crate::scoring::{ComboCounter, FrightenedTimer, Scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Intro,
    Playing,
    /// Pause after losing a life.
    Dying { resume_at: u64 },
    GameOver,
    /// Pause after clearing the board.
    Win { resume_at: u64 },
}

/// One input signal per update; the host passes only the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Steer(Dir),
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerView {
    pub position: Position,
    pub tile: Tile,
    pub direction: Option<Dir>,
    pub heading: Dir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostView {
    pub kind: GhostKind,
    pub position: Position,
    pub tile: Tile,
    pub direction: Option<Dir>,
    pub mode: GhostMode,
    pub look: GhostLook,
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub state: SessionState,
    pub maze: &'a Maze,
    pub tile_size: i32,
    pub pellets: &'a BTreeSet<Tile>,
    pub power_pellets: &'a BTreeSet<Tile>,
    pub pellets_remaining: usize,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub frightened_remaining_ms: u64,
}

pub struct Session<R> {
    rules: Rules,
    level: Level,
    pellets: PelletField,
    player: Player,
    ghosts: Vec<Ghost>,
    board: Scoreboard,
    timer: FrightenedTimer,
    combo: ComboCounter,
    state: SessionState,
    last_step_at: u64,
    steps: u64,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(level: Level, rules: Rules, rng: R) -> Result<Self, ConfigError> {
        rules.validate()?;
        let player = Player::new(level.player_spawn, rules.player_speed, rules.tile_size);
        let ghosts = level
            .pursuers
            .iter()
            .map(|spawn| Ghost::new(spawn.kind, spawn.tile, &level.maze, rules.tile_size))
            .collect();
        Ok(Self {
            pellets: PelletField::new(&level),
            player,
            ghosts,
            board: Scoreboard::new(rules.starting_lives),
            timer: FrightenedTimer::default(),
            combo: ComboCounter::new(rules.ghost_scores.len()),
            state: SessionState::Intro,
            last_step_at: 0,
            steps: 0,
            rules,
            level,
            rng,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.board
    }

    /// Logic steps executed since the session was created.
    pub fn steps_run(&self) -> u64 {
        self.steps
    }

    /// Advances the session to host time `now` (milliseconds, monotonic).
    pub fn update(&mut self, now: u64, input: Option<Input>) -> SessionState {
        let next = match self.state {
            SessionState::Intro => self.update_intro(now, input),
            SessionState::Playing => self.update_playing(now, input),
            SessionState::Dying { resume_at } => self.update_dying(now, resume_at),
            SessionState::GameOver => self.update_game_over(now, input),
            SessionState::Win { resume_at } => self.update_win(now, resume_at),
        };
        if next != self.state {
            debug!(from = ?self.state, to = ?next, now, "session state change");
        }
        self.state = next;
        next
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            maze: &self.level.maze,
            tile_size: self.rules.tile_size,
            pellets: self.pellets.pellets(),
            power_pellets: self.pellets.power_pellets(),
            pellets_remaining: self.pellets.remaining(),
            player: PlayerView {
                position: self.player.position(),
                tile: self.player.tile(),
                direction: self.player.direction(),
                heading: self.player.heading(),
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    kind: ghost.kind(),
                    position: ghost.position(),
                    tile: ghost.tile(),
                    direction: ghost.direction(),
                    mode: ghost.mode(),
                    look: ghost.look(),
                })
                .collect(),
            score: self.board.score,
            lives: self.board.lives,
            level: self.board.level,
            frightened_remaining_ms: self.timer.remaining(self.last_step_at),
        }
    }

    fn update_intro(&mut self, now: u64, input: Option<Input>) -> SessionState {
        match input {
            Some(Input::Start) => self.start_new_game(now),
            _ => SessionState::Intro,
        }
    }

    fn update_playing(&mut self, now: u64, input: Option<Input>) -> SessionState {
        if let Some(Input::Steer(dir)) = input {
            self.player.set_desired_direction(dir);
        }
        while now.saturating_sub(self.last_step_at) >= self.rules.step_ms {
            let at = self.last_step_at + self.rules.step_ms;
            self.last_step_at = at;
            if let Some(next) = self.step(at) {
                return next;
            }
        }
        SessionState::Playing
    }

    fn update_dying(&mut self, now: u64, resume_at: u64) -> SessionState {
        if now < resume_at {
            return SessionState::Dying { resume_at };
        }
        if self.board.lives == 0 {
            info!(score = self.board.score, level = self.board.level, "game over");
            return SessionState::GameOver;
        }
        info!(lives = self.board.lives, "resuming after death");
        self.reset_level(now);
        SessionState::Playing
    }

    fn update_game_over(&mut self, now: u64, input: Option<Input>) -> SessionState {
        match input {
            Some(Input::Start) => self.start_new_game(now),
            _ => SessionState::GameOver,
        }
    }

    fn update_win(&mut self, now: u64, resume_at: u64) -> SessionState {
        if now < resume_at {
            return SessionState::Win { resume_at };
        }
        info!(level = self.board.level, "starting level");
        self.pellets.refill(&self.level);
        self.reset_level(now);
        SessionState::Playing
    }

    fn start_new_game(&mut self, now: u64) -> SessionState {
        info!(lives = self.rules.starting_lives, "new game");
        self.board = Scoreboard::new(self.rules.starting_lives);
        self.pellets.refill(&self.level);
        self.reset_level(now);
        SessionState::Playing
    }

    /// Puts every actor back on its spawn. Score, lives and pellets stay.
    fn reset_level(&mut self, now: u64) {
        self.player.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.timer.clear();
        self.combo.reset();
        self.last_step_at = now;
    }

    /// One fixed logic step at logic time `now`. Returns the next state when
    /// the step ends play.
    fn step(&mut self, now: u64) -> Option<SessionState> {
        self.steps += 1;
        let maze = &self.level.maze;

        self.player.step(maze);
        let player_tile = self.player.tile();
        let heading = self.player.heading();
        for ghost in &mut self.ghosts {
            ghost.step(maze, player_tile, heading, &self.rules, &mut self.rng);
        }

        match self.pellets.consume(player_tile) {
            Consumed::Pellet => self.board.add(self.rules.pellet_score),
            Consumed::Power => {
                self.board.add(self.rules.power_pellet_score);
                self.combo.reset();
                self.timer.start(now, self.rules.frightened_ms);
                for ghost in &mut self.ghosts {
                    ghost.enter_frightened();
                }
                debug!(tile = %player_tile, until = now + self.rules.frightened_ms, "power pellet");
            }
            Consumed::Nothing => {}
        }

        if self.timer.expire(now) {
            for ghost in &mut self.ghosts {
                ghost.exit_frightened();
            }
            debug!(now, "frightened period over");
        }
        let flashing = self.timer.flashing(
            now,
            self.rules.flash_window_ms,
            self.rules.flash_period_ms,
        );
        for ghost in &mut self.ghosts {
            ghost.set_flash(flashing);
        }

        if let Some(next) = self.resolve_collisions(now) {
            return Some(next);
        }

        if self.pellets.is_empty() {
            self.board.next_level();
            info!(score = self.board.score, cleared = self.board.level - 1, "level clear");
            return Some(SessionState::Win {
                resume_at: now + self.rules.win_pause_ms,
            });
        }
        None
    }

    fn resolve_collisions(&mut self, now: u64) -> Option<SessionState> {
        let player_pos = self.player.position();
        for ghost in &mut self.ghosts {
            if player_pos.distance_sq(ghost.position()) > self.rules.collision_radius_sq {
                continue;
            }
            match ghost.mode() {
                GhostMode::Frightened => {
                    ghost.eaten();
                    let points = self.combo.award(&self.rules.ghost_scores);
                    self.board.add(points);
                    info!(ghost = ghost.kind().name(), points, "pursuer eaten");
                }
                GhostMode::Chase => {
                    let lives = self.board.lose_life();
                    info!(ghost = ghost.kind().name(), lives, "player caught");
                    return Some(SessionState::Dying {
                        resume_at: now + self.rules.dying_pause_ms,
                    });
                }
                GhostMode::Eyes => {}
            }
        }
        None
    }
}
