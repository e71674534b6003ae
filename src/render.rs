use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use mazechase::{GhostKind, GhostLook, Maze, SessionState, Snapshot, Tile};

const CELL_W: usize = 2;
const BLINK_MS: u64 = 200;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Caught,
    Ghost,
    Frightened,
    Eyes,
    Wall,
    Empty,
    Pellet,
    Power,
    PowerDim,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Diffing terminal renderer: only cells that changed since the previous
/// frame are redrawn.
pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_hud: String,
    last_banner: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(maze: &Maze) -> Self {
        let width = maze.width();
        let height = maze.height();
        Self {
            width,
            height,
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_banner: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn draw(&mut self, stdout: &mut Stdout, snap: &Snapshot<'_>, now: u64) -> io::Result<()> {
        let needed_h = (self.height + 3) as u16;
        let needed_w = (self.width * CELL_W) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Level: {}  (q to quit)",
            snap.score, snap.lives, snap.level
        );
        if self.needs_full || hud != self.last_hud {
            self.print_line(stdout, self.origin_y - 1, &hud, Color::White)?;
            self.last_hud = hud;
        }

        let blink = (now / BLINK_MS) % 2 == 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let tile = Tile::new(x as i32, y as i32);
                let cell = cell_for(snap, tile, blink);
                let idx = y * self.width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }

        let banner = banner_for(snap);
        if self.needs_full || banner != self.last_banner {
            let row = self.origin_y + self.height as u16;
            self.print_line(stdout, row, &banner, Color::Yellow)?;
            self.last_banner = banner;
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn print_line(&self, stdout: &mut Stdout, row: u16, text: &str, color: Color) -> io::Result<()> {
        stdout.queue(MoveTo(self.origin_x, row))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Caught => "😵",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Eyes => "👀",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
            Glyph::PowerDim => "○ ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn cell_for(snap: &Snapshot<'_>, tile: Tile, blink: bool) -> Cell {
    if snap.player.tile == tile {
        let glyph = match snap.state {
            SessionState::Dying { .. } | SessionState::GameOver => Glyph::Caught,
            _ => Glyph::Player,
        };
        return Cell {
            glyph,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snap.ghosts.iter().find(|g| g.tile == tile) {
        return match ghost.look {
            GhostLook::Normal(kind) => Cell {
                glyph: Glyph::Ghost,
                color: ghost_color(kind),
            },
            GhostLook::Frightened => Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            GhostLook::Flashing => Cell {
                glyph: Glyph::Frightened,
                color: Color::White,
            },
            GhostLook::Eyes => Cell {
                glyph: Glyph::Eyes,
                color: Color::White,
            },
        };
    }
    if snap.maze.is_wall(tile) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        };
    }
    if snap.power_pellets.contains(&tile) {
        return Cell {
            glyph: if blink { Glyph::Power } else { Glyph::PowerDim },
            color: Color::White,
        };
    }
    if snap.pellets.contains(&tile) {
        return Cell {
            glyph: Glyph::Pellet,
            color: Color::Yellow,
        };
    }
    Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Red,
        GhostKind::Pinky => Color::Magenta,
    }
}

fn banner_for(snap: &Snapshot<'_>) -> String {
    match snap.state {
        SessionState::Intro => "MAZE CHASE - space to start, arrows or hjkl to move".to_string(),
        SessionState::Playing => String::new(),
        SessionState::Dying { .. } => "Caught!".to_string(),
        SessionState::GameOver => format!(
            "GAME OVER - Final Score: {} (space to try again)",
            snap.score
        ),
        SessionState::Win { .. } => format!("LEVEL CLEAR! Level {} complete", snap.level - 1),
    }
}
