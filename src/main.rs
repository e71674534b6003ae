use std::fs::File;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mazechase::{Dir, GameResult, Input, Level, Session, Settings};

mod render;

use render::Renderer;

fn main() -> GameResult<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings)?;

    let level = Level::classic()?;
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(level, settings.rules(), rng)?;

    let mut stdout = io::stdout();
    let _terminal = TerminalGuard::enter(&mut stdout)?;
    run(&mut stdout, &mut session, &settings)
}

/// Raw mode plus alternate screen, undone on drop even when setup fails
/// halfway or the game loop returns an error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_screen(&mut io::stdout()) {
            warn!(%err, "failed to restore screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(%err, "failed to leave raw mode");
        }
    }
}

fn restore_screen(out: &mut impl Write) -> io::Result<()> {
    out.execute(Show)?;
    out.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// The terminal is in raw mode, so logs only go to a file when one is named.
fn init_logging(settings: &Settings) -> GameResult<()> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session<StdRng>, settings: &Settings) -> GameResult<()> {
    let clock = Instant::now();
    let mut renderer = Renderer::new(session.snapshot().maze);
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));
    info!(
        seed = ?settings.seed,
        step_ms = settings.step_ms,
        fps = settings.render_fps,
        "terminal host started"
    );

    loop {
        let frame_start = Instant::now();
        let mut input = None;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        info!(score = session.scoreboard().score, "quit");
                        return Ok(());
                    }
                    code => {
                        if let Some(signal) = input_for(code) {
                            input = Some(signal);
                        }
                    }
                }
            }
        }

        let now = clock.elapsed().as_millis() as u64;
        session.update(now, input);
        renderer.draw(stdout, &session.snapshot(), now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn input_for(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Input::Steer(Dir::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Input::Steer(Dir::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Input::Steer(Dir::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Input::Steer(Dir::Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Input::Start),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_screen_shows_cursor_and_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore_screen(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?25h"));
        assert!(text.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_keys_map_to_inputs() {
        assert_eq!(input_for(KeyCode::Char('h')), Some(Input::Steer(Dir::Left)));
        assert_eq!(input_for(KeyCode::Up), Some(Input::Steer(Dir::Up)));
        assert_eq!(input_for(KeyCode::Enter), Some(Input::Start));
        assert_eq!(input_for(KeyCode::Char('x')), None);
    }
}
