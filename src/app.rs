//! Terminal session and the real-time frame loop.

use std::io::{self, BufWriter, Stdout, stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::audio::Audio;
use crate::config::Settings;
use crate::game::Game;
use crate::input::{InputSource, TerminalInput};
use crate::render::{Renderer, TerminalRenderer};

/// Raw mode plus the alternate screen, undone by [`TerminalSession::leave`].
pub struct TerminalSession {
    out: Stdout,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )
        .context("failed to enter the alternate screen")?;
        Ok(Self { out })
    }

    pub fn leave(mut self) -> Result<()> {
        execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )
        .context("failed to leave the alternate screen")?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }
}

/// Runs the game until the player quits.
pub fn run(settings: Settings) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to query the terminal size")?;
    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    log::info!(
        "starting on {} at {} fps (seed {:?}, {}x{} cells)",
        settings.tier.level,
        settings.fps,
        settings.seed,
        cols,
        rows
    );

    let mut game = Game::new(settings.tier, settings.game_options(), rng);
    let audio = Audio::open(settings.sound);
    let session = TerminalSession::enter()?;
    let mut renderer = TerminalRenderer::new(BufWriter::new(stdout()), cols, rows);

    let result = run_loop(
        &mut game,
        &mut TerminalInput,
        &mut renderer,
        &audio,
        settings.frame_interval(),
    );
    let restored = session.leave();
    let frames = result.context("terminal I/O failed")?;
    restored?;
    log::info!("quit after {frames} frames, best score {}", game.best());
    Ok(())
}

/// Input, update, render and pace until an exit command arrives.
///
/// Returns the number of frames played.
pub fn run_loop<R, I, D>(
    game: &mut Game<R>,
    input: &mut I,
    renderer: &mut D,
    audio: &Audio,
    frame_interval: Duration,
) -> io::Result<u64>
where
    R: Rng,
    I: InputSource,
    D: Renderer,
{
    let mut frames = 0;
    loop {
        let frame_start = Instant::now();

        let polled = input.poll()?;
        if polled.exit {
            return Ok(frames);
        }
        if let Some((cols, rows)) = polled.resize {
            renderer.resize(cols, rows);
        }

        for event in game.tick(polled.flap) {
            audio.play(event);
        }
        renderer.draw(&game.scene())?;
        frames += 1;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}
