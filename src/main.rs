//! Terminal runner (default binary).
//!
//! Fixed-step loop: render, wait for input until the next tick, then advance
//! the engine by the real elapsed time.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use blockfall::core::{EngineConfig, GameState, DEFAULT_PLAYER_NAME};
use blockfall::input::{should_quit, KeyRouter};
use blockfall::scores::{self, ScoreFile};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{
    GameAction, GameEvent, DEFAULT_ARR_MS, DEFAULT_DAS_MS, LOCK_DELAY_MS, SOFT_DROP_INTERVAL_MS, TICK_MS,
};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal.",
    long_about = "Falling-block puzzle in the terminal with SRS rotation, a 7-bag \
        randomizer, hold and a persistent top-10 leaderboard.\n\n\
        CONTROLS:\n  Left/Right  Move        Down      Soft drop   Space  Hard drop\n  \
        Up / x      Rotate CW   z         Rotate CCW  c      Hold\n  \
        p / Esc     Pause       r         Restart     q      Quit"
)]
struct Args {
    /// RNG seed for the piece sequence. Random if not set.
    #[arg(long)]
    seed: Option<u32>,

    /// Name recorded on the leaderboard.
    #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
    name: String,

    /// Leaderboard file. Defaults to $XDG_CONFIG_HOME/blockfall/scores.json.
    #[arg(long, value_name = "FILE")]
    scores: Option<PathBuf>,

    /// Delay before a held direction starts repeating (ms).
    #[arg(long, default_value_t = DEFAULT_DAS_MS, value_name = "MS")]
    das: u32,

    /// Interval between horizontal repeats (ms); 0 moves straight to the wall.
    #[arg(long, default_value_t = DEFAULT_ARR_MS, value_name = "MS")]
    arr: u32,

    /// Interval between soft-drop steps (ms).
    #[arg(long, default_value_t = SOFT_DROP_INTERVAL_MS, value_name = "MS")]
    soft_drop: u32,

    /// Time a grounded piece waits before locking (ms).
    #[arg(long, default_value_t = LOCK_DELAY_MS, value_name = "MS")]
    lock_delay: u32,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            das_ms: self.das,
            arr_ms: self.arr,
            soft_drop_interval_ms: self.soft_drop,
            lock_delay_ms: self.lock_delay,
        }
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scores_path = args.scores.clone().unwrap_or_else(scores::default_path);
    let keeper = ScoreFile::load(&scores_path)?;
    let mut game = GameState::with_keeper(args.seed(), args.engine_config(), keeper)
        .context("invalid timing options")?;
    game.set_player_name(args.name.as_str());
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;
    // Key-release reporting is optional; the key router falls back to timeouts.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();

    result?;
    let keeper = game.score_keeper_mut();
    if keeper.is_dirty() {
        keeper.save()?;
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState<ScoreFile>) -> Result<()> {
    let view = GameView::default();
    let mut router = KeyRouter::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = router.handle_key(key) {
                        game.apply_action(action);
                        // Held directions do not carry across a pause or a new run.
                        if matches!(action, GameAction::Pause | GameAction::Restart) {
                            for release in router.reset() {
                                game.apply_action(release);
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed < tick_duration {
            continue;
        }
        last_tick = Instant::now();
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

        for action in router.update(elapsed_ms) {
            game.apply_action(action);
        }
        game.tick(elapsed_ms);

        for event in game.take_events() {
            if let GameEvent::GameOver { .. } = event {
                game.score_keeper_mut()
                    .save()
                    .context("saving leaderboard after game over")?;
            }
        }
    }
}
