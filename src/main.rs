//! Terminal Sum Blocks runner (default binary).
//!
//! Single-threaded game loop: poll terminal input with a short timeout,
//! advance the countdown by the elapsed wall time, forward tip requests to
//! the background fetcher and apply whatever replies came back.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_sumblocks::cli::{parse_args, USAGE};
use tui_sumblocks::config::AppConfig;
use tui_sumblocks::core::GameSnapshot;
use tui_sumblocks::engine::Session;
use tui_sumblocks::input::{handle_key_event, handle_mouse_event, should_quit, Cursor, InputAction};
use tui_sumblocks::logging;
use tui_sumblocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_sumblocks::tips::TipFetcher;
use tui_sumblocks::types::{GameAction, Mode};

const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    logging::init(&config.log)?;

    let seed = config.game.seed.unwrap_or_else(clock_seed);
    log::info!("tui-sumblocks starting, seed={seed}");

    let tips = match TipFetcher::start(&config.tips) {
        Ok(tips) => tips,
        Err(err) => {
            log::warn!("tips unavailable: {err:#}");
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, seed, config.game.mode, tips);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("game loop failed: {err:#}");
    }
    log::logger().flush();
    result
}

fn run(
    term: &mut TerminalRenderer,
    seed: u32,
    start_mode: Option<Mode>,
    mut tips: Option<TipFetcher>,
) -> Result<()> {
    let mut session = Session::new(seed);
    if let Some(mode) = start_mode {
        session.apply(GameAction::Start(mode));
    }

    let view = GameView::default();
    let mut cursor = Cursor::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut episode = 0;
    let mut last_tick = Instant::now();

    loop {
        // Tips out, tips in.
        if let Some(request) = session.take_tip_request() {
            if let Some(tips) = tips.as_ref() {
                tips.request(request);
            }
        }
        if let Some(tips) = tips.as_mut() {
            while let Some(reply) = tips.try_recv() {
                session.apply_tip(&reply);
            }
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        if snap.episode_id != episode {
            episode = snap.episode_id;
            cursor.reset();
        }
        let cursor_pos = snap.playable().then(|| cursor.position());
        view.render_into(&snap, cursor_pos, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input.
        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(InputAction::MoveCursor(dir)) => cursor.move_by(dir),
                        Some(InputAction::Activate) => {
                            session.apply(GameAction::click(cursor.position()));
                        }
                        Some(InputAction::Game(action)) => session.apply(action),
                        None => {}
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pos) =
                        handle_mouse_event(mouse).and_then(|(x, y)| view.hit_test(viewport, x, y))
                    {
                        cursor.set(pos);
                        session.apply(GameAction::click(pos));
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Countdown. Carry the sub-millisecond remainder into the next frame.
        let elapsed_ms = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
        if elapsed_ms > 0 {
            last_tick += Duration::from_millis(elapsed_ms as u64);
            session.advance(elapsed_ms);
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
