use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dino_runner::audio::{AudioSink, Muted, TerminalBell};
use dino_runner::clock::FrameClock;
use dino_runner::compute::{apply_input, init_session, take_sounds, tick};
use dino_runner::display::{self, Viewport};
use dino_runner::entities::InputEvent;
use dino_runner::input::map_event;
use dino_runner::{Config, GameError};

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key arrives.
///
/// Frame order: simulate with the previous frame's `dt`, drain queued input,
/// play raised sounds, draw, then wait on the clock for the next `dt`.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    audio: &mut dyn AudioSink,
    mut viewport: Viewport,
) -> Result<(), GameError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_session(0, config.session_settings(), &mut rng);
    let mut clock = FrameClock::new(config.fps);
    let mut dt = 0.0;

    loop {
        state = tick(&state, dt, &mut rng);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                match Viewport::new(cols, rows) {
                    Ok(vp) => viewport = vp,
                    Err(e) => warn!("ignoring resize: {}", e),
                }
                continue;
            }
            match map_event(&ev) {
                Some(InputEvent::Quit) => {
                    info!("quit (high score {})", state.score.high_score);
                    return Ok(());
                }
                Some(input) => state = apply_input(&state, input, &mut rng),
                None => {}
            }
        }

        for sound in take_sounds(&mut state) {
            audio.play(sound);
        }

        display::render(out, &state, &viewport)?;

        dt = clock.tick();
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::init();

    let config = Config::parse().validate().map_err(|e| {
        error!("{}", e);
        e
    })?;

    let (cols, rows) = terminal::size()?;
    let viewport = Viewport::new(cols, rows).map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!(
        "starting: {}x{} cells, {} fps, speed {}, seed {:?}",
        cols, rows, config.fps, config.speed, config.seed
    );

    let mut audio: Box<dyn AudioSink> = if config.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, audio.as_mut(), viewport);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}
