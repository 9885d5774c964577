mod graphics;
mod math;
mod state;

use crate::graphics::{render_frame, Frame, HEIGHT, WIDTH};
use crate::state::AppState;
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// Interval between animation frames
const TICK: Duration = Duration::from_millis(50);

/// Terminal row of the status line, just below the grid
const STATUS_ROW: u16 = (HEIGHT + 1) as u16;

/// A console-based spinning donut (torus) demo
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Stop after rendering this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Start with the debug line enabled
    #[arg(short, long)]
    debug: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    check_terminal_size()?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut stdout, &args);

    // Restore the terminal whether or not the loop succeeded
    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

/// Refuses to start when the terminal cannot hold the grid and status line.
fn check_terminal_size() -> io::Result<()> {
    if let Some(size) = termsize::get() {
        let needed_rows = HEIGHT + 2;
        if (size.cols as usize) < WIDTH || (size.rows as usize) < needed_rows {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "terminal is {}x{}, need at least {}x{}",
                    size.cols, size.rows, WIDTH, needed_rows
                ),
            ));
        }
    }
    Ok(())
}

/// Drives the fixed-cadence render loop until quit or the frame limit.
///
/// Each tick renders and flushes one frame, advances the rotation, then
/// spends the rest of the tick polling the keyboard, so frames are always
/// delivered in order and the loop never overlaps itself.
fn run(stdout: &mut Stdout, args: &Args) -> io::Result<()> {
    let mut state = AppState::new(args.debug);
    let mut rendered: u64 = 0;

    // FPS bookkeeping for the debug line
    let mut frames_since_last_update = 0usize;
    let mut last_fps_calculation = Instant::now();
    let mut fps = 0.0f64;

    loop {
        if let Some(limit) = args.frames {
            if rendered >= limit {
                return Ok(());
            }
        }

        let tick_started = Instant::now();

        if !state.paused {
            let frame = render_frame(&state);
            draw_frame(stdout, &frame, &state, fps)?;
            state.advance();
            rendered += 1;

            frames_since_last_update += 1;
            let elapsed = last_fps_calculation.elapsed();
            if elapsed.as_secs_f64() >= 1.0 {
                fps = frames_since_last_update as f64 / elapsed.as_secs_f64();
                frames_since_last_update = 0;
                last_fps_calculation = Instant::now();
            }
        }

        // Service the keyboard for the rest of the tick
        loop {
            let wait = TICK.saturating_sub(tick_started.elapsed());
            if !event::poll(wait)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char('p') | KeyCode::Char('P') => {
                        state.paused = !state.paused;
                        if state.paused {
                            draw_pause_marker(stdout)?;
                        }
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        state.debug = !state.debug;
                    }
                    _ => {}
                }
            }
            if wait.is_zero() {
                break;
            }
        }
    }
}

/// Hands one frame to the terminal: clear, redraw every row, one flush.
fn draw_frame(stdout: &mut Stdout, frame: &Frame, state: &AppState, fps: f64) -> io::Result<()> {
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let text = frame.to_text();
    for (row, line) in text.split('\n').enumerate() {
        queue!(stdout, MoveTo(0, row as u16), Print(line))?;
    }

    if state.debug {
        let status = format!(
            "{} {}  A: {:.2}  B: {:.2}  FPS: {:.1}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            state.angle_a,
            state.angle_b,
            fps
        );
        queue!(stdout, MoveTo(0, STATUS_ROW), Print(status))?;
    }

    stdout.flush()
}

/// Marks the frozen frame while the animation is paused.
fn draw_pause_marker(stdout: &mut Stdout) -> io::Result<()> {
    queue!(stdout, MoveTo(0, STATUS_ROW), Print("paused"))?;
    stdout.flush()
}
