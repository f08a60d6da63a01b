//! Game loop — the runtime tick driver.
//!
//! Each tick polls input until the tick deadline, evaluates the binding
//! table, asks the animation for its next frame, and hands it to the
//! renderer. The loop does no image work of its own.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{cursor, event, execute, queue, style, terminal};
use log::{debug, info};

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::graphics::Animation;
use crate::input::condition::mouse_coord;
use crate::input::{InputBindings, InputCondition, PressedKeys};
use crate::renderer::Renderer;
use crate::types::{Coord, RenderFrame, Size};

/// Rows reserved below the canvas for the status line.
const STATUS_ROWS: u16 = 1;

/// How long a key counts as held after its last press or repeat event.
const KEY_HOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Quit,
    TogglePause,
    Restart,
}

/// Drives one animation at the configured framerate.
///
/// Keys stay in the pressed snapshot until a release event arrives or
/// [`KEY_HOLD`] passes without a press or repeat for them, so chords bound
/// with [`InputCondition::all`] work on terminals that never report releases.
pub struct GameLoop {
    animation: Animation,
    config: GameConfig,
    bindings: InputBindings<LoopAction>,
    pressed: PressedKeys,
    mouse: Option<Coord>,
    paused: bool,
    needs_redraw: bool,
    quit: bool,
}

impl GameLoop {
    /// The config's stop key is always bound to `Quit`; Space pauses and
    /// `r` restarts. More bindings can be added with [`GameLoop::bindings_mut`].
    pub fn new(animation: Animation, config: GameConfig) -> Self {
        let mut bindings = InputBindings::new();
        bindings
            .bind(config.stop_game_key, LoopAction::Quit)
            .bind(
                InputCondition::any([event::KeyCode::Char(' '), event::KeyCode::Char('p')]),
                LoopAction::TogglePause,
            )
            .bind(event::KeyCode::Char('r'), LoopAction::Restart);

        Self {
            animation,
            config,
            bindings,
            pressed: PressedKeys::default(),
            mouse: None,
            paused: false,
            needs_redraw: false,
            quit: false,
        }
    }

    pub fn bindings_mut(&mut self) -> &mut InputBindings<LoopAction> {
        &mut self.bindings
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Run the loop in the terminal until a `Quit` action fires.
    ///
    /// Sets up the terminal, runs, and restores the terminal on exit (even
    /// on error).
    pub fn run(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        let need = self.animation.size();
        if !fits_terminal(need, term_w, term_h) {
            return Err(Error::InvalidArgument(format!(
                "terminal too small: need {}x{}, have {}x{}",
                need.width,
                need.height.saturating_add(STATUS_ROWS),
                term_w,
                term_h,
            )));
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        info!(
            "playing {} frames at {} fps",
            self.animation.frame_count(),
            self.config.target_framerate.fps()
        );
        let result = self.run_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();

        result
    }

    fn run_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        let tick = self.config.target_framerate.frame_duration();

        while !self.quit {
            let deadline = Instant::now() + tick;
            self.begin_tick(Instant::now());

            while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
                if !event::poll(timeout)? {
                    break;
                }
                let ev = event::read()?;
                if let event::Event::Resize(_, _) = ev {
                    queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                self.handle_event(&ev);
                if self.quit {
                    return Ok(());
                }
            }

            if let Some(frame) = self.frame_to_draw() {
                Renderer::draw(stdout, frame, 0, 0)?;
            }
            self.render_status(stdout)?;
        }

        Ok(())
    }

    fn begin_tick(&mut self, now: Instant) {
        self.pressed.expire(now, KEY_HOLD);
    }

    /// The frame this tick should paint: the next one while playing, or the
    /// current one again after a resize wiped the screen during a pause.
    fn frame_to_draw(&mut self) -> Option<&RenderFrame> {
        if !self.paused {
            self.needs_redraw = false;
            return Some(self.animation.next_frame());
        }
        if !std::mem::take(&mut self.needs_redraw) {
            return None;
        }
        self.animation
            .current_frame()
            .or_else(|| self.animation.frames().first())
    }

    /// Feed one terminal event through the binding table and apply whatever
    /// fires. Returns `true` once a `Quit` action has fired.
    pub fn handle_event(&mut self, ev: &event::Event) -> bool {
        match ev {
            event::Event::Key(key) => self.pressed.apply(key),
            event::Event::Mouse(mouse) => self.mouse = Some(mouse_coord(mouse)),
            event::Event::Resize(_, _) => self.needs_redraw = true,
            _ => {}
        }

        let fired: Vec<LoopAction> = self
            .bindings
            .evaluate_event(ev, &self.pressed)
            .copied()
            .collect();
        for action in fired {
            debug!("input fired {action:?}");
            match action {
                LoopAction::Quit => self.quit = true,
                LoopAction::TogglePause => self.paused = !self.paused,
                LoopAction::Restart => self.animation.reset(),
            }
        }
        self.quit
    }

    fn render_status(&self, stdout: &mut io::Stdout) -> Result<()> {
        let status_y = self.animation.height();
        let total = self.animation.frame_count();
        let frame = self.animation.current_index().map_or(0, |i| i + 1);
        let mouse = self
            .mouse
            .map_or_else(|| "-".to_string(), |c| format!("{},{}", c.x, c.y));
        let status = format!(
            " Frame {frame}/{total}{} | mouse {mouse} | space: pause | r: restart | {:?}: quit ",
            if self.paused { " (paused)" } else { "" },
            self.config.stop_game_key,
        );

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        stdout.flush()?;
        Ok(())
    }
}

/// Whether a canvas of `need` plus the status line fits the terminal.
fn fits_terminal(need: Size, term_w: u16, term_h: u16) -> bool {
    term_w >= need.width && term_h >= need.height.saturating_add(STATUS_ROWS)
}
