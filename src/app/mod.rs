//! App module: the interactive viewer shell.
//!
//! This module contains:
//! - [`Viewer`]: the single-threaded event loop driving the comparison
//! - [`view`]: frame rendering over engine rows
//! - [`output`]: the single-flush ANSI frame buffer
//!
//! The shell owns the terminal (raw mode + alternate screen) for the
//! lifetime of a session and restores it on every exit path. All engine
//! calls happen on the caller's thread; there is no internal concurrency.

pub mod output;
pub mod view;

use crate::engine::{self, materialize};
use crate::error::Result;
use crate::source::FileSet;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use crate::format::{self, DisplayBase, WordSize};
use log::{debug, error, info};
use output::FrameBuffer;
use std::io;
use view::FrameContext;

/// Initial display configuration for a viewer session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerConfig {
    /// Numeric base for byte values.
    pub base: DisplayBase,
    /// Bits per display group.
    pub word: WordSize,
    /// Whether the settings panel starts expanded.
    pub panel_open: bool,
}

/// RAII guard for terminal state.
///
/// Entering puts the terminal into raw mode on the alternate screen with the
/// cursor hidden; dropping restores everything, so a panic or an early
/// return cannot leave the user's shell unusable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ScrollLines(i64),
    ScrollPages(i64),
    JumpStart,
    JumpEnd,
    CycleBase,
    CycleWord,
    TogglePanel,
    Quit,
}

/// The interactive viewer: scroll state, display configuration, and the
/// event loop tying the engine to the terminal.
pub struct Viewer {
    files: FileSet,
    base: DisplayBase,
    word: WordSize,
    panel_open: bool,
    /// Scroll position in bytes from the start of the comparison extent.
    scroll: u64,
    /// Fixed per session, derived from the extent.
    address_width: usize,
    file_names: Vec<String>,
}

impl Viewer {
    /// Create a viewer over an opened file set.
    pub fn new(files: FileSet, config: ViewerConfig) -> Self {
        let address_width = format::address_width(files.total_length());
        let file_names = files
            .paths()
            .map(|path| {
                path.file_name()
                    .map_or_else(|| path.display().to_string(), |name| {
                        name.to_string_lossy().into_owned()
                    })
            })
            .collect();

        Self {
            files,
            base: config.base,
            word: config.word,
            panel_open: config.panel_open,
            scroll: 0,
            address_width,
            file_names,
        }
    }

    /// Run the event loop until the user quits or the session dies.
    ///
    /// Mid-session read faults end the session cleanly (logged, terminal
    /// restored) instead of corrupting the display.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let (mut width, mut height) = terminal::size()?;
        info!("viewer started, terminal {width}x{height}");

        loop {
            if let Err(err) = self.draw(width, height) {
                // Degrade gracefully: stop the session, never show a
                // half-corrupted frame.
                error!("session ended by read fault: {err}");
                return Err(err);
            }

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let Some(action) = Self::action_for(key.code) else {
                        continue;
                    };
                    if action == Action::Quit {
                        break;
                    }
                    self.apply(action, height);
                }
                Event::Resize(new_width, new_height) => {
                    debug!("resize to {new_width}x{new_height}");
                    width = new_width;
                    height = new_height;
                    self.clamp_scroll(height);
                }
                _ => {}
            }
        }

        self.files.close();
        Ok(())
    }

    /// Map a key to an action, if it is bound.
    fn action_for(code: KeyCode) -> Option<Action> {
        Some(match code {
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollLines(-1),
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollLines(1),
            KeyCode::PageUp => Action::ScrollPages(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollPages(1),
            KeyCode::Home => Action::JumpStart,
            KeyCode::End => Action::JumpEnd,
            KeyCode::Char('b') => Action::CycleBase,
            KeyCode::Char('w') => Action::CycleWord,
            KeyCode::Tab => Action::TogglePanel,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => return None,
        })
    }

    /// Bytes of the extent covered by one full screen at the current word
    /// size (footer row excluded).
    fn bytes_per_page(&self, height: u16) -> u64 {
        u64::from(height.saturating_sub(1)) * self.word.group_bytes() as u64
    }

    /// Apply an action to the viewer state.
    fn apply(&mut self, action: Action, height: u16) {
        let group = self.word.group_bytes() as u64;
        let page = self.bytes_per_page(height);

        match action {
            Action::ScrollLines(delta) => self.scroll_by(delta * group as i64),
            Action::ScrollPages(delta) => self.scroll_by(delta.saturating_mul(page as i64)),
            Action::JumpStart => self.scroll = 0,
            Action::JumpEnd => self.scroll = u64::MAX,
            Action::CycleBase => self.base = self.base.next(),
            Action::CycleWord => {
                self.word = self.word.next();
                // Keep the top line aligned to the new group size.
                self.scroll -= self.scroll % self.word.group_bytes() as u64;
            }
            Action::TogglePanel => self.panel_open = !self.panel_open,
            Action::Quit => {}
        }

        self.clamp_scroll(height);
    }

    /// Scroll by a signed byte delta, saturating at zero.
    fn scroll_by(&mut self, delta: i64) {
        self.scroll = if delta.is_negative() {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta as u64)
        };
    }

    /// Clamp the scroll position so the last page stays full where possible.
    fn clamp_scroll(&mut self, height: u16) {
        let page = self.bytes_per_page(height) as usize;
        let max = engine::max_scroll_offset(self.files.total_length(), page);
        self.scroll = self.scroll.min(max);
        // Stay aligned to the display group.
        self.scroll -= self.scroll % self.word.group_bytes() as u64;
    }

    /// Materialize the visible rows and flush one frame.
    fn draw(&mut self, width: u16, height: u16) -> Result<()> {
        let wanted = self.bytes_per_page(height) as usize;
        let rows = materialize(&mut self.files, self.scroll, wanted)?;

        let mut out = FrameBuffer::new();
        view::draw_frame(&mut out, &rows, &self.context(width, height));
        out.flush_to(&mut io::stdout())?;
        Ok(())
    }

    /// Build the frame context for the current state.
    fn context(&self, width: u16, height: u16) -> FrameContext<'_> {
        FrameContext {
            width,
            height,
            address_width: self.address_width,
            base: self.base,
            word: self.word,
            panel_open: self.panel_open,
            file_names: &self.file_names,
        }
    }
}
