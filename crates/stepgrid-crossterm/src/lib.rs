//! Crossterm terminal driver for stepgrid.
//!
//! Provides a [`CrosstermDriver`] that implements [`stepgrid_core::Driver`],
//! mapping the framework's grid-based rendering model to a terminal.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use stepgrid_core::{
    Point,
    app::{Context, Driver},
    grid::{Frame, FrameCell},
    messages::{Key, Mods, MouseAction, Msg},
    style::{Color, Style},
};

/// Maps a [`stepgrid_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

/// The crossterm attributes a [`Style`] turns on, in emission order.
fn to_ct_attrs(s: Style) -> impl Iterator<Item = Attribute> {
    [
        (s.bold, Attribute::Bold),
        (s.reverse, Attribute::Reverse),
        (s.dim, Attribute::Dim),
    ]
    .into_iter()
    .filter_map(|(on, attr)| on.then_some(attr))
}

/// Maps crossterm key modifiers to [`Mods`].
fn to_mods(mods: KeyModifiers) -> Mods {
    Mods {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`]. Keys the framework does not
/// model map to `None` and are dropped.
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver with mouse capture enabled.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Paint one changed cell: position, colours, attributes, glyph.
    fn paint_cell(stdout: &mut io::Stdout, fc: &FrameCell) -> io::Result<()> {
        let cell = &fc.cell;
        execute!(
            stdout,
            cursor::MoveTo(fc.pos.x as u16, fc.pos.y as u16),
            SetForegroundColor(to_ct_color(cell.style.fg)),
            SetBackgroundColor(to_ct_color(cell.style.bg))
        )?;
        for attr in to_ct_attrs(cell.style) {
            execute!(stdout, style::SetAttribute(attr))?;
        }
        write!(stdout, "{}", cell.ch)?;
        if cell.style.has_attrs() {
            execute!(stdout, style::SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Short poll so the frame loop keeps its cadence even when the
        // terminal is idle.
        if !event::poll(Duration::from_millis(8))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }

            let ev = event::read()?;

            let msg = match ev {
                Event::Key(KeyEvent {
                    code, modifiers, ..
                }) => {
                    // Ctrl+C always quits, raw mode swallows the signal.
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        Some(Msg::Quit)
                    } else {
                        to_key(code).map(|key| Msg::KeyDown {
                            key,
                            modifiers: to_mods(modifiers),
                            time: Instant::now(),
                        })
                    }
                }
                Event::Mouse(me) => {
                    let pos = Point::new(me.column as i32, me.row as i32);
                    let modifiers = to_mods(me.modifiers);
                    let action = match me.kind {
                        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
                        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
                        MouseEventKind::Up(_) => Some(MouseAction::Release),
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(MouseAction::Move),
                        _ => None,
                    };
                    action.map(|action| Msg::Mouse {
                        action,
                        pos,
                        modifiers,
                        time: Instant::now(),
                    })
                }
                Event::Resize(w, h) => Some(Msg::Screen {
                    width: w as i32,
                    height: h as i32,
                    time: Instant::now(),
                }),
                _ => None,
            };

            if let Some(m) = msg {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        for fc in &frame.cells {
            Self::paint_cell(&mut stdout, fc)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_translation() {
        assert_eq!(to_ct_color(Color::Default), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::rgb(10, 20, 30)),
            CtColor::Rgb {
                r: 10,
                g: 20,
                b: 30
            }
        );
    }

    #[test]
    fn attr_translation() {
        assert_eq!(to_ct_attrs(Style::default()).count(), 0);
        let attrs: Vec<_> = to_ct_attrs(Style::default().bold().dim()).collect();
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Dim]);
    }

    #[test]
    fn key_translation() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('r')), Some(Key::Char('r')));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn modifier_translation() {
        let m = to_mods(KeyModifiers::SHIFT | KeyModifiers::ALT);
        assert!(m.shift);
        assert!(!m.ctrl);
        assert!(m.alt);
    }
}
