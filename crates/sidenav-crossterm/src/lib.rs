//! Crossterm terminal driver.
//!
//! [`CrosstermDriver`] implements [`sidenav_core::Driver`]: it puts the
//! terminal in raw mode on the alternate screen, turns crossterm events into
//! [`Msg`]s, and paints frame diffs.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use sidenav_core::{
    AttrMask, Color, Context, Driver, Key, ModMask, MouseAction, Msg, Point, grid::Frame,
};

fn to_ct_color(c: Color) -> CtColor {
    if c.is_default() {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    [
        (KeyModifiers::SHIFT, ModMask::SHIFT),
        (KeyModifiers::CONTROL, ModMask::CTRL),
        (KeyModifiers::ALT, ModMask::ALT),
        (KeyModifiers::META, ModMask::META),
    ]
    .into_iter()
    .filter(|(ct, _)| mods.contains(*ct))
    .fold(ModMask::NONE, |m, (_, ours)| m | ours)
}

fn to_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        _ => return None,
    })
}

fn to_mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    Some(match kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
        MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
        MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
        MouseEventKind::ScrollUp => MouseAction::WheelUp,
        MouseEventKind::ScrollDown => MouseAction::WheelDown,
        _ => return None,
    })
}

/// Translate one terminal event. Key releases and unmapped keys are
/// dropped.
fn to_msg(ev: Event) -> Option<Msg> {
    let time = Instant::now();
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) if kind != KeyEventKind::Release => Some(Msg::KeyDown {
            key: to_key(code)?,
            modifiers: to_mod_mask(modifiers),
            time,
        }),
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers,
        }) => Some(Msg::Mouse {
            action: to_mouse_action(kind)?,
            pos: Point::new(column as i32, row as i32),
            modifiers: to_mod_mask(modifiers),
            time,
        }),
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
#[derive(Debug)]
pub struct CrosstermDriver {
    mouse_enabled: bool,
    poll_interval: Duration,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            poll_interval: Duration::from_millis(5),
        }
    }

    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// How long [`Driver::poll_msgs`] waits for input. Keep this below the
    /// shortest timer interval in use.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Current terminal size in cells.
    pub fn size() -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
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
        log::debug!("crossterm driver initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(self.poll_interval)? {
            return Ok(());
        }
        while !ctx.is_done() && event::poll(Duration::ZERO)? {
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();
        for fc in &frame.cells {
            let (p, cell) = (fc.pos, fc.cell);
            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;
            let attrs = cell.style.attrs;
            for (mask, attr) in [
                (AttrMask::BOLD, Attribute::Bold),
                (AttrMask::ITALIC, Attribute::Italic),
                (AttrMask::UNDERLINE, Attribute::Underlined),
                (AttrMask::REVERSE, Attribute::Reverse),
                (AttrMask::DIM, Attribute::Dim),
            ] {
                if attrs.contains(mask) {
                    queue!(stdout, SetAttribute(attr))?;
                }
            }
            queue!(stdout, Print(cell.ch))?;
            if !attrs.is_empty() {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
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
        log::debug!("crossterm driver closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn colors() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(to_ct_color(Color::BLACK), CtColor::Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            to_ct_color(Color::from_rgb(70, 80, 90)),
            CtColor::Rgb { r: 70, g: 80, b: 90 }
        );
    }

    #[test]
    fn keys() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('K')), Some(Key::Char('K')));
        assert_eq!(to_key(KeyCode::Up), Some(Key::ArrowUp));
        assert_eq!(to_key(KeyCode::F(1)), None);
        assert_eq!(
            to_mod_mask(KeyModifiers::SHIFT | KeyModifiers::CONTROL),
            ModMask::SHIFT | ModMask::CTRL
        );
    }

    #[test]
    fn key_releases_are_dropped() {
        let press = key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press);
        assert!(matches!(
            to_msg(press),
            Some(Msg::KeyDown { key: Key::Enter, .. })
        ));
        let release = key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(to_msg(release).is_none());
    }

    #[test]
    fn mouse_and_resize() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert!(matches!(
            to_msg(ev),
            Some(Msg::Mouse { action: MouseAction::Main, pos, .. }) if pos == Point::new(3, 7)
        ));
        assert!(matches!(
            to_msg(Event::Resize(80, 24)),
            Some(Msg::Screen { width: 80, height: 24, .. })
        ));
        assert!(to_msg(Event::FocusGained).is_none());
    }
}
