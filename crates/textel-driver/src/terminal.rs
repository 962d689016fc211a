#![forbid(unsafe_code)]

//! Crossterm terminal backend.
//!
//! Construction enters raw mode and the alternate screen; dropping the
//! driver restores everything in reverse order, so the terminal comes
//! back intact on every exit path short of `abort`. Only one terminal
//! driver should exist at a time.
//!
//! The `TEXTEL_GEOMETRY=WIDTHxHEIGHT` environment hint, read once at
//! construction, overrides the detected terminal size for the canvas.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{
    self as ct_event, KeyEventKind, KeyModifiers, MouseEventKind as CtMouseKind,
};
use crossterm::style::{Attribute as CtAttribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::tty::IsTty;
use crossterm::{cursor, execute, queue, terminal};

use textel_canvas::{Attr, Canvas, Glyph, Style};
use textel_core::{Error, Event, KeyCode, KeyEvent, Modifiers, MouseButton, Result};
use textel_core::info;

use crate::{Driver, Mailbox, parse_geometry};

/// Terminal driver over crossterm.
pub struct TerminalDriver {
    width: u16,
    height: u16,
    mailbox: Mailbox,
    pending_size: Option<(usize, usize)>,
    initial_size_seen: bool,
    mouse_captured: bool,
}

impl TerminalDriver {
    /// Take over the terminal and size the canvas to it.
    ///
    /// Fails with [`Error::Unavailable`] when stdout is not a tty, and
    /// with [`Error::Io`] when raw mode or the alternate screen cannot
    /// be entered. The geometry hint, when present and well formed,
    /// wins over the detected size.
    pub fn new(canvas: &mut Canvas) -> Result<Self> {
        if !io::stdout().is_tty() {
            return Err(Error::Unavailable("stdout is not a tty"));
        }

        let hint = std::env::var("TEXTEL_GEOMETRY")
            .ok()
            .as_deref()
            .and_then(parse_geometry);
        let (width, height) = match hint {
            Some((w, h)) => (w as u16, h as u16),
            None => terminal::size()?,
        };

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        ) {
            let _ = terminal::disable_raw_mode();
            return Err(Error::Io(e));
        }

        canvas.set_size(width.max(1) as usize, height.max(1) as usize)?;
        info!(width, height, "terminal driver initialized");

        Ok(Self {
            width,
            height,
            mailbox: Mailbox::new(),
            pending_size: None,
            initial_size_seen: false,
            mouse_captured: false,
        })
    }

    /// Pump crossterm's input queue into the mailbox.
    ///
    /// Never blocks. Resize notifications land in the resize slot (the
    /// first one after construction is the initial size report and is
    /// swallowed); everything representable lands in the event slot and
    /// stops the pump so no input is overwritten unread.
    fn pump_input(&mut self) {
        while !self.mailbox.has_event() {
            match ct_event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) | Err(_) => return,
            }
            let Ok(event) = ct_event::read() else { return };
            match event {
                ct_event::Event::Resize(w, h) => {
                    self.width = w;
                    self.height = h;
                    if self.initial_size_seen {
                        self.mailbox.request_resize(w.max(1) as usize, h.max(1) as usize);
                    } else {
                        self.initial_size_seen = true;
                    }
                }
                other => {
                    if let Some(mapped) = map_event(other) {
                        self.mailbox.post(mapped);
                    }
                }
            }
        }
    }
}

impl Driver for TerminalDriver {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_title(&mut self, title: &str) {
        let _ = execute!(io::stdout(), terminal::SetTitle(title));
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        let mut out = io::stdout().lock();
        let width = canvas.width();
        let mut prev: Option<Attr> = None;

        for y in 0..canvas.height() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for x in 0..width {
                let idx = y * width + x;
                let glyph = canvas.glyphs()[idx];
                if glyph == Glyph::WideTail {
                    continue;
                }

                let attr = canvas.attrs()[idx];
                if prev != Some(attr) {
                    queue_sgr(&mut out, attr)?;
                    prev = Some(attr);
                }
                match glyph {
                    Glyph::Simple(c) | Glyph::WideHead(c) => queue!(out, Print(c))?,
                    Glyph::WideTail => {}
                }
            }
        }
        queue!(out, SetAttribute(CtAttribute::Reset))?;
        out.flush()?;
        Ok(())
    }

    fn poll_event(&mut self, _canvas: &mut Canvas) -> Option<Event> {
        self.pump_input();
        if let Some((w, h)) = self.mailbox.take_resize() {
            self.pending_size = Some((w, h));
            return Some(Event::Resize {
                width: w as u16,
                height: h as u16,
            });
        }
        self.mailbox.take()
    }

    fn handle_resize(&mut self, canvas: &mut Canvas) {
        if let Some((w, h)) = self.pending_size.take() {
            // Dimensions were floored to one cell when posted.
            let _ = canvas.set_size(w, h);
        }
    }

    fn set_mouse_visible(&mut self, visible: bool) {
        // Nearest terminal analog: capture the mouse while the pointer
        // is hidden from the application.
        let mut stdout = io::stdout();
        let result = if visible {
            execute!(stdout, ct_event::DisableMouseCapture)
        } else {
            execute!(stdout, ct_event::EnableMouseCapture)
        };
        if result.is_ok() {
            self.mouse_captured = !visible;
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        // Best-effort restore, reverse order of acquisition.
        let mut stdout = io::stdout();
        if self.mouse_captured {
            let _ = execute!(stdout, ct_event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        info!("terminal driver shut down");
    }
}

/// Queue one full SGR state for `attr`, starting from a reset.
fn queue_sgr(out: &mut impl Write, attr: Attr) -> io::Result<()> {
    queue!(out, SetAttribute(CtAttribute::Reset))?;

    let style = attr.style();
    if style.contains(Style::BOLD) {
        queue!(out, SetAttribute(CtAttribute::Bold))?;
    }
    if style.contains(Style::ITALICS) {
        queue!(out, SetAttribute(CtAttribute::Italic))?;
    }
    if style.contains(Style::UNDERLINE) {
        queue!(out, SetAttribute(CtAttribute::Underlined))?;
    }
    if style.contains(Style::BLINK) {
        queue!(out, SetAttribute(CtAttribute::SlowBlink))?;
    }

    queue!(out, SetForegroundColor(ansi_color(attr.ansi_fg())))?;
    queue!(out, SetBackgroundColor(ansi_color(attr.ansi_bg())))?;
    Ok(())
}

/// Library palette order (VGA) to terminal color number order.
const TERM_COLOR: [u8; 8] = [0, 4, 2, 6, 1, 5, 3, 7];

/// Map a library palette index to a crossterm color. The default and
/// transparent sentinels both resolve to the terminal default.
fn ansi_color(index: u8) -> Color {
    match index {
        0x00..=0x07 => Color::AnsiValue(TERM_COLOR[index as usize]),
        0x08..=0x0f => Color::AnsiValue(TERM_COLOR[(index & 0x7) as usize] + 8),
        _ => Color::Reset,
    }
}

fn map_event(event: ct_event::Event) -> Option<Event> {
    match event {
        ct_event::Event::Key(key) if key.kind != KeyEventKind::Release => {
            let code = map_key_code(key.code)?;
            Some(Event::Key(
                KeyEvent::new(code).with_modifiers(map_modifiers(key.modifiers)),
            ))
        }
        ct_event::Event::Mouse(mouse) => match mouse.kind {
            CtMouseKind::Down(button) => Some(Event::MousePress {
                x: mouse.column,
                y: mouse.row,
                button: map_mouse_button(button)?,
            }),
            CtMouseKind::Moved | CtMouseKind::Drag(_) => Some(Event::MouseMotion {
                x: mouse.column,
                y: mouse.row,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn map_key_code(code: ct_event::KeyCode) -> Option<KeyCode> {
    use ct_event::KeyCode as Ct;
    Some(match code {
        Ct::Char(c) => KeyCode::Char(c),
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Escape,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Tab => KeyCode::Tab,
        Ct::Delete => KeyCode::Delete,
        Ct::Insert => KeyCode::Insert,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::F(n) => KeyCode::F(n),
        _ => return None,
    })
}

fn map_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    out
}

fn map_mouse_button(button: ct_event::MouseButton) -> Option<MouseButton> {
    Some(match button {
        ct_event::MouseButton::Left => MouseButton::Left,
        ct_event::MouseButton::Middle => MouseButton::Middle,
        ct_event::MouseButton::Right => MouseButton::Right,
    })
}

#[cfg(test)]
mod tests {
    use super::{ansi_color, map_event, map_key_code, map_modifiers};
    use crossterm::event as ct_event;
    use crossterm::style::Color;
    use textel_core::{Event, KeyCode, Modifiers, MouseButton};

    #[test]
    fn palette_maps_vga_order_to_terminal_numbers() {
        use textel_canvas::ansi;
        assert_eq!(ansi_color(ansi::BLACK), Color::AnsiValue(0));
        assert_eq!(ansi_color(ansi::BLUE), Color::AnsiValue(4));
        assert_eq!(ansi_color(ansi::RED), Color::AnsiValue(1));
        assert_eq!(ansi_color(ansi::BROWN), Color::AnsiValue(3));
        assert_eq!(ansi_color(ansi::LIGHT_CYAN), Color::AnsiValue(14));
        assert_eq!(ansi_color(ansi::WHITE), Color::AnsiValue(15));
        assert_eq!(ansi_color(ansi::DEFAULT), Color::Reset);
        assert_eq!(ansi_color(ansi::TRANSPARENT), Color::Reset);
    }

    #[test]
    fn key_events_map_to_the_canonical_vocabulary() {
        let ct = ct_event::Event::Key(ct_event::KeyEvent::new(
            ct_event::KeyCode::Char('q'),
            ct_event::KeyModifiers::CONTROL,
        ));
        let mapped = map_event(ct).unwrap();
        match mapped {
            Event::Key(key) => {
                assert_eq!(key.code, KeyCode::Char('q'));
                assert!(key.modifiers.contains(Modifiers::CTRL));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn release_events_are_dropped() {
        let mut key = ct_event::KeyEvent::new(
            ct_event::KeyCode::Char('x'),
            ct_event::KeyModifiers::empty(),
        );
        key.kind = ct_event::KeyEventKind::Release;
        assert_eq!(map_event(ct_event::Event::Key(key)), None);
    }

    #[test]
    fn mouse_press_carries_cell_coordinates() {
        let ct = ct_event::Event::Mouse(ct_event::MouseEvent {
            kind: ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: ct_event::KeyModifiers::empty(),
        });
        assert_eq!(
            map_event(ct),
            Some(Event::MousePress {
                x: 3,
                y: 7,
                button: MouseButton::Left
            })
        );
    }

    #[test]
    fn function_keys_and_arrows_survive_mapping() {
        assert_eq!(map_key_code(ct_event::KeyCode::F(5)), Some(KeyCode::F(5)));
        assert_eq!(map_key_code(ct_event::KeyCode::Up), Some(KeyCode::Up));
        assert_eq!(map_key_code(ct_event::KeyCode::CapsLock), None);
    }

    #[test]
    fn modifier_flags_translate_bit_for_bit() {
        let mods = map_modifiers(ct_event::KeyModifiers::SHIFT | ct_event::KeyModifiers::ALT);
        assert_eq!(mods, Modifiers::SHIFT | Modifiers::ALT);
    }
}
