#![forbid(unsafe_code)]

//! Host-driven in-memory backend.
//!
//! The host owns the event loop: it pushes input and size changes into
//! the driver, polls them back out through the [`Driver`] contract, and
//! reads rendered frames from memory. No display resource is involved,
//! which makes this the reference vehicle for the resize and mailbox
//! semantics shared by all backends.

use textel_canvas::{Canvas, Glyph};
use textel_core::{Event, Result};
use textel_core::debug;

use crate::{Driver, Mailbox};

/// A driver that renders into an in-memory RGB24 frame.
///
/// Each cell renders to one `0x00RRGGBB` value: the background color
/// for blank cells, the foreground color for cells carrying a glyph.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    width: u16,
    height: u16,
    frame: Vec<u32>,
    frame_width: usize,
    mailbox: Mailbox,
    pending_size: Option<(usize, usize)>,
    initial_size_seen: bool,
    title: String,
}

impl MemoryDriver {
    /// Adopt the canvas's current size as the surface size.
    #[must_use]
    pub fn new(canvas: &Canvas) -> Self {
        Self {
            width: canvas.width() as u16,
            height: canvas.height() as u16,
            ..Self::default()
        }
    }

    /// Push one input event from the host. Latest-wins: an unconsumed
    /// event is replaced, never queued.
    pub fn push_event(&mut self, event: Event) {
        self.mailbox.post(event);
    }

    /// Push a size change from the host.
    ///
    /// The first push after construction is treated as the initial size
    /// report and swallowed; later pushes become pending resizes. Zero
    /// dimensions are ignored.
    pub fn push_resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width as u16;
        self.height = height as u16;
        if self.initial_size_seen {
            self.mailbox.request_resize(width, height);
        } else {
            self.initial_size_seen = true;
            debug!(width, height, "initial size report swallowed");
        }
    }

    /// The last rendered frame, row-major, one RGB24 value per cell.
    #[must_use]
    pub fn frame(&self) -> &[u32] {
        &self.frame
    }

    /// Width in cells of the last rendered frame.
    #[must_use]
    pub fn frame_width(&self) -> usize {
        self.frame_width
    }

    /// The most recently set title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Driver for MemoryDriver {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.frame_width = canvas.width();
        self.frame.clear();
        self.frame.reserve(canvas.glyphs().len());

        for (glyph, attr) in canvas.glyphs().iter().zip(canvas.attrs()) {
            let rgb = match glyph {
                Glyph::Simple(' ') => attr.rgb24_bg(),
                _ => attr.rgb24_fg(),
            };
            self.frame.push(rgb);
        }
        Ok(())
    }

    fn poll_event(&mut self, _canvas: &mut Canvas) -> Option<Event> {
        // A pending resize outranks buffered input.
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
            // Dimensions were validated nonzero at push time.
            let _ = canvas.set_size(w, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryDriver;
    use crate::Driver;
    use textel_canvas::{Canvas, ansi};
    use textel_core::{Event, KeyCode, KeyEvent};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    #[test]
    fn first_size_report_is_swallowed() {
        let mut cv = Canvas::new(4, 4).unwrap();
        let mut drv = MemoryDriver::new(&cv);

        drv.push_resize(10, 8);
        assert_eq!(drv.poll_event(&mut cv), None);
        assert_eq!(drv.size(), (10, 8));

        drv.push_resize(12, 9);
        assert_eq!(
            drv.poll_event(&mut cv),
            Some(Event::Resize {
                width: 12,
                height: 9
            })
        );
    }

    #[test]
    fn resize_applies_only_through_handle_resize() {
        let mut cv = Canvas::new(4, 4).unwrap();
        let mut drv = MemoryDriver::new(&cv);
        drv.push_resize(4, 4);
        drv.push_resize(7, 3);

        assert!(matches!(drv.poll_event(&mut cv), Some(Event::Resize { .. })));
        // Reporting the event does not touch the canvas.
        assert_eq!((cv.width(), cv.height()), (4, 4));

        drv.handle_resize(&mut cv);
        assert_eq!((cv.width(), cv.height()), (7, 3));

        // Applied once; a second call is a no-op.
        cv.set_size(5, 5).unwrap();
        drv.handle_resize(&mut cv);
        assert_eq!((cv.width(), cv.height()), (5, 5));
    }

    #[test]
    fn pending_resize_outranks_buffered_input() {
        let mut cv = Canvas::new(4, 4).unwrap();
        let mut drv = MemoryDriver::new(&cv);
        drv.push_resize(4, 4);

        drv.push_event(key('q'));
        drv.push_resize(6, 6);

        assert!(matches!(drv.poll_event(&mut cv), Some(Event::Resize { .. })));
        assert_eq!(drv.poll_event(&mut cv), Some(key('q')));
        assert_eq!(drv.poll_event(&mut cv), None);
    }

    #[test]
    fn resizes_coalesce_before_polling() {
        let mut cv = Canvas::new(4, 4).unwrap();
        let mut drv = MemoryDriver::new(&cv);
        drv.push_resize(4, 4);

        drv.push_resize(6, 6);
        drv.push_resize(9, 2);

        assert_eq!(
            drv.poll_event(&mut cv),
            Some(Event::Resize {
                width: 9,
                height: 2
            })
        );
        drv.handle_resize(&mut cv);
        assert_eq!((cv.width(), cv.height()), (9, 2));
        assert_eq!(drv.poll_event(&mut cv), None);
    }

    #[test]
    fn frame_renders_foreground_over_background() {
        let mut cv = Canvas::new(2, 1).unwrap();
        cv.set_color_ansi(ansi::RED, ansi::BLACK).unwrap();
        cv.put_char(0, 0, '#');

        let mut drv = MemoryDriver::new(&cv);
        drv.draw(&cv).unwrap();

        let frame = drv.frame();
        assert_eq!(drv.frame_width(), 2);
        // '#' cell shows the red foreground, the blank cell its black
        // background.
        assert_eq!(frame[0], 0x00aa_0000);
        assert_eq!(frame[1], 0x0000_0000);
    }

    #[test]
    fn title_round_trips() {
        let mut drv = MemoryDriver::new(&Canvas::new(1, 1).unwrap());
        drv.set_title("hello");
        assert_eq!(drv.title(), "hello");
    }
}
