#![forbid(unsafe_code)]

//! Single-slot bridge between a backend's notification source and the
//! driver's poll loop.
//!
//! One `Option<Event>` slot plus one pending size. Posting overwrites:
//! the newest value wins. For resizes this is the desired coalescing
//! (only the final size matters); for discrete events it means an
//! unconsumed event can be lost if the host posts faster than the
//! consumer polls. That hazard is part of the contract and is pinned by
//! a regression test rather than hidden behind a queue.
//!
//! Single consumer, no locking. Never post from inside a poll callback.

use textel_core::Event;

/// Latest-wins event and resize slots.
#[derive(Debug, Default)]
pub struct Mailbox {
    event: Option<Event>,
    resize: Option<(usize, usize)>,
}

impl Mailbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post an event, replacing any unconsumed one.
    pub fn post(&mut self, event: Event) {
        self.event = Some(event);
    }

    /// Remove and return the posted event, if any.
    pub fn take(&mut self) -> Option<Event> {
        self.event.take()
    }

    /// True when an event is waiting.
    #[must_use]
    pub fn has_event(&self) -> bool {
        self.event.is_some()
    }

    /// Record a pending resize, coalescing with any earlier one.
    pub fn request_resize(&mut self, width: usize, height: usize) {
        self.resize = Some((width, height));
    }

    /// Remove and return the pending resize, if any.
    pub fn take_resize(&mut self) -> Option<(usize, usize)> {
        self.resize.take()
    }

    /// True when a resize is waiting.
    #[must_use]
    pub fn has_resize(&self) -> bool {
        self.resize.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Mailbox;
    use textel_core::{Event, KeyCode, KeyEvent};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)))
    }

    #[test]
    fn take_empties_the_slot() {
        let mut mb = Mailbox::new();
        mb.post(key('a'));
        assert!(mb.has_event());
        assert_eq!(mb.take(), Some(key('a')));
        assert_eq!(mb.take(), None);
        assert!(!mb.has_event());
    }

    #[test]
    fn mailbox_overwrite_drops_discrete_event() {
        // Latest-wins: the unconsumed 'a' is gone once 'b' is posted.
        let mut mb = Mailbox::new();
        mb.post(key('a'));
        mb.post(key('b'));
        assert_eq!(mb.take(), Some(key('b')));
        assert_eq!(mb.take(), None);
    }

    #[test]
    fn resizes_coalesce_to_the_final_size() {
        let mut mb = Mailbox::new();
        mb.request_resize(80, 25);
        mb.request_resize(120, 40);
        assert_eq!(mb.take_resize(), Some((120, 40)));
        assert_eq!(mb.take_resize(), None);
    }

    #[test]
    fn event_and_resize_slots_are_independent() {
        let mut mb = Mailbox::new();
        mb.post(key('x'));
        mb.request_resize(10, 10);
        assert_eq!(mb.take_resize(), Some((10, 10)));
        assert!(mb.has_event());
    }
}
