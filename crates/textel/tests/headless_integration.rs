//! End-to-end headless pipeline: canvas writes through the attribute
//! codec, out via the export boundary and the in-memory driver, with
//! host-pushed events flowing back through the mailbox contract.

use textel::prelude::*;
use textel::{MemoryDriver, export_plain, import_plain};

#[test]
fn clear_export_scenario() {
    let mut cv = Canvas::new(3, 3).unwrap();
    cv.clear();
    assert_eq!(export_plain(&cv), "   \n   \n   \n");
}

#[test]
fn draw_poll_resize_cycle() {
    let mut cv = Canvas::new(10, 4).unwrap();
    let mut drv = MemoryDriver::new(&cv);
    drv.push_resize(10, 4);

    cv.set_color_ansi(ansi::WHITE, ansi::BLUE).unwrap();
    cv.put_str(0, 0, "status");
    drv.draw(&cv).unwrap();
    assert_eq!(drv.frame().len(), 40);

    // Host shrinks the surface; the canvas follows only on
    // handle_resize, and content in the overlap survives.
    drv.push_resize(8, 2);
    match drv.poll_event(&mut cv) {
        Some(Event::Resize { width, height }) => {
            assert_eq!((width, height), (8, 2));
        }
        other => panic!("expected resize, got {other:?}"),
    }
    drv.handle_resize(&mut cv);
    assert_eq!((cv.width(), cv.height()), (8, 2));
    assert_eq!(cv.get_char(0, 0), 's');

    drv.draw(&cv).unwrap();
    assert_eq!(drv.frame().len(), 16);
}

#[test]
fn key_events_round_trip_through_the_driver() {
    let mut cv = Canvas::new(4, 4).unwrap();
    let mut drv = MemoryDriver::new(&cv);
    drv.push_resize(4, 4);

    drv.push_event(Event::Key(KeyEvent::new(KeyCode::Char('q'))));
    match drv.poll_event(&mut cv) {
        Some(Event::Key(key)) => assert_eq!(key.code, KeyCode::Char('q')),
        other => panic!("expected key, got {other:?}"),
    }
    assert_eq!(drv.poll_event(&mut cv), None);
}

#[test]
fn named_factory_returns_headless_backends() {
    let mut cv = Canvas::new(5, 5).unwrap();

    let drv = driver_for(Some("null"), &mut cv).unwrap();
    assert_eq!(drv.name(), "null");

    let drv = driver_for(Some("memory"), &mut cv).unwrap();
    assert_eq!(drv.name(), "memory");

    assert!(driver_for(Some("bogus"), &mut cv).is_err());
}

#[test]
fn prelude_glob_does_not_shadow_the_core_crate() {
    // This file glob-imports the prelude; standard `core` paths must
    // still resolve alongside it.
    let width: core::primitive::usize = 6;
    let cv = Canvas::new(width, 1).unwrap();
    assert_eq!(cv.width(), 6);
}

#[test]
fn plain_round_trip_preserves_a_composed_screen() {
    let mut cv = Canvas::new(12, 3).unwrap();
    cv.put_str(0, 0, "header");
    cv.put_str(2, 1, "日本語");
    cv.put_str(4, 2, "footer");

    let text = export_plain(&cv);
    let back = import_plain(&text).unwrap();
    assert_eq!((back.width(), back.height()), (12, 3));
    assert_eq!(export_plain(&back), text);
}
