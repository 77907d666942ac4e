//! Host-level tests for the multiplexing cycle itself: service order,
//! blank-before-enable, polarity handling, and blinking.

mod common;

use common::{PinId, STRAIGHT, WriteLog, driven_pattern, enabled_digit, mux_with_displays, segment_bank};
use sevseg_mux::{BLINK_ON_TICKS, Error, Glyph, MuxConfig, Polarity, SegMux};

#[test]
fn round_robin_follows_registration_order() {
    let log = WriteLog::new();
    let (mut mux, _handles) = mux_with_displays(&log, 3, STRAIGHT);

    for expected in [0, 1, 2, 0, 1, 2, 0] {
        mux.tick().expect("mock pins never fail");
        let writes = log.take();
        assert_eq!(enabled_digit(&writes), expected);
    }
}

#[test]
fn every_other_digit_line_is_held_off_during_a_tick() {
    let log = WriteLog::new();
    let (mut mux, _handles) = mux_with_displays(&log, 3, STRAIGHT);

    mux.tick().expect("mock pins never fail");
    let writes = log.take();

    // 3 blanked digit lines + 8 segment lines + 1 enabled digit line
    assert_eq!(writes.len(), 12);
    for index in 0..3 {
        assert!(
            writes.contains(&(PinId::Digit(index), false)),
            "digit line {index} must be blanked first"
        );
    }
    assert_eq!(enabled_digit(&writes), 0);
}

#[test]
fn blank_pass_precedes_segments_which_precede_the_enable() {
    let log = WriteLog::new();
    let (mut mux, handles) = mux_with_displays(&log, 3, STRAIGHT);
    mux.set_glyph(handles[1], Glyph::Digit7)
        .expect("handle is valid");

    for _ in 0..3 {
        mux.tick().expect("mock pins never fail");
        let writes = log.take();

        let last_blank = writes
            .iter()
            .rposition(|&(id, on)| matches!(id, PinId::Digit(_)) && !on)
            .expect("blank pass present");
        let first_segment = writes
            .iter()
            .position(|&(id, _)| matches!(id, PinId::Segment(_)))
            .expect("segment drive present");
        let last_segment = writes
            .iter()
            .rposition(|&(id, _)| matches!(id, PinId::Segment(_)))
            .expect("segment drive present");
        let enable = writes
            .iter()
            .position(|&(id, on)| matches!(id, PinId::Digit(_)) && on)
            .expect("enable present");

        assert!(last_blank < first_segment, "blank everything before driving segments");
        assert!(last_segment < enable, "segments settle before the select line opens");
    }
}

#[test]
fn tick_with_no_displays_writes_nothing() {
    let log = WriteLog::new();
    let mut mux = SegMux::new(segment_bank(&log), STRAIGHT).expect("mock pins never fail");
    log.take();

    mux.tick().expect("mock pins never fail");
    assert_eq!(log.len(), 0);
}

#[test]
fn segment_lines_follow_the_encoded_pattern() {
    let log = WriteLog::new();
    let (mut mux, handles) = mux_with_displays(&log, 1, STRAIGHT);
    mux.set_glyph(handles[0], Glyph::Digit7)
        .expect("handle is valid");

    mux.tick().expect("mock pins never fail");
    let writes = log.take();
    assert_eq!(driven_pattern(&writes), Glyph::Digit7.pattern());
}

#[test]
fn inverted_segments_complement_the_digit_select_level() {
    let inverted_segments = MuxConfig {
        segments: Polarity::ActiveLow,
        digit_select: Polarity::ActiveHigh,
    };
    let log = WriteLog::new();
    let (mut mux, handles) = mux_with_displays(&log, 1, inverted_segments);
    // Digit 8 lights segments A-G, leaving only the decimal point dark.
    mux.set_glyph(handles[0], Glyph::Digit8)
        .expect("handle is valid");

    mux.tick().expect("mock pins never fail");
    let writes = log.take();

    for &(id, on) in &writes {
        match id {
            PinId::Segment(index) if index < 7 => {
                assert!(!on, "lit segment {index} must be driven low when inverted");
            }
            PinId::Segment(index) => {
                assert!(on, "dark segment {index} must be driven high when inverted");
            }
            PinId::Digit(_) => {}
        }
    }
    assert_eq!(enabled_digit(&writes), 0);
}

#[test]
fn fifth_registration_is_rejected() {
    let log = WriteLog::new();
    let (mut mux, handles) = mux_with_displays(&log, 4, STRAIGHT);
    assert_eq!(handles.len(), 4);
    log.take();

    let result = mux.register_display(log.pin(PinId::Digit(4)));
    assert!(matches!(result, Err(Error::CapacityExceeded)));
    // The rejected registration must not have touched any pin.
    assert_eq!(log.len(), 0);
    assert_eq!(mux.display_count(), 4);
}

#[test]
fn registration_drives_the_new_line_off() {
    let log = WriteLog::new();
    // Common-cathode wiring: off means the select line rests high.
    let mut mux = SegMux::new(segment_bank(&log), MuxConfig::default()).expect("mock pins never fail");
    log.take();

    let handle = mux
        .register_display(log.pin(PinId::Digit(0)))
        .expect("capacity is not exceeded");
    assert_eq!(log.take(), [(PinId::Digit(0), true)]);
    assert_eq!(mux.glyph(handle), Some(Glyph::Blank));
}

#[test]
fn blinking_display_blanks_during_the_off_window() {
    let log = WriteLog::new();
    let (mut mux, handles) = mux_with_displays(&log, 1, STRAIGHT);
    mux.set_glyph(handles[0], Glyph::Digit5)
        .expect("handle is valid");
    mux.set_blink(handles[0], true).expect("handle is valid");

    // Lit window first.
    for _ in 0..(BLINK_ON_TICKS - 1) {
        mux.tick().expect("mock pins never fail");
        let writes = log.take();
        assert_eq!(driven_pattern(&writes), Glyph::Digit5.pattern());
    }

    // Then the blanked window; the select line still cycles.
    mux.tick().expect("mock pins never fail");
    let writes = log.take();
    assert_eq!(driven_pattern(&writes), Glyph::Blank.pattern());
    assert_eq!(enabled_digit(&writes), 0);
}

#[test]
fn release_returns_every_pin() {
    let log = WriteLog::new();
    let (mux, _handles) = mux_with_displays(&log, 2, STRAIGHT);

    let (segment_pins, digit_pins) = mux.release();
    assert_eq!(segment_pins.len(), 8);
    assert_eq!(digit_pins.len(), 2);
}
