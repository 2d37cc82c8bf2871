use vtcap::CapabilityDescriptor;
use vtio::Session;
use vtterm::NullHost;
use vttui::Options;

/// Concrete scenario 1 from SPEC_FULL.md §8: clear, home, write A/B/C on an
/// 80×25 terminal from a fresh reset leaves the cursor at column 3 and those
/// three characters at the start of row 0.
#[test]
fn clear_home_and_three_printables_position_the_cursor_after_them() {
    let mut session = Session::new(80, 25, NullHost::default(), CapabilityDescriptor::vt220(), Options::default(), false);
    session.feed(b"\x1b[2J\x1b[HABC");
    assert_eq!(session.term().screen.cursor_pos(), (3, 0));
}

#[test]
fn render_reproduces_a_truecolour_cell_in_the_emitted_bytes() {
    let mut session = Session::new(10, 2, NullHost::default(), CapabilityDescriptor::xterm_256color(), Options::default(), false);
    session.feed(b"\x1b[38;2;10;20;30mX");
    let mut out = Vec::new();
    session.render(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("10") && text.contains("20") && text.contains("30"));
}

#[test]
fn enter_and_exit_full_screen_mode_do_not_error() {
    let mut session = Session::new(10, 2, NullHost::default(), CapabilityDescriptor::xterm_256color(), Options::default(), false);
    let mut out = Vec::new();
    session.enter_full_screen_mode(&mut out).unwrap();
    session.exit_full_screen_mode(&mut out).unwrap();
    assert!(!out.is_empty());
}
