use std::io::{self, Write};

use vtcap::CapabilityDescriptor;
use vtcompositor::Compositor;
use vtdecode::{ByteFeed, Decoder as ControlDecoder, Event, Flags};
use vtoutput::Emitter;
use vtterm::{Host, SoftTerm};
use vttui::{Options, Realizer};
use vtutf8::Utf8Decoder;

/// Wires the producer pipeline (bytes → UTF-8 → ECMA-48 → [`SoftTerm`] →
/// `ScreenBuffer`) and the consumer pipeline (`ScreenBuffer` →
/// [`Compositor`] → [`Realizer`] → [`Emitter`] → bytes) into one in-process
/// type, per the facade §4.K describes.
///
/// A real deployment runs the two pipelines in separate processes sharing a
/// memory-mapped `ScreenBuffer` and a named input pipe (§5); `Session`
/// embeds both halves of that split in one process instead, the same way
/// [`vtscreen::InProcessTransport`] already stands in for the producer
/// side's transport. It owns no terminal-specific logic of its own; it is
/// the glue the lower crates assume exists.
pub struct Session<H> {
    utf8: Utf8Decoder,
    control: ControlDecoder,
    term: SoftTerm<H>,
    compositor: Compositor,
    realizer: Realizer,
    cap: CapabilityDescriptor,
    c1_7bit: bool,
}

impl<H: Host> Session<H> {
    #[must_use]
    pub fn new(width: u16, height: u16, host: H, cap: CapabilityDescriptor, options: Options, c1_7bit: bool) -> Self {
        Self {
            utf8: Utf8Decoder::new(),
            control: ControlDecoder::new(Flags::default()),
            term: SoftTerm::new(width, height, host),
            compositor: Compositor::new(options.tui_level > 0, height, width),
            realizer: Realizer::new(options),
            cap,
            c1_7bit,
        }
    }

    #[must_use]
    pub fn term(&self) -> &SoftTerm<H> {
        &self.term
    }

    #[must_use]
    pub fn term_mut(&mut self) -> &mut SoftTerm<H> {
        &mut self.term
    }

    /// Drives application output bytes through UTF-8 decoding, ECMA-48
    /// classification, and `SoftTerm`'s state machine, mutating the shared
    /// `ScreenBuffer`. Never fails, matching `SoftTerm`'s own "never
    /// throws or aborts" contract (§7).
    pub fn feed(&mut self, bytes: &[u8]) {
        let _span = tracing::trace_span!("feed", bytes = bytes.len()).entered();
        let control = &mut self.control;
        let term = &mut self.term;
        let mut sink = |event: Event<'_>| term.feed_event(event);
        let mut byte_feed = ByteFeed::new(control, &mut sink);
        for &byte in bytes {
            self.utf8.process(&mut byte_feed, byte);
        }
    }

    /// Picks up a new host terminal size: resizes both `SoftTerm`'s
    /// `ScreenBuffer` and the compositor, and forces the next [`render`]
    /// call to repaint every cell (§5's `WINCH` handling, §4.J's
    /// `handle_resize_event`).
    ///
    /// [`render`]: Self::render
    pub fn resize(&mut self, width: u16, height: u16) {
        let _span = tracing::trace_span!("resize", width, height).entered();
        self.term.resize(width, height);
        self.realizer.handle_resize_event(&mut self.compositor, width, height);
    }

    /// Realizes the current `ScreenBuffer` contents onto `out`: repaints the
    /// compositor's `new` array from the buffer, diffs it against `cur`, and
    /// emits the minimal ECMA-48 byte sequence that reproduces the
    /// difference, honouring this session's [`CapabilityDescriptor`].
    pub fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        let _span = tracing::trace_span!(
            "render",
            width = self.term.screen.width(),
            height = self.term.screen.height()
        )
        .entered();
        let mut emitter = Emitter::new(out, self.cap, self.c1_7bit);
        self.realizer.handle_refresh_event(&mut self.compositor, &self.term.screen, &mut emitter)
    }

    pub fn enter_full_screen_mode(&mut self, out: &mut impl Write) -> io::Result<()> {
        let mut emitter = Emitter::new(out, self.cap, self.c1_7bit);
        self.realizer.enter_full_screen_mode(&mut emitter)
    }

    pub fn exit_full_screen_mode(&mut self, out: &mut impl Write) -> io::Result<()> {
        let mut emitter = Emitter::new(out, self.cap, self.c1_7bit);
        self.realizer.exit_full_screen_mode(&mut emitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vtterm::NullHost;

    fn session(width: u16, height: u16) -> Session<NullHost> {
        Session::new(width, height, NullHost::default(), CapabilityDescriptor::xterm_256color(), Options::default(), false)
    }

    #[test]
    fn feed_then_render_produces_the_written_text() {
        let mut session = session(10, 2);
        session.feed(b"\x1b[2J\x1b[HAB");
        let mut out = Vec::new();
        session.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('A'));
        assert!(text.contains('B'));
    }

    #[test]
    fn a_second_render_with_no_new_writes_emits_nothing_but_cursor_housekeeping() {
        let mut session = session(10, 2);
        session.feed(b"hi");
        let mut first = Vec::new();
        session.render(&mut first).unwrap();
        let mut second = Vec::new();
        session.render(&mut second).unwrap();
        assert!(second.len() < first.len());
    }

    #[test]
    fn resize_forces_a_full_repaint_on_the_next_render() {
        let mut session = session(4, 2);
        session.feed(b"hi");
        let mut first = Vec::new();
        session.render(&mut first).unwrap();
        session.resize(6, 3);
        let mut second = Vec::new();
        session.render(&mut second).unwrap();
        assert!(!second.is_empty());
    }
}
