use vtdecode::{Decoder, Event, Flags};

/// A realistic mixed stream: plain text, a cursor move, an SGR reset, and an
/// OSC window title, threaded through the same decoder instance the way
/// `vtterm` would drive it from a live byte stream.
#[test]
fn mixed_stream_produces_expected_event_sequence() {
    let mut decoder = Decoder::new(Flags::default());
    let mut kinds = Vec::new();
    let input = "hi\x1b[2J\x1b[0m\x1b]0;title\x07bye";
    for c in input.chars() {
        decoder.feed_char(c, false, &mut |event: Event<'_>| {
            kinds.push(match event {
                Event::Printable { character, .. } => format!("P({character})"),
                Event::ControlCharacter(c) => format!("C({})", c as u32),
                Event::EscapeSequence { final_byte, .. } => format!("E({final_byte})"),
                Event::ControlSequence { final_byte, .. } => format!("S({final_byte})"),
                Event::ControlString { introducer, .. } => format!("X({})", introducer as u32),
            });
        });
    }
    assert_eq!(
        kinds,
        vec![
            "P(h)".to_string(),
            "P(i)".to_string(),
            "S(J)".to_string(),
            "S(m)".to_string(),
            "X(157)".to_string(),
            "P(b)".to_string(),
            "P(y)".to_string(),
            "P(e)".to_string(),
        ]
    );
}

#[test]
fn device_status_report_query_round_trips_through_args() {
    let mut decoder = Decoder::new(Flags::default());
    let mut saw = false;
    for c in "\x1b[6n".chars() {
        decoder.feed_char(c, false, &mut |event: Event<'_>| {
            if let Event::ControlSequence { final_byte: 'n', args, .. } = event {
                saw = args.arg_zero_if_empty(0) == 6;
            }
        });
    }
    assert!(saw);
}
