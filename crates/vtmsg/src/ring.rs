use std::collections::VecDeque;

use crate::{Message, MESSAGE_LEN};

/// A queue of encoded messages awaiting delivery over the consumer→producer
/// pipe.
///
/// §5 describes the transport as a named pipe the consumer only polls for
/// write-readiness "while its outbound buffer is non-empty"; this type is
/// that buffer, kept transport-agnostic (no file descriptor, no blocking
/// write) so the process-orchestration layer can drive it however it likes.
#[derive(Debug, Default)]
pub struct RingBuffer {
    queued: VecDeque<[u8; MESSAGE_LEN]>,
}

impl RingBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a message for sending.
    pub fn push(&mut self, message: Message) {
        self.queued.push_back(message.encode());
    }

    /// True when there is nothing left to send, i.e. write-readiness events
    /// should not be requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    /// Drains as many whole messages as fit in `out`, returning the number
    /// of bytes written. Never writes a partial message.
    pub fn drain_into(&mut self, mut out: &mut [u8]) -> usize {
        let mut written = 0;
        while out.len() >= MESSAGE_LEN {
            let Some(next) = self.queued.pop_front() else {
                break;
            };
            out[..MESSAGE_LEN].copy_from_slice(&next);
            out = &mut out[MESSAGE_LEN..];
            written += MESSAGE_LEN;
        }
        written
    }

    /// Feeds raw bytes received from the pipe's other end, decoding whole
    /// messages and handing each to `sink`. Matches the wire format's
    /// forward-extension rule: an unrecognised tag is skipped rather than
    /// treated as a framing error, since a newer peer may have sent a
    /// message type this build predates.
    pub fn feed(bytes: &[u8], mut sink: impl FnMut(Message)) {
        for chunk in bytes.chunks_exact(MESSAGE_LEN) {
            let mut buf = [0u8; MESSAGE_LEN];
            buf.copy_from_slice(chunk);
            if let Some(message) = Message::decode(buf) {
                sink(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Modifiers;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_queue_reports_empty() {
        let ring = RingBuffer::new();
        assert!(ring.is_empty());
    }

    #[test]
    fn push_then_drain_round_trips() {
        let mut ring = RingBuffer::new();
        ring.push(Message::Ucs3 { codepoint: 65 });
        ring.push(Message::MouseColumn { column: 10 });
        assert_eq!(ring.len(), 2);

        let mut buf = [0u8; MESSAGE_LEN * 2];
        let written = ring.drain_into(&mut buf);
        assert_eq!(written, buf.len());
        assert!(ring.is_empty());

        let mut received = Vec::new();
        RingBuffer::feed(&buf, |m| received.push(m));
        assert_eq!(
            received,
            vec![Message::Ucs3 { codepoint: 65 }, Message::MouseColumn { column: 10 }]
        );
    }

    #[test]
    fn drain_into_never_splits_a_message() {
        let mut ring = RingBuffer::new();
        ring.push(Message::ExtendedKey { key: 1, modifiers: Modifiers::empty() });
        let mut small = [0u8; MESSAGE_LEN - 1];
        let written = ring.drain_into(&mut small);
        assert_eq!(written, 0);
        assert_eq!(ring.len(), 1);
    }

    #[test]
    fn feed_skips_unrecognised_tags() {
        let mut received = Vec::new();
        let bytes = [0xFF, 0, 0, 0, 0, 65, 0, 0];
        RingBuffer::feed(&bytes, |m| received.push(m));
        assert_eq!(received, vec![Message::Ucs3 { codepoint: 65 }]);
    }
}
