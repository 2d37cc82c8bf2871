use vtmsg::{Message, RingBuffer};

use crate::ScreenBuffer;

/// The out-of-process half of §5's producer/consumer model: a memory-mapped
/// file holding the encoded [`ScreenBuffer`], with torn-tolerant writes and
/// change notifications. This workspace represents both as a trait rather
/// than real syscalls (`mmap`, `kqueue`/vnode events), since process
/// orchestration is out of scope (§1).
pub trait Transport {
    /// Persists `bytes` (the freshly encoded buffer) and arranges for
    /// consumers to receive a "changed" notification tagged with
    /// `generation`.
    fn publish(&mut self, generation: u64, bytes: &[u8]);
}

/// A no-op [`Transport`] that just remembers the last published bytes,
/// useful for tests and for embedding a producer and consumer in the same
/// process (as [`vtio`](../vtio)'s `Session` does).
#[derive(Debug, Default)]
pub struct InProcessTransport {
    pub last_published: Vec<u8>,
    pub last_generation: u64,
}

impl Transport for InProcessTransport {
    fn publish(&mut self, generation: u64, bytes: &[u8]) {
        self.last_generation = generation;
        self.last_published = bytes.to_vec();
    }
}

/// Owns a [`ScreenBuffer`], a [`Transport`], and the outbound input-message
/// ring, bumping a generation counter and republishing on every mutation.
///
/// The generation counter stands in for the vnode-change notification a
/// real mmap'd file's writer would trigger: a consumer that reads generation
/// `N` and later observes `N` again knows nothing changed, without needing
/// to re-diff the whole buffer.
pub struct MappedScreenBuffer<T> {
    buffer: ScreenBuffer,
    transport: T,
    generation: u64,
    outbound: RingBuffer,
}

impl<T: Transport> MappedScreenBuffer<T> {
    pub fn new(buffer: ScreenBuffer, transport: T) -> Self {
        let mut mapped = Self { buffer, transport, generation: 0, outbound: RingBuffer::new() };
        mapped.publish();
        mapped
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    /// Runs `f` against the buffer, then republishes it with a bumped
    /// generation. Every `vtterm` write lands here rather than going through
    /// `self.buffer` directly, so no mutation is ever published twice or
    /// skipped.
    pub fn mutate(&mut self, f: impl FnOnce(&mut ScreenBuffer)) {
        f(&mut self.buffer);
        self.publish();
    }

    fn publish(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        let bytes = self.buffer.encode();
        self.transport.publish(self.generation, &bytes);
    }

    /// Queues an input message for eventual delivery to the producer.
    pub fn queue_input(&mut self, message: Message) {
        self.outbound.push(message);
    }

    /// True while messages remain queued; the consumer should only request
    /// write-readiness events on the input pipe in this state (§5).
    #[must_use]
    pub fn has_pending_input(&self) -> bool {
        !self.outbound.is_empty()
    }

    /// Drains queued input messages into `out`, returning the byte count
    /// written.
    pub fn drain_input(&mut self, out: &mut [u8]) -> usize {
        self.outbound.drain_into(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn construction_publishes_once() {
        let mapped = MappedScreenBuffer::new(ScreenBuffer::new(2, 2), InProcessTransport::default());
        assert_eq!(mapped.generation(), 1);
        assert_eq!(mapped.transport.last_generation, 1);
    }

    #[test]
    fn mutate_bumps_generation_and_republishes() {
        let mut mapped = MappedScreenBuffer::new(ScreenBuffer::new(2, 2), InProcessTransport::default());
        mapped.mutate(|buffer| buffer.set_cursor_pos(1, 1));
        assert_eq!(mapped.generation(), 2);
        let decoded = ScreenBuffer::decode(&mapped.transport.last_published).unwrap();
        assert_eq!(decoded.cursor_pos(), (1, 1));
    }

    #[test]
    fn pending_input_flag_tracks_ring_state() {
        let mut mapped = MappedScreenBuffer::new(ScreenBuffer::new(1, 1), InProcessTransport::default());
        assert!(!mapped.has_pending_input());
        mapped.queue_input(Message::Ucs3 { codepoint: 65 });
        assert!(mapped.has_pending_input());
        let mut out = [0u8; 4];
        mapped.drain_input(&mut out);
        assert!(!mapped.has_pending_input());
    }
}
