//! Fixed-capacity sample ring buffer.
//!
//! Written only from the conversion path ([`SampleFifo::push`]) and drained
//! only from the consumer path ([`SampleFifo::pop`]).
//!
//! # Full-buffer policy
//!
//! Pushing into a full buffer drops the *incoming* sample and leaves the
//! buffer exactly as it was: no entry is evicted or overwritten, `head` and
//! the count do not move. The caller counts the rejected push as one lost
//! sample, so every sample produced is either delivered or counted in the
//! lost counter. This differs from the common evict-oldest ring buffer and is
//! kept on purpose: consumers drain the oldest, genuinely distinct samples in
//! production order and learn about the gap only through the lost counter.

use crate::sample::TaggedSample;

/// Default number of buffered samples.
pub const DEFAULT_CAPACITY: usize = 8;

/// FIFO of tagged samples backed by a fixed array.
#[derive(Debug, Clone)]
pub struct SampleFifo<const N: usize = DEFAULT_CAPACITY> {
    slots: [u32; N],
    head: usize,
    count: usize,
}

impl<const N: usize> SampleFifo<N> {
    /// Creates an empty buffer.
    pub const fn new() -> Self {
        const { assert!(N > 0, "sample buffer capacity must be non-zero") };
        Self {
            slots: [0; N],
            head: 0,
            count: 0,
        }
    }

    /// Stores `sample` behind the newest entry.
    ///
    /// Returns `false` when the buffer was full; `sample` is then dropped and
    /// the buffer is left untouched.
    pub fn push(&mut self, sample: TaggedSample) -> bool {
        if self.count == N {
            return false;
        }

        self.slots[(self.head + self.count) % N] = sample.bits();
        self.count += 1;
        true
    }

    /// Removes and returns the oldest entry.
    pub fn pop(&mut self) -> Option<TaggedSample> {
        if self.count == 0 {
            return None;
        }

        let sample = TaggedSample::from(self.slots[self.head]);
        self.head = (self.head + 1) % N;
        self.count -= 1;
        Some(sample)
    }

    /// Number of buffered samples.
    pub const fn available(&self) -> usize {
        self.count
    }

    /// Maximum number of buffered samples.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Whether no sample is buffered.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the next push will be rejected.
    pub const fn is_full(&self) -> bool {
        self.count == N
    }

    /// Forgets every buffered sample.
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }
}

impl<const N: usize> Default for SampleFifo<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::GainChannel;

    fn sample(raw: u32) -> TaggedSample {
        TaggedSample::from_parts(raw, GainChannel::A128)
    }

    fn drain<const N: usize>(fifo: &mut SampleFifo<N>) -> ([u32; N], usize) {
        let mut out = [0u32; N];
        let mut len = 0;
        while let Some(s) = fifo.pop() {
            out[len] = s.raw();
            len += 1;
        }
        (out, len)
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut fifo = SampleFifo::<4>::new();
        assert!(fifo.is_empty());
        assert_eq!(fifo.pop(), None);
        assert_eq!(fifo.available(), 0);
    }

    #[test]
    fn drains_in_push_order() {
        let mut fifo = SampleFifo::<8>::new();
        for raw in 1..=8 {
            assert!(fifo.push(sample(raw)));
        }
        assert!(fifo.is_full());

        let (out, len) = drain(&mut fifo);
        assert_eq!(len, 8);
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(fifo.is_empty());
    }

    #[test]
    fn wraps_around_the_backing_array() {
        let mut fifo = SampleFifo::<4>::new();
        for raw in 1..=3 {
            fifo.push(sample(raw));
        }
        assert_eq!(fifo.pop().map(|s| s.raw()), Some(1));
        assert_eq!(fifo.pop().map(|s| s.raw()), Some(2));
        for raw in 4..=6 {
            assert!(fifo.push(sample(raw)));
        }

        let (out, len) = drain(&mut fifo);
        assert_eq!(&out[..len], &[3, 4, 5, 6]);
    }

    #[test]
    fn push_into_full_drops_incoming_and_keeps_contents() {
        let mut fifo = SampleFifo::<4>::new();
        for raw in 1..=4 {
            fifo.push(sample(raw));
        }

        assert!(!fifo.push(sample(99)));
        assert!(!fifo.push(sample(100)));
        assert!(fifo.is_full());
        assert_eq!(fifo.available(), 4);

        let (out, len) = drain(&mut fifo);
        assert_eq!(&out[..len], &[1, 2, 3, 4]);
    }

    #[test]
    fn pop_then_push_on_full_keeps_new_sample_newest() {
        let mut fifo = SampleFifo::<4>::new();
        for raw in 1..=4 {
            fifo.push(sample(raw));
        }

        assert_eq!(fifo.pop().map(|s| s.raw()), Some(1));
        assert!(fifo.push(sample(5)));
        assert!(fifo.is_full());

        let (out, len) = drain(&mut fifo);
        assert_eq!(&out[..len], &[2, 3, 4, 5]);
    }

    #[test]
    fn available_never_exceeds_capacity() {
        let mut fifo = SampleFifo::<8>::new();
        let mut rejected = 0u32;
        for raw in 1..=12 {
            let was_full = fifo.is_full();
            let stored = fifo.push(sample(raw));
            assert_eq!(stored, !was_full);
            if !stored {
                rejected += 1;
            }
            assert!(fifo.available() <= fifo.capacity());
        }
        assert_eq!(rejected, 4);

        let (out, len) = drain(&mut fifo);
        assert_eq!(&out[..len], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(len as u32 + rejected, 12);
    }

    #[test]
    fn every_push_is_either_delivered_or_rejected() {
        let mut fifo = SampleFifo::<3>::new();
        let mut pushed = 0u32;
        let mut rejected = 0u32;
        let mut delivered = 0u32;
        for round in 0..5u32 {
            for raw in 0..(round + 2) {
                pushed += 1;
                if !fifo.push(sample(raw)) {
                    rejected += 1;
                }
            }
            if round % 2 == 0 {
                while fifo.pop().is_some() {
                    delivered += 1;
                }
            } else if fifo.pop().is_some() {
                delivered += 1;
            }
        }
        while fifo.pop().is_some() {
            delivered += 1;
        }
        assert_eq!(pushed, delivered + rejected);
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut fifo = SampleFifo::<2>::new();
        fifo.push(sample(1));
        fifo.push(sample(2));
        fifo.clear();
        assert!(fifo.is_empty());
        assert_eq!(fifo.pop(), None);
    }
}
