//! Edge buffer (component B): a bounded, non-ring sequence of recent edges.
//!
//! Grounded in the `handle->decode[76]` / `decode_len` fields of the
//! original driver. `heapless::Vec` gives the same fixed-capacity, no-heap
//! storage the teacher crate uses throughout (e.g. `ir_nec`'s event queue),
//! generalized here to a plain inline buffer rather than a channel.

use heapless::Vec;

use crate::constants::BUFFER_CAPACITY;
use crate::timestamp::EdgeSample;

/// Ordered, append-only sequence of edges for the current frame attempt.
///
/// Not a ring buffer: it always holds `[0..len)` of the current attempt,
/// oldest edge first. Cleared on watchdog trip, overflow, or frame
/// completion.
#[derive(Clone, Debug, Default)]
pub struct EdgeBuffer {
    samples: Vec<EdgeSample, BUFFER_CAPACITY>,
}

impl EdgeBuffer {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Number of edges currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append an edge. The caller is responsible for clearing the buffer
    /// before this would overflow its capacity (the watchdog does this).
    pub fn push(&mut self, sample: EdgeSample) {
        let _ = self.samples.push(sample);
    }

    /// Discard all buffered edges.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Read-only access to the buffered edges.
    #[must_use]
    pub fn samples(&self) -> &[EdgeSample] {
        &self.samples
    }

    /// Fill in `diff_us` for every edge but the last, as the microsecond gap
    /// to its successor. Mirrors the `diff` loop duplicated at the top of
    /// `a_bpc_start_decode`/`a_bpc_decode` in the original driver.
    #[expect(clippy::arithmetic_side_effects, reason = "len >= 2 is checked above; len - 1 and i + 1 stay in bounds")]
    pub fn fill_diffs(&mut self) {
        let len = self.samples.len();
        if len < 2 {
            return;
        }
        for i in 0..len - 1 {
            let next_t = self.samples[i + 1].t;
            let diff = next_t.diff_micros(self.samples[i].t);
            self.samples[i].diff_us = u32::try_from(diff).unwrap_or(u32::MAX);
        }
    }
}
