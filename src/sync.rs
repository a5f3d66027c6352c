//! Frame synchroniser (component D): locates the start-of-minute pulse.
//!
//! Grounded in `a_bpc_start_decode` (cold search) and `a_bpc_trace_decode`
//! (trace continuation) in the original driver.

use crate::buffer::EdgeBuffer;
use crate::classifier::check_start_frame;
use crate::config::DecoderConfig;

/// Synchronisation state: where the current decode attempt starts, and
/// whether it has located a start pulse.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncState {
    /// Index of the first data-bearing edge in the buffer, once located.
    pub decode_offset: u8,
    /// A start pulse was located; the reassembler may proceed once enough
    /// edges accumulate.
    pub decode_valid: bool,
    /// The previous frame finished successfully; the next start pulse may
    /// be accepted at the canonical cadence rather than scanned for.
    pub trace_valid: bool,
}

impl SyncState {
    /// Cold search: scan buffered intervals `[0..len-1)` for the first one
    /// that satisfies the start-pulse tolerance. `buffer.fill_diffs` must
    /// have been called first.
    ///
    /// `spec.md` §4.D: "the *first* index `i`... sets `decode_offset = i +
    /// 1`." The original C loop has no early exit and so keeps the *last*
    /// match; this implementation follows the spec's stated semantics
    /// (first match wins) rather than that incidental behaviour.
    #[expect(clippy::arithmetic_side_effects, reason = "samples is checked non-empty above; i is bounded by BUFFER_CAPACITY, far under u8::MAX")]
    pub fn cold_search(&mut self, buffer: &EdgeBuffer, config: &DecoderConfig) {
        let samples = buffer.samples();
        if samples.is_empty() {
            return;
        }
        for (i, sample) in samples[..samples.len() - 1].iter().enumerate() {
            if check_start_frame(sample.diff_us, config) {
                self.decode_offset = (i + 1) as u8;
                self.decode_valid = true;
                return;
            }
        }
    }

    /// Trace continuation: the gap from the previous edge to the new one
    /// either *is* the start pulse (lock in at offset 0) or the attempt is
    /// abandoned entirely.
    ///
    /// Returns `true` if the buffer should be cleared (synchronisation
    /// failed and the just-pushed edge must be discarded too, mirroring
    /// `a_bpc_trace_decode`'s `decode_len = 0`).
    #[must_use]
    pub fn trace_continue(&mut self, gap_us: i64, config: &DecoderConfig) -> bool {
        let gap = u32::try_from(gap_us).unwrap_or(u32::MAX);
        if check_start_frame(gap, config) {
            self.decode_offset = 0;
            self.decode_valid = true;
            self.trace_valid = false;
            false
        } else {
            *self = Self::default();
            true
        }
    }
}
