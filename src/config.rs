//! Runtime-tunable tolerances for the decoder.
//!
//! The original driver hard-codes every tolerance as a compile-time
//! `#define`, overridable only via `#ifndef` before the header is included.
//! `DecoderConfig` carries the same nominal values but as ordinary fields, so
//! a caller can retune a noisy receiver without recompiling, the same way
//! the teacher crate's `ClockTime::new` takes what would otherwise be a
//! hard-coded constant.
//!
//! The edge buffer's physical capacity is not one of these fields: like the
//! teacher's `heapless` buffers elsewhere, its size is a `const` generic
//! baked into [`crate::buffer::EdgeBuffer`] at compile time
//! ([`crate::constants::BUFFER_CAPACITY`]), not a runtime value.

use crate::constants;

/// Tolerances and thresholds governing classification, synchronisation, and
/// the watchdog. `Default` reproduces the protocol's nominal values.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Fractional tolerance for single- and paired-edge symbol comparisons.
    pub max_range: f32,
    /// Fractional tolerance for the start-pulse window.
    pub max_start_range: f32,
    /// Nominal minimum width of the start-of-minute low pulse, in µs.
    pub start_min_us: u32,
    /// Nominal maximum width of the start-of-minute low pulse, in µs.
    pub start_max_us: u32,
    /// Nominal full symbol period (low + high), in µs.
    pub frame_time_us: u32,
    /// Nominal low-pulse widths for the four data symbols, in µs.
    pub data_nominals_us: [u32; 4],
    /// Minimum buffered edges past `decode_offset` before a decode attempt
    /// runs.
    pub min_decode_len: usize,
    /// Silence gap, in µs, that forces a watchdog reset.
    pub watchdog_gap_us: i64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_range: constants::MAX_RANGE,
            max_start_range: constants::MAX_START_RANGE,
            start_min_us: constants::START_MIN_US,
            start_max_us: constants::START_MAX_US,
            frame_time_us: constants::FRAME_TIME_US,
            data_nominals_us: constants::DATA_NOMINALS_US,
            min_decode_len: constants::MIN_DECODE_LEN,
            watchdog_gap_us: constants::WATCHDOG_GAP_US,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DecoderConfig;

    #[test]
    fn default_matches_nominal_constants() {
        let config = DecoderConfig::default();
        assert_eq!(config.data_nominals_us, [100_000, 200_000, 300_000, 400_000]);
        assert_eq!(config.min_decode_len, 38);
    }
}
