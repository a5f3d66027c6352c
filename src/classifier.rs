//! Interval classifier (component C): maps inter-edge durations to symbols.
//!
//! Grounded in `a_check_frame`/`a_check_frame2`/`a_check_start_frame` and
//! `a_bpc_data_decode`/`a_bpc_data_decode2` in the original C driver. The
//! unrolled if-else chain that tries each of the four nominal widths in turn
//! is replaced by iterating [`crate::constants::DATA_NOMINALS_US`] (Design
//! Note: "table-driven loop").

use crate::config::DecoderConfig;

/// Single-edge tolerance: accept `check ≈ t` within `±max_range · t`.
#[must_use]
pub fn check_frame(check: u32, t: u32, max_range: f32) -> bool {
    let allowed = (t as f32) * max_range;
    #[expect(clippy::arithmetic_side_effects, reason = "both operands are u32 widened to i64; the difference always fits")]
    let diff = (i64::from(check) - i64::from(t)).unsigned_abs();
    (diff as f32) <= allowed
}

/// Paired-edge tolerance: the low width must match `t` within tolerance,
/// *and* `low + high` must match the nominal frame period within tolerance.
#[must_use]
pub fn check_frame2(low: u32, high: u32, t: u32, config: &DecoderConfig) -> bool {
    #[expect(clippy::arithmetic_side_effects, reason = "both operands are u32 widened to u64; the sum always fits")]
    let total = u64::from(low) + u64::from(high);
    let frame_time = f64::from(config.frame_time_us);
    let range = f64::from(config.max_range);
    let lo_bound = frame_time * (1.0 - range);
    let hi_bound = frame_time * (1.0 + range);
    if (total as f64) < lo_bound || (total as f64) > hi_bound {
        return false;
    }
    check_frame(low, t, config.max_range)
}

/// Start-pulse tolerance: `check` lies within the widened `[start_min,
/// start_max]` window, endpoints inclusive.
#[must_use]
pub fn check_start_frame(check: u32, config: &DecoderConfig) -> bool {
    let lo = (config.start_min_us as f32) * (1.0 - config.max_start_range);
    let hi = (config.start_max_us as f32) * (1.0 + config.max_start_range);
    (check as f32) >= lo && (check as f32) <= hi
}

/// Classify a paired symbol (low + following high width) against the four
/// data nominals. Returns the 2-bit symbol value, or `None` if none match.
#[must_use]
pub fn classify_paired(low: u32, high: u32, config: &DecoderConfig) -> Option<u8> {
    config
        .data_nominals_us
        .iter()
        .position(|&nominal| check_frame2(low, high, nominal, config))
        .map(|idx| idx as u8)
}

/// Classify the final, unpaired symbol (single-edge tolerance only, since no
/// following edge exists to form a pair).
#[must_use]
pub fn classify_single(low: u32, config: &DecoderConfig) -> Option<u8> {
    config
        .data_nominals_us
        .iter()
        .position(|&nominal| check_frame(low, nominal, config.max_range))
        .map(|idx| idx as u8)
}
