//! Symbol → field reassembler (component E) and its parity gate (component
//! F is invoked from here, since the spec ties parity directly to the
//! fields it protects).
//!
//! Grounded in `a_bpc_decode` in the original driver. That function unrolls
//! all 19 symbol decodes with a copy-pasted error handler after each one;
//! here a single table-driven loop (Design Note "Repeated unrolled decode
//! block") classifies every symbol into `values[19]` with one shared error
//! path, and the bit-assembly table from `spec.md` §4.E builds the fields
//! from that array.

use crate::buffer::EdgeBuffer;
use crate::classifier::{classify_paired, classify_single};
use crate::config::DecoderConfig;
use crate::constants::SYMBOL_COUNT;
use crate::frame::{DecodedFrame, FrameStatus};
use crate::parity::{class1_ok, class2_ok};

/// Run a full decode attempt starting at `offset` in `buffer`.
///
/// `buffer.fill_diffs()` must already have been called by the caller (the
/// handle does this once per edge, covering the whole buffer).
#[must_use]
pub fn decode(buffer: &EdgeBuffer, offset: u8, config: &DecoderConfig) -> DecodedFrame {
    let samples = buffer.samples();
    let offset = usize::from(offset);

    let mut values = [0u8; SYMBOL_COUNT];
    let mut ind = offset;
    #[expect(clippy::arithmetic_side_effects, reason = "offset is a u8 widened to usize and ind grows by 2 at most SYMBOL_COUNT times; nowhere near usize::MAX")]
    for (i, slot) in values.iter_mut().enumerate() {
        let is_last = i + 1 == SYMBOL_COUNT;
        let Some(low) = samples.get(ind) else {
            return DecodedFrame::failed(FrameStatus::FrameInvalid);
        };
        let classified = if is_last {
            classify_single(low.diff_us, config)
        } else {
            let Some(high) = samples.get(ind + 1) else {
                return DecodedFrame::failed(FrameStatus::FrameInvalid);
            };
            classify_paired(low.diff_us, high.diff_us, config)
        };
        let Some(value) = classified else {
            return DecodedFrame::failed(FrameStatus::FrameInvalid);
        };
        *slot = value;
        ind += 2;
    }

    let p1 = values[0];
    let p2 = values[1];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let hour_raw = (values[2] << 2) | values[3];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let minute = (values[4] << 4) | (values[5] << 2) | values[6];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let weekday_raw = (values[7] << 2) | values[8];
    let p3 = values[9];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let day = (values[10] << 4) | (values[11] << 2) | values[12];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let month = (values[13] << 2) | values[14];
    #[expect(clippy::arithmetic_side_effects, reason = "classified symbol values are 0..=3; shift/or bit assembly can't overflow a u8")]
    let year_low6 = (values[15] << 4) | (values[16] << 2) | values[17];
    let p4 = values[18];

    let second = match p1 {
        0 => 19,
        1 => 39,
        2 => 59,
        _ => return DecodedFrame::failed(FrameStatus::FrameInvalid),
    };

    // Parity class 1 is checked against the *raw* hour, before any PM
    // adjustment — the original driver computes this popcount sum before
    // the `p3 == 2`/`p3 == 3` branch adds 12.
    if !class1_ok(p1, p2, hour_raw, minute, weekday_raw, p3) {
        return DecodedFrame::failed(FrameStatus::ParityErr);
    }
    #[expect(clippy::arithmetic_side_effects, reason = "hour_raw is a 4-bit field (max 15); +12 can't overflow a u8")]
    let hour = if p3 == 2 || p3 == 3 { hour_raw + 12 } else { hour_raw };

    if !class2_ok(day, month, year_low6, p4) {
        return DecodedFrame::failed(FrameStatus::ParityErr);
    }

    // When P4 signals a "year-add" frame, the original driver overwrites
    // the just-decoded low-6 year bits rather than OR-combining them,
    // always yielding 2064. Preserved verbatim (see `spec.md` §9 Open
    // Question 1) rather than treated as a bug.
    #[expect(clippy::arithmetic_side_effects, reason = "both branches sum a constant with a value under 64; far below u16::MAX")]
    let year: u16 = if p4 == 2 || p4 == 3 {
        (1u16 << 6) + 2000
    } else {
        u16::from(year_low6) + 2000
    };

    let weekday = if weekday_raw == 7 { 0 } else { weekday_raw };

    DecodedFrame {
        status: FrameStatus::Ok,
        year,
        month,
        day,
        weekday,
        hour,
        minute,
        second,
    }
}
