//! Nominal protocol constants, in microseconds unless noted.
//!
//! Mirrors the `#define`s at the top of the original C driver
//! (`BPC_CHECK_START_FRAME_MIN`, `BPC_CHECK_DATA_0..3`, etc). These are the
//! *defaults* baked into [`crate::config::DecoderConfig`]; runtime tuning
//! goes through that struct, not these constants directly.

/// Low-pulse widths for the four two-bit data symbols (0/1/2/3).
pub const DATA_NOMINALS_US: [u32; 4] = [100_000, 200_000, 300_000, 400_000];

/// One full symbol period: low width plus high width.
pub const FRAME_TIME_US: u32 = 1_000_000;

/// Minimum nominal width of the start-of-minute low pulse.
pub const START_MIN_US: u32 = 1_600_000;

/// Maximum nominal width of the start-of-minute low pulse.
pub const START_MAX_US: u32 = 1_900_000;

/// Tolerance applied to single- and paired-edge data symbol comparisons.
pub const MAX_RANGE: f32 = 0.20;

/// Tolerance applied to the start-pulse window.
pub const MAX_START_RANGE: f32 = 0.20;

/// Capacity of the edge buffer; exceeding this forces a hard reset.
pub const BUFFER_CAPACITY: usize = 76;

/// Minimum buffered edge count before a decode attempt is considered.
pub const MIN_DECODE_LEN: usize = 38;

/// Silence gap, in microseconds, that forces a watchdog reset.
pub const WATCHDOG_GAP_US: i64 = 3_000_000;

/// Number of data symbols following the start pulse.
pub const SYMBOL_COUNT: usize = 19;
