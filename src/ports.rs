//! Port contract (component A, and the emitter/log seams of G): the four
//! capabilities a caller must inject.
//!
//! Grounded in the function-pointer quartet on `bpc_handle_t`
//! (`timestamp_read`, `delay_ms`, `debug_print`, `receive_callback`).
//! Design Note "Port polymorphism" calls for a trait over raw function
//! pointers; `debug_print` takes `&str` rather than a format string plus
//! varargs, matching how the teacher crate's `TimeSyncEvent::Failed`
//! carries a plain `&'static str` rather than variadic formatting.

use crate::error::Result;
use crate::frame::DecodedFrame;
use crate::timestamp::Timestamp;

/// Capabilities the decoder needs from its environment.
///
/// All methods may be called from interrupt context and must not suspend.
/// `on_frame` in particular must only enqueue work or set a flag; it must
/// not block (`spec.md` §5).
pub trait BpcPorts {
    /// Read the current monotonic timestamp. ISR-safe, non-suspending.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ReadError`] if the underlying time source is
    /// unavailable.
    fn read_time(&mut self) -> Result<Timestamp>;

    /// Blocking millisecond delay. Used only by test harnesses layered over
    /// the decoder; the decoder itself never calls this.
    fn delay_ms(&mut self, ms: u32);

    /// Emit a diagnostic message. May be a no-op.
    fn debug_print(&mut self, msg: &str);

    /// Deliver a decoded frame (successful or not) to the consumer.
    fn on_frame(&mut self, frame: &DecodedFrame);
}
