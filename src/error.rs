//! Handle-level error type for the BPC decoder.
//!
//! Per-frame decode outcomes (parity failures, framing failures) are *not*
//! represented here — those are values of [`crate::frame::FrameStatus`],
//! reported through the frame callback rather than as a `Result`. This type
//! only covers the handle-level failures `init`/`deinit`/`irq_handler` can
//! return.

use derive_more::derive::{Display, Error, From};

/// A specialized `Result` where the error is this crate's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for handle-level operations.
#[derive(Debug, Display, Error, From)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The injected [`crate::ports::BpcPorts::read_time`] reported a read
    /// failure.
    #[display("timestamp read failed")]
    ReadError,

    /// An operation was invoked on a handle that was never initialized, or
    /// was already deinitialized.
    #[display("handle is not initialized")]
    NotInited,

    /// A background task could not be spawned (the executor's task pool is
    /// exhausted). The core decode path itself never fails this way —
    /// framing/parity failures are reported as a [`crate::frame::FrameStatus`],
    /// not an `Error`.
    #[display("irq handler run failed")]
    RunFail,
}
