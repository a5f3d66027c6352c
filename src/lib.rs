//! Edge-interval decoder for the BPC long-wave time-code broadcast.
//!
//! Reconstructs civil time (year, month, day, weekday, hour, minute,
//! second) from timestamped GPIO edges produced by a BPC receiver front
//! end. The core ([`handle::BpcHandle`]) is a pure, owned transducer: it
//! allocates nothing, never suspends, and is driven entirely by
//! [`handle::BpcHandle::irq_handler`] calls from an edge interrupt. Board
//! bring-up, a CLI shell, and a blocking "wait for a frame" test harness are
//! external collaborators this crate does not implement — see
//! [`ports::BpcPorts`] for the seam they plug into.
#![no_std]

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod constants;
#[cfg(feature = "embassy")]
pub mod embassy_gpio;
mod error;
pub mod frame;
pub mod handle;
pub mod info;
pub mod parity;
pub mod ports;
pub mod reassembler;
pub mod sync;
pub mod timestamp;

pub use error::{Error, Result};
pub use handle::BpcHandle;
