//! Lifecycle & watchdog (component H) and frame emission (component G):
//! the owned handle tying every other component together.
//!
//! Grounded in `bpc_handle_t` and `bpc_init`/`bpc_deinit`/`bpc_irq_handler`
//! in the original driver. Design Note "Global handle and callback": unlike
//! the source, which keeps the handle in module-level storage, `BpcHandle`
//! is an explicit owned value with no process-wide state of its own — the
//! optional `embassy_gpio` shim is the only place that touches `'static`
//! storage.

use crate::buffer::EdgeBuffer;
use crate::config::DecoderConfig;
use crate::constants::BUFFER_CAPACITY;
use crate::error::{Error, Result};
use crate::ports::BpcPorts;
use crate::reassembler;
use crate::sync::SyncState;
use crate::timestamp::{EdgeSample, Timestamp};

/// The decoder: owned edge buffer, synchronisation state, and an injected
/// port set.
///
/// `irq_handler` is the sole entry point mutating this state, and is safe
/// to call from interrupt context: it allocates nothing, never suspends,
/// and `&mut self` gives it exclusive access without a runtime lock.
pub struct BpcHandle<P: BpcPorts> {
    ports: P,
    config: DecoderConfig,
    buffer: EdgeBuffer,
    sync: SyncState,
    last_time: Timestamp,
    inited: bool,
}

impl<P: BpcPorts> BpcHandle<P> {
    /// Construct a handle with the nominal protocol tolerances. Call
    /// [`Self::init`] before the first `irq_handler` invocation.
    #[must_use]
    pub fn new(ports: P) -> Self {
        Self::with_config(ports, DecoderConfig::default())
    }

    /// Construct a handle with caller-supplied tolerances (`spec.md`
    /// §2.3 AMBIENT Configuration).
    #[must_use]
    pub fn with_config(ports: P, config: DecoderConfig) -> Self {
        Self {
            ports,
            config,
            buffer: EdgeBuffer::new(),
            sync: SyncState::default(),
            last_time: Timestamp::default(),
            inited: false,
        }
    }

    /// Seed `last_time` from the current timestamp, clear all decode state,
    /// and mark the handle ready for `irq_handler`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadError`] if the initial timestamp read fails.
    pub fn init(&mut self) -> Result<()> {
        let Ok(t) = self.ports.read_time() else {
            self.ports.debug_print("bpc: timestamp read failed");
            return Err(Error::ReadError);
        };
        self.last_time = t;
        self.buffer.clear();
        self.sync = SyncState::default();
        self.inited = true;
        Ok(())
    }

    /// Mark the handle uninitialised. Idempotent failures surface as
    /// [`Error::NotInited`] rather than panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInited`] if the handle was never initialised.
    pub fn deinit(&mut self) -> Result<()> {
        if !self.inited {
            return Err(Error::NotInited);
        }
        self.inited = false;
        Ok(())
    }

    /// Whether the handle is currently initialised.
    #[must_use]
    pub fn is_inited(&self) -> bool {
        self.inited
    }

    /// The edge-interrupt entry point: reads the current timestamp, applies
    /// the watchdog, appends the edge, and advances synchronisation or
    /// decoding as far as the buffered edges allow.
    ///
    /// Call from the rising- *and* falling-edge interrupt; every transition
    /// is treated identically.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInited`] if called before `init`, or
    /// [`Error::ReadError`] if the timestamp port fails.
    pub fn irq_handler(&mut self) -> Result<()> {
        if !self.inited {
            return Err(Error::NotInited);
        }
        let Ok(t) = self.ports.read_time() else {
            self.ports.debug_print("bpc: timestamp read failed");
            return Err(Error::ReadError);
        };

        let gap = t.diff_micros(self.last_time);
        if gap >= self.config.watchdog_gap_us || self.buffer.len() >= BUFFER_CAPACITY {
            self.reset_decode();
        }

        self.buffer.push(EdgeSample::new(t));

        if self.sync.trace_valid {
            let cleared = self.sync.trace_continue(gap, &self.config);
            if cleared {
                self.buffer.clear();
            }
        }

        let decodable_len = self.buffer.len().saturating_sub(usize::from(self.sync.decode_offset));
        if decodable_len >= self.config.min_decode_len {
            if self.sync.decode_valid {
                self.run_decode();
            } else {
                self.buffer.fill_diffs();
                self.sync.cold_search(&self.buffer, &self.config);
            }
        }

        self.last_time = t;
        Ok(())
    }

    fn reset_decode(&mut self) {
        self.buffer.clear();
        self.sync = SyncState::default();
    }

    fn run_decode(&mut self) {
        self.buffer.fill_diffs();
        let frame = reassembler::decode(&self.buffer, self.sync.decode_offset, &self.config);
        let status = frame.status;
        self.ports.on_frame(&frame);

        self.buffer.clear();
        self.sync.decode_offset = 0;
        self.sync.decode_valid = false;
        self.sync.trace_valid = status == crate::frame::FrameStatus::Ok;
    }
}
