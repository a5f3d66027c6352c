//! Edge-interrupt integration shim (`spec.md` §5.1 SUPPLEMENT), behind the
//! `embassy` cargo feature.
//!
//! Modeled directly on the teacher crate's `TimeSync`/`ir::Ir` device
//! pattern: a `new_static()`/`new()` pair puts every `'static` resource
//! (channel, handle storage) in one place a caller declares as a `static`,
//! and a background task forwards decoded frames through a channel. Unlike
//! the core [`BpcHandle`], this module owns `'static` state — it is the
//! single piece of the crate Design Note "Global handle and callback" asks
//! to isolate that way.
//!
//! `#[embassy_executor::task]` does not support generic functions (the
//! teacher crate's `led2d.rs` documents the same restriction for
//! `Led2d`'s own background task), so the task itself cannot be generic
//! over `PIN`/`P` the way [`BpcReceiver::build`] is. [`bpc_receiver_device!`]
//! generates one concrete, monomorphic task per call site and delegates its
//! body to [`edge_loop`], the ordinary (non-task) generic async function
//! that does the real work.

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel as EmbassyChannel;
use embassy_time::Instant;
use embedded_hal_async::digital::Wait;
use static_cell::StaticCell;

use crate::error::{Error, Result};
use crate::frame::DecodedFrame;
use crate::handle::BpcHandle;
use crate::ports::BpcPorts;
use crate::timestamp::Timestamp;

/// Channel type used to forward decoded frames out of the edge task.
pub type FrameNotifier = EmbassyChannel<CriticalSectionRawMutex, DecodedFrame, 4>;

/// Resources needed to construct a [`BpcReceiver`]; declare one as a
/// `static` at the call site (see [`BpcReceiver::new_static`]).
pub struct BpcReceiverStatic {
    notifier: FrameNotifier,
    receiver_cell: StaticCell<BpcReceiver>,
}

/// A running BPC receiver bound to a GPIO edge source.
pub struct BpcReceiver {
    notifier: &'static FrameNotifier,
}

impl BpcReceiver {
    /// Reserve the `'static` storage a [`BpcReceiver`] needs.
    #[must_use]
    pub const fn new_static() -> BpcReceiverStatic {
        BpcReceiverStatic {
            notifier: EmbassyChannel::new(),
            receiver_cell: StaticCell::new(),
        }
    }

    /// Build and initialise the handle an edge task will drive.
    ///
    /// `ports` still supplies `delay_ms`/`debug_print`/`on_frame`; the
    /// returned handle overrides `read_time` with [`embassy_time::Instant`]
    /// and also forwards every emitted frame into `receiver_static`'s
    /// channel. Call sites don't call this directly — [`bpc_receiver_device!`]
    /// does, immediately before spawning the task that drives the handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadError`] if the initial timestamp read fails.
    pub fn build<P>(
        receiver_static: &'static BpcReceiverStatic,
        ports: P,
    ) -> Result<BpcHandle<ForwardingPorts<P>>>
    where
        P: BpcPorts + 'static,
    {
        let forwarding_ports = ForwardingPorts {
            inner: ports,
            notifier: &receiver_static.notifier,
        };
        let mut handle = BpcHandle::new(forwarding_ports);
        handle.init()?;
        Ok(handle)
    }

    /// Publish the running receiver handle, once its task has been spawned.
    #[must_use]
    pub fn publish(receiver_static: &'static BpcReceiverStatic) -> &'static Self {
        receiver_static.receiver_cell.init(Self {
            notifier: &receiver_static.notifier,
        })
    }

    /// Await the next decoded frame (OK or failed).
    pub async fn wait(&self) -> DecodedFrame {
        self.notifier.receive().await
    }
}

/// Wraps a caller's [`BpcPorts`] so `on_frame` also forwards into the
/// receiver's channel, and `read_time` uses [`embassy_time::Instant`]
/// instead of the caller's own clock.
pub struct ForwardingPorts<P> {
    inner: P,
    notifier: &'static FrameNotifier,
}

impl<P: BpcPorts> BpcPorts for ForwardingPorts<P> {
    fn read_time(&mut self) -> Result<Timestamp> {
        let now = Instant::now();
        Ok(Timestamp::new(now.as_secs(), (now.as_micros() % 1_000_000) as u32))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }

    fn debug_print(&mut self, msg: &str) {
        self.inner.debug_print(msg);
        defmt::debug!("{}", msg);
    }

    fn on_frame(&mut self, frame: &DecodedFrame) {
        self.inner.on_frame(frame);
        let _ = self.notifier.try_send(*frame);
    }
}

/// The edge-driven decode loop: waits for a transition on `pin`, then feeds
/// it to `handle`. Forever. Generic over `PIN`/`P`, so it cannot itself be
/// an `#[embassy_executor::task]` — [`bpc_receiver_task!`] wraps one
/// monomorphic instantiation of this per caller.
pub async fn edge_loop<PIN, P>(mut pin: PIN, mut handle: BpcHandle<ForwardingPorts<P>>) -> !
where
    PIN: Wait + 'static,
    P: BpcPorts + 'static,
{
    loop {
        let _ = pin.wait_for_any_edge().await;
        let _ = handle.irq_handler();
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! bpc_receiver_task {
    ($task_name:ident, $pin_ty:ty, $ports_ty:ty $(,)?) => {
        #[embassy_executor::task]
        async fn $task_name(
            pin: $pin_ty,
            handle: $crate::handle::BpcHandle<$crate::embassy_gpio::ForwardingPorts<$ports_ty>>,
        ) -> ! {
            $crate::embassy_gpio::edge_loop(pin, handle).await
        }
    };
}

/// Declares an Embassy task that runs [`edge_loop`] for one concrete
/// `(PIN, ports)` pairing.
///
/// Each receiver needs a monomorphic task because `#[embassy_executor::task]`
/// does not support generics.
#[doc(inline)]
pub use bpc_receiver_task;

#[doc(hidden)]
#[macro_export]
macro_rules! bpc_receiver_device {
    (
        $vis:vis struct $resources_name:ident,
        task: $task_vis:vis $task_name:ident,
        pin: $pin_ty:ty,
        ports: $ports_ty:ty $(,)?
    ) => {
        $crate::bpc_receiver_task!($task_name, $pin_ty, $ports_ty);

        $vis struct $resources_name {
            receiver_static: $crate::embassy_gpio::BpcReceiverStatic,
        }

        impl $resources_name {
            /// Create the static resources for this receiver instance.
            #[must_use]
            pub const fn new_static() -> Self {
                Self {
                    receiver_static: $crate::embassy_gpio::BpcReceiver::new_static(),
                }
            }

            /// Build the handle, spawn its background task, and return the
            /// running receiver.
            ///
            /// # Errors
            ///
            /// Returns [`$crate::Error::ReadError`] if the initial timestamp
            /// read fails, or [`$crate::Error::RunFail`] if the task cannot
            /// be spawned.
            pub fn new(
                &'static self,
                pin: $pin_ty,
                ports: $ports_ty,
                spawner: ::embassy_executor::Spawner,
            ) -> $crate::Result<&'static $crate::embassy_gpio::BpcReceiver> {
                let handle = $crate::embassy_gpio::BpcReceiver::build(&self.receiver_static, ports)?;
                spawner
                    .spawn($task_name(pin, handle))
                    .map_err(|_| $crate::Error::RunFail)?;
                Ok($crate::embassy_gpio::BpcReceiver::publish(&self.receiver_static))
            }
        }
    };
}

/// Declares the full receiver device/static pair plus the background task
/// wrapper, the way [`bpc_receiver_task!`] alone only declares the task.
///
/// # Example
///
/// ```ignore
/// bpc_receiver_device! {
///     pub struct ClockReceiver,
///     task: clock_receiver_task,
///     pin: embassy_rp::gpio::Input<'static>,
///     ports: MyPorts,
/// }
/// ```
#[doc(inline)]
pub use bpc_receiver_device;
