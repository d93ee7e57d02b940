//! Tuner device access.
//!
//! The scan drives the device through the [`TunerPort`] trait; the real
//! px4_drv character device lives in the Linux module, and other platforms
//! get a stub whose constructor fails.

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
pub use self::linux::Px4Device;
#[cfg(not(target_os = "linux"))]
pub use self::unsupported::Px4Device;

mod error;

pub use error::TunerError;

/// Runtime operations of an ISDB-S tuner.
///
/// Opening is the implementor's constructor; closing is its `Drop` (plus an
/// explicit, idempotent `close` where early teardown matters). The scan
/// controller owns the port exclusively for the duration of a run.
pub trait TunerPort {
    /// Tunes to a (frequency index, slot index) pair.
    fn set_channel(&mut self, freq_idx: u32, slot: u32) -> Result<(), TunerError>;

    /// Starts streaming; calling while already streaming is a no-op.
    fn start_streaming(&mut self) -> Result<(), TunerError>;

    /// Stops streaming; idempotent and best-effort.
    fn stop_streaming(&mut self);

    /// Blocking read of raw stream bytes into `buf`.
    ///
    /// Returns the number of bytes read; [`TunerError::NoData`] when the
    /// device has nothing to deliver (recoverable with a retry).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TunerError>;
}
