//! px4_drv character device access.
//!
//! Talks the classic ptx ioctl set shared by the PT1/PT3/px4_drv driver
//! family. The device file is opened read-only; tuning, streaming and LNB
//! power all go through ioctls on the same fd.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::{AsRawFd, RawFd};

use log::{debug, warn};
use nix::libc::{c_int, c_ulong};
use nix::{ioctl_none, ioctl_write_int, ioctl_write_ptr};

use super::error::TunerError;
use super::TunerPort;

/// Tuning target passed to `PTX_SET_CHANNEL`.
#[repr(C)]
struct PtxFreq {
    freq_no: c_int,
    slot: c_int,
}

const PTX_IOC_MAGIC: u8 = 0x8D;

ioctl_write_ptr!(ptx_set_channel, PTX_IOC_MAGIC, 0x01, PtxFreq);
ioctl_none!(ptx_start_streaming, PTX_IOC_MAGIC, 0x02);
ioctl_none!(ptx_stop_streaming, PTX_IOC_MAGIC, 0x03);
ioctl_write_int!(ptx_enable_lnb_power, PTX_IOC_MAGIC, 0x05);
ioctl_none!(ptx_disable_lnb_power, PTX_IOC_MAGIC, 0x06);
ioctl_write_int!(ptx_set_system_mode, PTX_IOC_MAGIC, 0x0B);

const PTX_ISDB_S_SYSTEM: c_ulong = 2;
/// LNB voltage selector understood by the driver; 2 selects 15 V.
const LNB_VOLTAGE_15V: c_ulong = 2;

/// A px4_drv/PT-compatible ISDB-S tuner character device.
///
/// Streaming and LNB power are tracked so that stopping and closing stay
/// idempotent; [`Drop`] performs the same teardown as [`Px4Device::close`].
pub struct Px4Device {
    file: Option<File>,
    path: String,
    lnb_power: bool,
    lnb_powered: bool,
    streaming: bool,
}

impl Px4Device {
    /// Opens the device file read-only.
    ///
    /// `lnb_power` requests 15 V LNB power; it is switched on lazily at the
    /// first tune and off again on close.
    pub fn open(path: &str, lnb_power: bool) -> Result<Self, TunerError> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| TunerError::OpenFailed {
                path: path.to_string(),
                source,
            })?;
        debug!("opened tuner {path}");

        Ok(Self {
            file: Some(file),
            path: path.to_string(),
            lnb_power,
            lnb_powered: false,
            streaming: false,
        })
    }

    /// Stops streaming, powers the LNB down if it was enabled and closes the
    /// fd. Safe to call more than once.
    pub fn close(&mut self) {
        if self.file.is_none() {
            return;
        }

        self.stop_streaming();

        if self.lnb_powered {
            if let Some(fd) = self.raw_fd() {
                if let Err(e) = unsafe { ptx_disable_lnb_power(fd) } {
                    warn!("failed to disable LNB power: {e}");
                }
            }
            self.lnb_powered = false;
        }

        self.file = None;
        debug!("closed tuner {}", self.path);
    }

    fn raw_fd(&self) -> Option<RawFd> {
        self.file.as_ref().map(|f| f.as_raw_fd())
    }

    fn require_fd(&self) -> Result<RawFd, io::Error> {
        self.raw_fd()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotConnected))
    }
}

impl TunerPort for Px4Device {
    fn set_channel(&mut self, freq_idx: u32, slot: u32) -> Result<(), TunerError> {
        let tune_failed = |source: io::Error| TunerError::TuneFailed {
            freq_idx,
            slot,
            source,
        };
        let fd = self.require_fd().map_err(tune_failed)?;

        unsafe { ptx_set_system_mode(fd, PTX_ISDB_S_SYSTEM) }
            .map_err(|e| tune_failed(e.into()))?;

        if self.lnb_power && !self.lnb_powered {
            unsafe { ptx_enable_lnb_power(fd, LNB_VOLTAGE_15V) }
                .map_err(|e| tune_failed(e.into()))?;
            self.lnb_powered = true;
        }

        let freq = PtxFreq {
            freq_no: freq_idx as c_int,
            slot: slot as c_int,
        };
        unsafe { ptx_set_channel(fd, &freq) }.map_err(|e| tune_failed(e.into()))?;

        Ok(())
    }

    fn start_streaming(&mut self) -> Result<(), TunerError> {
        if self.streaming {
            return Ok(());
        }

        let fd = self
            .require_fd()
            .map_err(TunerError::StreamStartFailed)?;
        unsafe { ptx_start_streaming(fd) }
            .map_err(|e| TunerError::StreamStartFailed(e.into()))?;
        self.streaming = true;

        Ok(())
    }

    fn stop_streaming(&mut self) {
        if !self.streaming {
            return;
        }

        if let Some(fd) = self.raw_fd() {
            if let Err(e) = unsafe { ptx_stop_streaming(fd) } {
                warn!("failed to stop streaming: {e}");
            }
        }
        self.streaming = false;
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TunerError> {
        if !self.streaming {
            return Err(TunerError::NoData);
        }
        let Some(file) = self.file.as_mut() else {
            return Err(TunerError::NoData);
        };

        match file.read(buf) {
            Ok(n) => Ok(n),
            Err(e) => {
                debug!("tuner read failed: {e}");
                Err(TunerError::NoData)
            }
        }
    }
}

impl Drop for Px4Device {
    fn drop(&mut self) {
        self.close();
    }
}
