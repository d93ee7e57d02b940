//! Stub device for platforms without px4_drv character devices.

use super::error::TunerError;
use super::TunerPort;

pub struct Px4Device {
    _private: (),
}

impl Px4Device {
    pub fn open(_path: &str, _lnb_power: bool) -> Result<Self, TunerError> {
        Err(TunerError::Unsupported)
    }

    pub fn close(&mut self) {}
}

impl TunerPort for Px4Device {
    fn set_channel(&mut self, _freq_idx: u32, _slot: u32) -> Result<(), TunerError> {
        Err(TunerError::Unsupported)
    }

    fn start_streaming(&mut self) -> Result<(), TunerError> {
        Err(TunerError::Unsupported)
    }

    fn stop_streaming(&mut self) {}

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, TunerError> {
        Err(TunerError::Unsupported)
    }
}
