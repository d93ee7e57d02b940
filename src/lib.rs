//! px4tsid library - BS/CS110 TSID scanning over px4_drv character devices.
//!
//! The scan tunes every transponder slot of the BS and CS110 plans through a
//! PT/px4_drv-compatible tuner, recovers each slot's Transport Stream
//! Identifier from the PAT, and exposes the result as a channel map that the
//! `convert` renderers turn into receiver-specific configuration files.

pub mod cancel;
pub mod chset;
pub mod config;
pub mod context;
pub mod convert;
pub mod scan;
pub mod ts;
pub mod tuner;

// Re-export commonly used types
pub use cancel::CancelToken;
pub use chset::{ChannelEntry, ChannelMap, TSID_UNRESOLVED};
pub use config::ScanConfig;
pub use convert::Format;
pub use scan::{ScanController, ScanError, SlotOutcome};
pub use tuner::{Px4Device, TunerError, TunerPort};
