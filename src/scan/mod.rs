//! BS/CS110 transponder scan loop.
//!
//! The controller owns the tuner for the whole run. Each (transponder, slot)
//! pair goes through the same sequence: tune, start streaming (which marks
//! the transponder locked), then read and realign the stream until a usable
//! TSID turns up or the retry budget runs out. Tuner failures are downgraded
//! to a per-slot outcome so one dead transponder never kills the run; only
//! the stop signal does.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::chset::{ChannelEntry, ChannelMap, TSID_UNRESOLVED};
use crate::config::{ScanConfig, READ_BUFFER_SIZE};
use crate::ts::{PatExtractor, StreamSynchronizer};
use crate::tuner::TunerPort;

/// Wait between retries after a read that produced no data.
const EMPTY_READ_BACKOFF: Duration = Duration::from_millis(100);

/// Run-level scan failures. Per-slot failures are [`SlotOutcome`]s instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("scan cancelled by stop signal")]
    Cancelled,
}

/// Terminal state of one (transponder, slot) attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// A usable TSID was recovered and recorded.
    Locked(u16),
    /// The retry budget ran out; the slot keeps its unresolved sentinel.
    TimedOut,
    /// Tuning or stream start failed; the slot is skipped.
    Failed,
    /// The stop signal was observed mid-slot.
    Cancelled,
}

/// Drives the scan across both bands through one exclusively-owned tuner.
pub struct ScanController<T: TunerPort> {
    config: ScanConfig,
    tuner: T,
    cancel: CancelToken,
    sync: StreamSynchronizer,
    extractor: PatExtractor,
    read_buf: Vec<u8>,
}

impl<T: TunerPort> ScanController<T> {
    pub fn new(config: ScanConfig, tuner: T, cancel: CancelToken) -> Self {
        Self {
            config,
            tuner,
            cancel,
            sync: StreamSynchronizer::new(),
            extractor: PatExtractor::new(),
            read_buf: vec![0; READ_BUFFER_SIZE],
        }
    }

    /// Scans the BS band, then CS110.
    ///
    /// On cancellation streaming is stopped before the error is returned;
    /// the device itself closes when the controller (and its tuner) drops.
    pub fn run(mut self) -> Result<ChannelMap, ScanError> {
        let result = self.scan_all();
        if result.is_err() {
            self.tuner.stop_streaming();
        }
        result
    }

    fn scan_all(&mut self) -> Result<ChannelMap, ScanError> {
        let bs = self.scan_entries(bs_entries(&self.config))?;
        let cs = self.scan_entries(cs_entries(&self.config))?;
        Ok(ChannelMap { bs, cs })
    }

    fn scan_entries(
        &mut self,
        mut entries: Vec<ChannelEntry>,
    ) -> Result<Vec<ChannelEntry>, ScanError> {
        for entry in &mut entries {
            if self.cancel.is_cancelled() {
                return Err(ScanError::Cancelled);
            }

            for slot in 0..entry.tsids().len() {
                if self.cancel.is_cancelled() {
                    return Err(ScanError::Cancelled);
                }

                match self.scan_slot(entry, slot) {
                    SlotOutcome::Locked(tsid) => info!(
                        "{}/TS{}: frequency {} kHz (IF {} kHz): locked: TSID {}",
                        entry.transponder(),
                        slot,
                        entry.frequency_khz(),
                        entry.frequency_if_khz(),
                        tsid
                    ),
                    SlotOutcome::TimedOut => info!(
                        "{}/TS{}: frequency {} kHz (IF {} kHz): locked: no TSID",
                        entry.transponder(),
                        slot,
                        entry.frequency_khz(),
                        entry.frequency_if_khz()
                    ),
                    // Already logged with the tuner error at the failure site.
                    SlotOutcome::Failed => {}
                    SlotOutcome::Cancelled => return Err(ScanError::Cancelled),
                }
            }
        }

        Ok(entries)
    }

    /// One pass of the per-slot state machine; every exit path leaves
    /// streaming stopped.
    fn scan_slot(&mut self, entry: &mut ChannelEntry, slot: usize) -> SlotOutcome {
        self.sync.reset();

        if let Err(e) = self.tuner.set_channel(entry.frequency_idx(), slot as u32) {
            warn!("{}/TS{}: {e}", entry.transponder(), slot);
            self.tuner.stop_streaming();
            return SlotOutcome::Failed;
        }

        if let Err(e) = self.tuner.start_streaming() {
            warn!("{}/TS{}: {e}", entry.transponder(), slot);
            self.tuner.stop_streaming();
            return SlotOutcome::Failed;
        }

        // Lock is an RF-level fact; it holds whether or not a TSID follows.
        entry.set_lock();

        for _ in 0..self.config.retry_budget() {
            if self.cancel.is_cancelled() {
                self.tuner.stop_streaming();
                return SlotOutcome::Cancelled;
            }

            let len = self.tuner.read(&mut self.read_buf).unwrap_or(0);
            if len == 0 {
                thread::sleep(EMPTY_READ_BACKOFF);
                continue;
            }

            let mut recovered = None;
            {
                let Self {
                    sync,
                    extractor,
                    read_buf,
                    ..
                } = &mut *self;
                extractor.reset();
                sync.feed(&read_buf[..len], |packet| {
                    if let Some(tsid) = extractor.examine(packet) {
                        recovered = Some(tsid);
                    }
                });
            }
            if self.extractor.error_packets() > 0 {
                debug!(
                    "{}/TS{}: {} transport-errored packets in batch",
                    entry.transponder(),
                    slot,
                    self.extractor.error_packets()
                );
            }

            match recovered {
                Some(tsid) if tsid != TSID_UNRESOLVED && !self.config.is_ignored(tsid) => {
                    entry.set_tsid(slot, tsid);
                    self.tuner.stop_streaming();
                    return SlotOutcome::Locked(tsid);
                }
                Some(tsid) => debug!(
                    "{}/TS{}: discarding TSID {tsid:#06x}",
                    entry.transponder(),
                    slot
                ),
                None => {}
            }
        }

        self.tuner.stop_streaming();
        SlotOutcome::TimedOut
    }
}

/// BS plan: transponders BS1, BS3, ... at 38.36 MHz spacing, `slot_count`
/// TSID slots each.
fn bs_entries(config: &ScanConfig) -> Vec<ChannelEntry> {
    (0..config.bs.transponder_count)
        .map(|idx| {
            let number = 2 * idx as u32 + 1;
            let mut entry = ChannelEntry::new(
                format!("BS{number}"),
                number,
                idx as u32,
                config.slot_count(),
            );
            entry.set_frequency_khz(config.bs.base_frequency_khz + config.bs.step_khz * idx as u32);
            entry
        })
        .collect()
}

/// CS110 plan: transponders ND2, ND4, ... one slot each; the tuner's
/// frequency index space continues after the BS transponders.
fn cs_entries(config: &ScanConfig) -> Vec<ChannelEntry> {
    (0..config.cs.transponder_count)
        .map(|idx| {
            let number = 2 * (idx as u32 + 1);
            let mut entry = ChannelEntry::new(
                format!("ND{number}"),
                number,
                (idx + config.bs.transponder_count) as u32,
                1,
            );
            entry.set_frequency_khz(config.cs.base_frequency_khz + config.cs.step_khz * idx as u32);
            entry
        })
        .collect()
}
