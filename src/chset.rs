//! Scanned channel map model.

use serde::Serialize;

/// Local-oscillator offset between the RF and IF frequency, in kHz.
pub const IF_OFFSET_KHZ: u32 = 10_678_000;

/// Slot value meaning "no TSID was recovered".
///
/// A multiplex genuinely using TSID 0xFFFF is indistinguishable from an
/// unresolved slot; accepted limitation of the slot array.
pub const TSID_UNRESOLVED: u16 = 0xFFFF;

/// One transponder candidate and its recovered TSID slots.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelEntry {
    transponder: String,
    number: u32,
    frequency_idx: u32,
    frequency_khz: u32,
    frequency_if_khz: u32,
    has_lock: bool,
    #[serde(rename = "transport_stream_id")]
    tsids: Vec<u16>,
}

impl ChannelEntry {
    /// Creates an entry with `slot_count` unresolved TSID slots. The slot
    /// count never changes afterwards.
    pub fn new(transponder: String, number: u32, frequency_idx: u32, slot_count: usize) -> Self {
        Self {
            transponder,
            number,
            frequency_idx,
            frequency_khz: 0,
            frequency_if_khz: 0,
            has_lock: false,
            tsids: vec![TSID_UNRESOLVED; slot_count],
        }
    }

    /// Transponder label, e.g. `BS1` or `ND2`.
    pub fn transponder(&self) -> &str {
        &self.transponder
    }

    /// Transponder ordinal within its band.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Band-relative channel index passed to the tuner.
    pub fn frequency_idx(&self) -> u32 {
        self.frequency_idx
    }

    /// Nominal RF frequency in kHz.
    pub fn frequency_khz(&self) -> u32 {
        self.frequency_khz
    }

    /// IF frequency after LNB downconversion; always derived from the RF
    /// value, never stored independently.
    pub fn frequency_if_khz(&self) -> u32 {
        self.frequency_if_khz
    }

    /// Whether the tuner reported lock for this transponder.
    pub fn has_lock(&self) -> bool {
        self.has_lock
    }

    /// All TSID slots, in slot order.
    pub fn tsids(&self) -> &[u16] {
        &self.tsids
    }

    /// TSID of one slot; out-of-range slots read as unresolved.
    pub fn tsid(&self, slot: usize) -> u16 {
        self.tsids.get(slot).copied().unwrap_or(TSID_UNRESOLVED)
    }

    /// Sets the RF frequency and recomputes the IF frequency.
    pub fn set_frequency_khz(&mut self, khz: u32) {
        self.frequency_khz = khz;
        self.frequency_if_khz = khz - IF_OFFSET_KHZ;
    }

    /// Records tuner-level lock; independent of TSID recovery.
    pub fn set_lock(&mut self) {
        self.has_lock = true;
    }

    /// Writes a recovered TSID into `slot`. First writer wins: a value
    /// already present anywhere in the slot array is dropped, so a transient
    /// mistune cannot duplicate one TSID across slots. The unresolved
    /// sentinel is never written.
    pub fn set_tsid(&mut self, slot: usize, tsid: u16) {
        if tsid == TSID_UNRESOLVED || self.tsids.contains(&tsid) {
            return;
        }
        if let Some(value) = self.tsids.get_mut(slot) {
            *value = tsid;
        }
    }
}

/// Scan result: the BS and CS entry collections, in scan order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelMap {
    #[serde(rename = "BS")]
    pub bs: Vec<ChannelEntry>,
    #[serde(rename = "CS")]
    pub cs: Vec<ChannelEntry>,
}
