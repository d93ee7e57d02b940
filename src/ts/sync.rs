//! Byte-stream realignment to TS packet boundaries.

use super::{SYNC_BYTE, TS_PACKET_SIZE};

/// Realigns an arbitrarily-chunked byte stream to 188-byte TS packets.
///
/// Device reads are not packet-aligned, so the synchronizer keeps the
/// unconsumed tail of each chunk and prepends it to the next one. A position
/// is accepted as a packet start only when the sync byte repeats exactly one
/// packet later; anything before the first such position is discarded one
/// byte at a time.
#[derive(Debug, Default)]
pub struct StreamSynchronizer {
    rest: Vec<u8>,
}

impl StreamSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops bytes carried over from a previous tuning attempt.
    pub fn reset(&mut self) {
        self.rest.clear();
    }

    /// Appends `chunk` to the carried-over remainder and emits every aligned
    /// packet through `on_packet`.
    ///
    /// The trailing bytes that cannot yet be pair-verified (at most one
    /// packet's worth) are retained for the next call.
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_packet: F)
    where
        F: FnMut(&[u8]),
    {
        self.rest.extend_from_slice(chunk);

        let mut pos = 0;
        while pos + TS_PACKET_SIZE < self.rest.len() {
            if self.rest[pos] != SYNC_BYTE || self.rest[pos + TS_PACKET_SIZE] != SYNC_BYTE {
                pos += 1;
                continue;
            }
            on_packet(&self.rest[pos..pos + TS_PACKET_SIZE]);
            pos += TS_PACKET_SIZE;
        }
        self.rest.drain(..pos);
    }

    /// Bytes currently carried over to the next feed.
    pub fn pending(&self) -> usize {
        self.rest.len()
    }
}
