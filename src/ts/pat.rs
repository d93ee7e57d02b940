//! TSID recovery from PAT-bearing TS packets.

use super::PAT_PID;

/// Extracts the Transport Stream Identifier from aligned TS packets.
///
/// Only an unfragmented PAT is considered: the packet must start a payload
/// unit on PID 0 with no adaptation field and a zero pointer field, so the
/// section header sits at a fixed offset and the TSID can be read without
/// reassembling sections across packets. Transport-errored packets are
/// tallied and otherwise ignored; the tally is the only state kept across
/// packets and is reset per read batch.
#[derive(Debug, Default)]
pub struct PatExtractor {
    error_packets: u32,
}

impl PatExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the transport-error tally for a new read batch.
    pub fn reset(&mut self) {
        self.error_packets = 0;
    }

    /// Examines one aligned 188-byte packet.
    ///
    /// Returns the TSID when the packet carries an unfragmented PAT section
    /// header, `None` otherwise.
    pub fn examine(&mut self, packet: &[u8]) -> Option<u16> {
        let transport_error = packet[1] & 0x80 != 0;
        let payload_unit_start = packet[1] & 0x40 != 0;
        let pid = (packet[1] as u16 & 0x1F) << 8 | packet[2] as u16;
        let adaptation_field = packet[3] & 0x20 != 0;
        let pointer_field = packet[4];

        if transport_error {
            self.error_packets += 1;
            return None;
        }

        if payload_unit_start && pid == PAT_PID && !adaptation_field && pointer_field == 0 {
            // transport_stream_id of the section header, right after the
            // table_id and section_length bytes.
            return Some((packet[8] as u16) << 8 | packet[9] as u16);
        }

        None
    }

    /// Transport-errored packets seen since the last reset.
    pub fn error_packets(&self) -> u32 {
        self.error_packets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::{SYNC_BYTE, TS_PACKET_SIZE};

    fn pat_packet(tsid: u16) -> [u8; TS_PACKET_SIZE] {
        let mut p = [0xFF_u8; TS_PACKET_SIZE];
        p[0] = SYNC_BYTE;
        p[1] = 0x40; // payload_unit_start, PID 0x0000
        p[2] = 0x00;
        p[3] = 0x10; // payload only, no adaptation field
        p[4] = 0x00; // pointer_field
        p[5] = 0x00; // table_id: PAT
        p[6] = 0xB0; // section_syntax_indicator + section_length
        p[7] = 0x0D;
        p[8] = (tsid >> 8) as u8;
        p[9] = tsid as u8;
        p
    }

    #[test]
    fn test_extracts_tsid() {
        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&pat_packet(0x1234)), Some(0x1234));
        assert_eq!(extractor.error_packets(), 0);
    }

    #[test]
    fn test_transport_error_counts_and_suppresses() {
        let mut packet = pat_packet(0x1234);
        packet[1] |= 0x80;

        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&packet), None);
        assert_eq!(extractor.error_packets(), 1);
    }

    #[test]
    fn test_non_pat_pid_is_ignored() {
        let mut packet = pat_packet(0x1234);
        packet[2] = 0x11;

        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&packet), None);
    }

    #[test]
    fn test_requires_payload_unit_start() {
        let mut packet = pat_packet(0x1234);
        packet[1] = 0x00;

        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&packet), None);
    }

    #[test]
    fn test_adaptation_field_suppresses() {
        let mut packet = pat_packet(0x1234);
        packet[3] = 0x30;

        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&packet), None);
    }

    #[test]
    fn test_fragmented_section_is_skipped() {
        let mut packet = pat_packet(0x1234);
        packet[4] = 0x05;

        let mut extractor = PatExtractor::new();
        assert_eq!(extractor.examine(&packet), None);
    }

    #[test]
    fn test_reset_clears_tally() {
        let mut packet = pat_packet(0x1234);
        packet[1] |= 0x80;

        let mut extractor = PatExtractor::new();
        extractor.examine(&packet);
        extractor.examine(&packet);
        assert_eq!(extractor.error_packets(), 2);

        extractor.reset();
        assert_eq!(extractor.error_packets(), 0);
    }
}
