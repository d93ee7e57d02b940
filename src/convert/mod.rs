//! Channel map renderers.
//!
//! Each renderer walks the map in scan order (BS, then CS110), skips
//! transponders without lock and slots still holding the unresolved
//! sentinel, and produces the destination's text verbatim.

mod bondriver;
mod dvbv5;
mod mirakurun;

use serde::Serialize;

use crate::chset::ChannelMap;

/// Selectable output formats.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum Format {
    /// Scan result as pretty-printed JSON.
    #[default]
    Json,
    /// libdvbv5 channel file with IF frequencies.
    Dvbv5,
    /// libdvbv5 channel file with RF frequencies and an LNB setting.
    Dvbv5lnb,
    /// BonDriver_DVB channel set (TSID column in hex).
    Bondvb,
    /// BonDriver_PT channel set.
    Bonpt,
    /// BonDriver_PTx channel INI.
    Bonptx,
    /// BonDriver_PX4 channel set.
    Bonpx4,
    /// Mirakurun channels.yml items.
    Mirakurun,
}

impl Format {
    /// Renders `map` into this format's text.
    ///
    /// Only the JSON serializer can fail; the templated formats are
    /// infallible.
    pub fn render(self, map: &ChannelMap) -> Result<String, serde_json::Error> {
        Ok(match self {
            Format::Json => json(map)?,
            Format::Dvbv5 => dvbv5::render(map, false),
            Format::Dvbv5lnb => dvbv5::render(map, true),
            Format::Bondvb => bondriver::dvb(map),
            Format::Bonpt => bondriver::pt(map),
            Format::Bonptx => bondriver::ptx(map),
            Format::Bonpx4 => bondriver::px4(map),
            Format::Mirakurun => mirakurun::render(map),
        })
    }
}

fn json(map: &ChannelMap) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chset::ChannelEntry;

    /// BS1 with two resolved slots, BS3 locked but empty, BS5 unlocked;
    /// ND2 resolved, ND4 locked but empty.
    fn fixture() -> ChannelMap {
        let mut bs1 = ChannelEntry::new("BS1".to_string(), 1, 0, 4);
        bs1.set_frequency_khz(11_727_480);
        bs1.set_lock();
        bs1.set_tsid(0, 0x4010);
        bs1.set_tsid(1, 0x4011);

        let mut bs3 = ChannelEntry::new("BS3".to_string(), 3, 1, 4);
        bs3.set_frequency_khz(11_765_840);
        bs3.set_lock();

        let mut bs5 = ChannelEntry::new("BS5".to_string(), 5, 2, 4);
        bs5.set_frequency_khz(11_804_200);
        bs5.set_tsid(0, 0x4012);

        let mut nd2 = ChannelEntry::new("ND2".to_string(), 2, 12, 1);
        nd2.set_frequency_khz(12_291_000);
        nd2.set_lock();
        nd2.set_tsid(0, 0x6020);

        let mut nd4 = ChannelEntry::new("ND4".to_string(), 4, 13, 1);
        nd4.set_frequency_khz(12_331_000);
        nd4.set_lock();

        ChannelMap {
            bs: vec![bs1, bs3, bs5],
            cs: vec![nd2, nd4],
        }
    }

    #[test]
    fn test_json_round_trips() {
        let rendered = Format::Json.render(&fixture()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["BS"].as_array().unwrap().len(), 3);
        assert_eq!(value["BS"][0]["transponder"], "BS1");
        assert_eq!(value["BS"][0]["transport_stream_id"][0], 0x4010);
        assert_eq!(value["CS"][0]["frequency_if_khz"], 1_613_000);
        // 4-space indentation as in the original dump.
        assert!(rendered.contains("\n    \"BS\""));
    }

    #[test]
    fn test_dvbv5_sections() {
        let rendered = Format::Dvbv5.render(&fixture()).unwrap();

        assert_eq!(
            rendered,
            "[BS01_0]\n\
             \tDELIVERY_SYSTEM = ISDBS\n\
             \tFREQUENCY = 1049480\n\
             \tSTREAM_ID = 16400\n\
             [BS01_1]\n\
             \tDELIVERY_SYSTEM = ISDBS\n\
             \tFREQUENCY = 1049480\n\
             \tSTREAM_ID = 16401\n\
             [CS2]\n\
             \tDELIVERY_SYSTEM = ISDBS\n\
             \tFREQUENCY = 1613000\n\
             \tSTREAM_ID = 24608\n"
        );
    }

    #[test]
    fn test_dvbv5lnb_uses_rf_frequency() {
        let rendered = Format::Dvbv5lnb.render(&fixture()).unwrap();

        assert!(rendered.starts_with(
            "[BS01_0]\n\
             \tDELIVERY_SYSTEM = ISDBS\n\
             \tLNB = 110BS\n\
             \tFREQUENCY = 11727480\n\
             \tSTREAM_ID = 16400\n"
        ));
        assert!(rendered.contains("[CS2]\n\tDELIVERY_SYSTEM = ISDBS\n\tLNB = 110BS\n\tFREQUENCY = 12291000\n"));
    }

    #[test]
    fn test_bonpt_numbers_channels_across_bands() {
        let rendered = Format::Bonpt.render(&fixture()).unwrap();

        assert_eq!(
            rendered,
            "#ISDB_S\n\
             ; BS\n\
             BS01/TS0\t0\t0\t0\n\
             BS01/TS1\t1\t0\t1\n\
             \n; CS110\n\
             ND02\t2\t12\t0\n"
        );
    }

    #[test]
    fn test_bondvb_prints_tsid_in_hex() {
        let rendered = Format::Bondvb.render(&fixture()).unwrap();

        assert!(rendered.contains("BS01/TS0\t0\t0\t0x4010\n"));
        assert!(rendered.contains("BS01/TS1\t1\t0\t0x4011\n"));
        assert!(rendered.contains("ND02\t2\t12\t0x6020\n"));
    }

    #[test]
    fn test_bonptx_restarts_channel_index_per_space() {
        let rendered = Format::Bonptx.render(&fixture()).unwrap();

        assert_eq!(
            rendered,
            "[Space.BS]\n\
             Name=BS\n\
             System=ISDB-S\n\
             \n\
             [Space.BS.Channel]\n\
             Ch0=BS01/TS0,0,0\n\
             Ch1=BS01/TS1,0,1\n\
             \n\
             [Space.CS110]\n\
             Name=CS110\n\
             System=ISDB-S\n\
             \n\
             [Space.CS110.Channel]\n\
             Ch0=ND02/TS0,12,0\n"
        );
    }

    #[test]
    fn test_bonpx4_spaces_and_decimal_tsid() {
        let rendered = Format::Bonpx4.render(&fixture()).unwrap();

        assert_eq!(
            rendered,
            "; [BS]\n\
             BS01/TS0\t0\t0\t0\t16400\n\
             BS01/TS1\t0\t1\t0\t16401\n\
             ; [CS]\n\
             ND02\t1\t0\t12\t24608\n"
        );
    }

    #[test]
    fn test_mirakurun_items() {
        let rendered = Format::Mirakurun.render(&fixture()).unwrap();

        let expected = concat!(
            "- name: BS01_0\n",
            "  type: BS\n",
            "  channel: BS01_0\n",
            "  isDisabled: false\n",
            "- name: BS01_1\n",
            "  type: BS\n",
            "  channel: BS01_1\n",
            "  isDisabled: false\n",
            "- name: CS2\n",
            "  type: CS\n",
            "  channel: CS2\n",
            "  isDisabled: false\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_band_headers_follow_entry_presence() {
        // Headers appear whenever a band has entries, resolved or not.
        let unresolved = ChannelMap {
            bs: vec![ChannelEntry::new("BS1".to_string(), 1, 0, 4)],
            cs: Vec::new(),
        };
        let rendered = Format::Bonpt.render(&unresolved).unwrap();
        assert_eq!(rendered, "#ISDB_S\n; BS\n");

        let empty = ChannelMap::default();
        assert_eq!(Format::Bonpt.render(&empty).unwrap(), "#ISDB_S\n");
        assert_eq!(Format::Dvbv5.render(&empty).unwrap(), "");
    }
}
