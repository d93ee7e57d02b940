//! BonDriver channel-set renderers.
//!
//! The PT and DVB flavours share a flat TSV layout and number channels
//! across both bands; PTx and PX4 keep per-space channel indexes.

use crate::chset::{ChannelMap, TSID_UNRESOLVED};

/// BonDriver_PT: name, channel index, frequency index, slot number.
pub(super) fn pt(map: &ChannelMap) -> String {
    let mut out = String::from("#ISDB_S\n");
    let mut bonch = 0;

    if !map.bs.is_empty() {
        out.push_str("; BS\n");
        for entry in &map.bs {
            if !entry.has_lock() {
                continue;
            }
            for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
                if tsid == TSID_UNRESOLVED {
                    continue;
                }
                out.push_str(&format!(
                    "BS{:02}/TS{}\t{}\t{}\t{}\n",
                    entry.number(),
                    tsnum,
                    bonch,
                    entry.frequency_idx(),
                    tsnum
                ));
                bonch += 1;
            }
        }
    }

    if !map.cs.is_empty() {
        out.push_str("\n; CS110\n");
        for entry in &map.cs {
            if !entry.has_lock() || entry.tsid(0) == TSID_UNRESOLVED {
                continue;
            }
            out.push_str(&format!(
                "ND{:02}\t{}\t{}\t0\n",
                entry.number(),
                bonch,
                entry.frequency_idx()
            ));
            bonch += 1;
        }
    }

    out
}

/// BonDriver_DVB: as PT but the last column is the TSID in hex.
pub(super) fn dvb(map: &ChannelMap) -> String {
    let mut out = String::from("#ISDB_S\n");
    let mut bonch = 0;

    if !map.bs.is_empty() {
        out.push_str("; BS\n");
        for entry in &map.bs {
            if !entry.has_lock() {
                continue;
            }
            for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
                if tsid == TSID_UNRESOLVED {
                    continue;
                }
                out.push_str(&format!(
                    "BS{:02}/TS{}\t{}\t{}\t0x{:x}\n",
                    entry.number(),
                    tsnum,
                    bonch,
                    entry.frequency_idx(),
                    tsid
                ));
                bonch += 1;
            }
        }
    }

    if !map.cs.is_empty() {
        out.push_str("\n; CS110\n");
        for entry in &map.cs {
            if !entry.has_lock() {
                continue;
            }
            let tsid = entry.tsid(0);
            if tsid == TSID_UNRESOLVED {
                continue;
            }
            out.push_str(&format!(
                "ND{:02}\t{}\t{}\t0x{:x}\n",
                entry.number(),
                bonch,
                entry.frequency_idx(),
                tsid
            ));
            bonch += 1;
        }
    }

    out
}

/// BonDriver_PTx: INI spaces with the channel index restarting per space.
pub(super) fn ptx(map: &ChannelMap) -> String {
    let mut out = String::new();

    if !map.bs.is_empty() {
        out.push_str("[Space.BS]\nName=BS\nSystem=ISDB-S\n\n[Space.BS.Channel]\n");
        let mut bonch = 0;
        for entry in &map.bs {
            if !entry.has_lock() {
                continue;
            }
            for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
                if tsid == TSID_UNRESOLVED {
                    continue;
                }
                out.push_str(&format!(
                    "Ch{}=BS{:02}/TS{},{},{}\n",
                    bonch,
                    entry.number(),
                    tsnum,
                    entry.frequency_idx(),
                    tsnum
                ));
                bonch += 1;
            }
        }
    }

    if !map.cs.is_empty() {
        out.push_str("\n[Space.CS110]\nName=CS110\nSystem=ISDB-S\n\n[Space.CS110.Channel]\n");
        let mut bonch = 0;
        for entry in &map.cs {
            if !entry.has_lock() || entry.tsid(0) == TSID_UNRESOLVED {
                continue;
            }
            out.push_str(&format!(
                "Ch{}=ND{:02}/TS0,{},0\n",
                bonch,
                entry.number(),
                entry.frequency_idx()
            ));
            bonch += 1;
        }
    }

    out
}

/// BonDriver_PX4: name, space, per-space channel index, frequency index,
/// decimal TSID.
pub(super) fn px4(map: &ChannelMap) -> String {
    let mut out = String::new();

    if !map.bs.is_empty() {
        out.push_str("; [BS]\n");
        let mut bonch = 0;
        for entry in &map.bs {
            if !entry.has_lock() {
                continue;
            }
            for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
                if tsid == TSID_UNRESOLVED {
                    continue;
                }
                out.push_str(&format!(
                    "BS{:02}/TS{}\t0\t{}\t{}\t{}\n",
                    entry.number(),
                    tsnum,
                    bonch,
                    entry.frequency_idx(),
                    tsid
                ));
                bonch += 1;
            }
        }
    }

    if !map.cs.is_empty() {
        out.push_str("; [CS]\n");
        let mut bonch = 0;
        for entry in &map.cs {
            if !entry.has_lock() {
                continue;
            }
            let tsid = entry.tsid(0);
            if tsid == TSID_UNRESOLVED {
                continue;
            }
            out.push_str(&format!(
                "ND{:02}\t1\t{}\t{}\t{}\n",
                entry.number(),
                bonch,
                entry.frequency_idx(),
                tsid
            ));
            bonch += 1;
        }
    }

    out
}
