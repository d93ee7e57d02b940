//! libdvbv5 channel-file renderers.
//!
//! Two flavours share one template: the plain one emits the IF frequency
//! for receivers fed after the LNB, the `lnb` one names the `110BS` LNB and
//! emits the RF frequency so dvbv5 does the downconversion itself.

use crate::chset::{ChannelEntry, ChannelMap, TSID_UNRESOLVED};

pub(super) fn render(map: &ChannelMap, lnb: bool) -> String {
    let mut out = String::new();

    for entry in &map.bs {
        if !entry.has_lock() {
            continue;
        }
        for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
            if tsid == TSID_UNRESOLVED {
                continue;
            }
            out.push_str(&format!("[BS{:02}_{}]\n", entry.number(), tsnum));
            section_body(&mut out, entry, tsid, lnb);
        }
    }

    for entry in &map.cs {
        if !entry.has_lock() {
            continue;
        }
        let tsid = entry.tsid(0);
        if tsid == TSID_UNRESOLVED {
            continue;
        }
        out.push_str(&format!("[CS{}]\n", entry.number()));
        section_body(&mut out, entry, tsid, lnb);
    }

    out
}

fn section_body(out: &mut String, entry: &ChannelEntry, tsid: u16, lnb: bool) {
    out.push_str("\tDELIVERY_SYSTEM = ISDBS\n");
    if lnb {
        out.push_str("\tLNB = 110BS\n");
        out.push_str(&format!("\tFREQUENCY = {}\n", entry.frequency_khz()));
    } else {
        out.push_str(&format!("\tFREQUENCY = {}\n", entry.frequency_if_khz()));
    }
    out.push_str(&format!("\tSTREAM_ID = {}\n", tsid));
}
