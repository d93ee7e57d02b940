//! Mirakurun channels.yml renderer.

use crate::chset::{ChannelMap, TSID_UNRESOLVED};

pub(super) fn render(map: &ChannelMap) -> String {
    let mut out = String::new();

    for entry in &map.bs {
        if !entry.has_lock() {
            continue;
        }
        for (tsnum, &tsid) in entry.tsids().iter().enumerate() {
            if tsid == TSID_UNRESOLVED {
                continue;
            }
            let channel = format!("BS{:02}_{}", entry.number(), tsnum);
            out.push_str(&format!(
                "- name: {channel}\n  type: BS\n  channel: {channel}\n  isDisabled: false\n"
            ));
        }
    }

    for entry in &map.cs {
        if !entry.has_lock() || entry.tsid(0) == TSID_UNRESOLVED {
            continue;
        }
        let channel = format!("CS{}", entry.number());
        out.push_str(&format!(
            "- name: {channel}\n  type: CS\n  channel: {channel}\n  isDisabled: false\n"
        ));
    }

    out
}
