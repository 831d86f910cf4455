//! Plain-text rendering of an aggregated report.
//!
//! The output is consumed by a copy-to-clipboard action, not machine-parsed,
//! so the only contract is the block shape:
//!
//! ```text
//! <key>
//! 應到：<n>
//! 公差：<m>
//! <dutyName><count>:<name>、<name>
//! ...
//! 實到：<n-m>
//! ```
//!
//! One block per group, then a global summary block of the same shape.

use crate::report::{GroupReport, Report};

/// Renders the full report as copy-pasteable text.
pub fn render_text(report: &Report) -> String {
    let mut blocks: Vec<String> = report.groups.iter().map(render_block).collect();
    blocks.push(render_block(&report.total));
    blocks.join("\n")
}

fn render_block(group: &GroupReport) -> String {
    let mut out = String::new();
    out.push_str(&group.key);
    out.push('\n');
    out.push_str(&format!("應到：{}\n", group.should_attend));
    out.push_str(&format!("公差：{}\n", group.duty_total));
    for tally in &group.tallies {
        if tally.count == 0 {
            continue;
        }
        out.push_str(&format!(
            "{}{}:{}\n",
            tally.duty_name,
            tally.count,
            tally.names.join("、")
        ));
    }
    out.push_str(&format!("實到：{}\n", group.actual_attend));
    out
}
