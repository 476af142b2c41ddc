//! Terminal Output
//!
//! Renders DNS records as a right-justified table and zone names as a
//! plain list. Rendering returns a `String`; printing is left to the caller.

use std::fmt::Write;

use crate::cloudflare::DnsRecord;

pub const NO_RECORDS: &str = "No DNS records found";

const HEADERS: [&str; 3] = ["Last Updated", "Host", "Address"];
const COLUMN_GAP: &str = "  ";

/// Cells of one table row, in header order
fn row(record: &DnsRecord) -> [&str; 3] {
    [&record.modified_on, &record.name, &record.content]
}

/// Render records under the `Last Updated`, `Host` and `Address` columns.
///
/// Each column is as wide as its widest cell and every cell is
/// right-justified. An empty slice renders the "no records" line followed
/// by a blank line.
pub fn render_records(records: &[DnsRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n\n", NO_RECORDS);
    }

    let mut widths = HEADERS.map(|header| header.chars().count());
    for record in records {
        for (width, cell) in widths.iter_mut().zip(row(record)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS, &widths);
    for record in records {
        push_line(&mut out, row(record), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; 3], widths: &[usize; 3]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join(COLUMN_GAP));
}

/// Render the zone listing: a header naming the account, then one line per zone
pub fn render_zone_list(api_email: &str, zone_names: &[String]) -> String {
    let mut out = format!("Zones for {}\n", api_email);
    for name in zone_names {
        let _ = writeln!(out, "{}  {}", api_email, name);
    }
    out
}
