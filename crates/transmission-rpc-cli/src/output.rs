//! Plain-text rendering of torrents and statistics.

use std::fmt::Write;

use transmission_rpc_types::{Stats, StatsDetails, Torrent};

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count, e.g. `1.5 MiB`.
pub(crate) fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// One line per torrent under a header row.
pub(crate) fn torrent_table(torrents: &[Torrent]) -> String {
    let mut out = format!(
        "{:>4}  {:>6}  {:>10}  {:>8}  {:>6}  {:<16}  {}\n",
        "ID", "Done", "Size", "ETA", "Ratio", "Status", "Name"
    );
    for t in torrents {
        let _ = writeln!(
            out,
            "{:>4}  {:>5.1}%  {:>10}  {:>8}  {:>6}  {:<16}  {}",
            t.id,
            t.percent(),
            format_bytes(t.size()),
            t.eta_display(),
            t.ratio(),
            t.status.to_string(),
            t.name
        );
    }
    out
}

pub(crate) fn torrent_details(t: &Torrent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:       {}", t.name);
    let _ = writeln!(out, "ID:         {}", t.id);
    let _ = writeln!(out, "Hash:       {}", t.hash_string);
    let _ = writeln!(out, "Status:     {}", t.status);
    let _ = writeln!(out, "Location:   {}", t.download_dir);
    let _ = writeln!(
        out,
        "Have:       {} of {} ({:.1}%)",
        format_bytes(t.have()),
        format_bytes(t.size_when_done),
        t.percent()
    );
    let _ = writeln!(out, "ETA:        {}", t.eta_display());
    let _ = writeln!(
        out,
        "Speed:      down {}/s, up {}/s",
        format_bytes(t.rate_download),
        format_bytes(t.rate_upload)
    );
    let _ = writeln!(
        out,
        "Ratio:      {} (uploaded {})",
        t.ratio(),
        format_bytes(t.uploaded_ever)
    );
    if !t.error_string.is_empty() {
        let _ = writeln!(out, "Error:      {}", t.error_string);
    }
    if !t.files.is_empty() {
        let _ = writeln!(out, "Files:");
        for file in &t.files {
            let _ = writeln!(out, "  {} ({})", file.name, format_bytes(file.length));
        }
    }
    if !t.trackers.is_empty() {
        let _ = writeln!(out, "Trackers:");
        for line in t.trackers_display().lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

pub(crate) fn stats_summary(stats: &Stats) -> String {
    let mut out = format!(
        "Torrents:   {} ({} active, {} paused)\nSpeed:      down {}/s, up {}/s\n",
        stats.torrent_count,
        stats.active_torrent_count,
        stats.paused_torrent_count,
        format_bytes(stats.download_speed),
        format_bytes(stats.upload_speed),
    );
    let current = stats.current_active_time();
    let total = stats.cumulative_active_time();
    details(&mut out, "Current session", &stats.current_stats, &current);
    details(&mut out, "Total", &stats.cumulative_stats, &total);
    out
}

fn details(out: &mut String, title: &str, block: &StatsDetails, active: &str) {
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, "  Uploaded:   {}", format_bytes(block.uploaded_bytes));
    let _ = writeln!(out, "  Downloaded: {}", format_bytes(block.downloaded_bytes));
    let _ = writeln!(out, "  Files:      {}", block.files_added);
    let _ = writeln!(out, "  Sessions:   {}", block.session_count);
    let _ = writeln!(out, "  Active:     {active}");
}
