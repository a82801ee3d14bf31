//! Plain text console output.
//!
//! Produces human-readable output with colors. Every line is emitted with a
//! single write so concurrent probes never interleave partial lines.

use crate::intel::HostInfo;
use crate::scanner::{PortResult, ScanObserver, ScanOutcome};
use crate::types::{Port, PortRange};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

/// Placeholder shown on the console when a port sent no banner.
pub const CONSOLE_NO_BANNER: &str = "No banner";

/// Console line announcing an open port.
pub fn open_port_line(result: &PortResult) -> String {
    format!(
        "{} {} {}",
        style("[+]").green().bold(),
        style(format!("Port {} is open", result.port)).green(),
        style(format!("| Banner: {}", result.banner_or(CONSOLE_NO_BANNER))).yellow()
    )
}

/// Prints open-port notifications as probes finish, optionally above a
/// progress bar.
pub struct ConsoleObserver {
    progress: Option<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Show a progress bar sized to the range.
    pub fn with_progress(range: PortRange) -> Self {
        let pb = ProgressBar::new(range.len() as u64);
        if let Ok(bar_style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
        ) {
            pb.set_style(bar_style.progress_chars("=>-"));
        }
        Self { progress: Some(pb) }
    }

    /// Remove the progress bar, if any.
    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanObserver for ConsoleObserver {
    fn on_open(&self, result: &PortResult) {
        let line = open_port_line(result);
        match &self.progress {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    fn on_probe_done(&self, _port: Port) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &str, range: PortRange) {
    println!();
    println!(
        "{} Starting scan on {} from port {} to {}...",
        style("[*]").cyan().bold(),
        style(target).white().bold(),
        range.start(),
        range.end()
    );
    println!();
}

/// Print the sorted summary once every probe has finished.
pub fn print_summary(outcome: &ScanOutcome) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out)?;
    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s, {} open",
        style("Statistics:").bold(),
        outcome.probes_launched,
        outcome.elapsed.as_secs_f64(),
        style(outcome.open_count()).green().bold()
    )?;

    if outcome.open_ports.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
        return Ok(());
    }

    writeln!(out, "  {}", style("─".repeat(63)).dim())?;
    writeln!(
        out,
        "  {:>6}  {}",
        style("PORT").bold(),
        style("BANNER").bold()
    )?;
    writeln!(out, "  {}", style("─".repeat(63)).dim())?;

    for result in &outcome.open_ports {
        writeln!(
            out,
            "  {:>6}  {}",
            result.port,
            style(truncate_string(result.banner_or(CONSOLE_NO_BANNER), 55)).dim()
        )?;
    }

    writeln!(out, "  {}", style("─".repeat(63)).dim())?;
    Ok(())
}

/// Render a host-intelligence record as display lines.
pub fn host_info_lines(info: &HostInfo) -> Vec<String> {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    let hostnames = if info.hostnames.is_empty() {
        "N/A".to_string()
    } else {
        info.hostnames.join(", ")
    };
    let ports = if info.ports.is_empty() {
        "N/A".to_string()
    } else {
        info.ports
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let vulns = if info.vulns.is_empty() {
        "None".to_string()
    } else {
        info.vulns.join(", ")
    };

    vec![
        format!("IP: {}", info.ip),
        format!("Organization: {}", or_na(&info.org)),
        format!("Operating System: {}", or_na(&info.os)),
        format!("Location: {}, {}", or_na(&info.city), or_na(&info.country)),
        format!("Hostnames: {}", hostnames),
        format!("Ports: {}", ports),
        format!("Vulnerabilities: {}", vulns),
    ]
}

/// Print a host-intelligence record.
pub fn print_host_info(info: &HostInfo) {
    println!();
    println!(
        "{}",
        style(format!("[SHODAN DATA] for {}:", info.ip)).magenta().bold()
    );
    for line in host_info_lines(info) {
        println!("{}", line);
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("[!]").yellow().bold(), style(msg).yellow());
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("[✓]").green().bold(), msg);
}

/// Truncate a string to a maximum number of characters, adding an ellipsis
/// if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
