//! Output formatting for expanded hosts

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::net::Ipv6Addr;
use tracing::warn;
use vajra_common::{Host, VajraResult};
use vajra_target_resolver::Hosts;

/// One printed host.
#[derive(Debug, Clone, Serialize)]
pub struct HostRow {
    pub kind: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostRow {
    pub fn new(host: &Host) -> Self {
        Self {
            kind: host.kind_str(),
            value: host.to_string(),
            ipv6: None,
            error: None,
        }
    }

    pub fn resolved(host: &Host, ipv6: VajraResult<Ipv6Addr>) -> Self {
        let mut row = Self::new(host);
        match ipv6 {
            Ok(v6) => row.ipv6 = Some(v6.to_string()),
            Err(e) => row.error = Some(e.to_string()),
        }
        row
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub hosts: Vec<HostRow>,
    pub count: usize,
    pub removed: usize,
    pub rejected: Vec<String>,
}

impl Report {
    pub fn new(rows: Vec<HostRow>, hosts: &Hosts) -> Self {
        Self {
            hosts: rows,
            count: hosts.count(),
            removed: hosts.removed(),
            rejected: hosts.rejected().iter().map(|e| e.to_string()).collect(),
        }
    }

    fn resolved(&self) -> bool {
        self.hosts.iter().any(|r| r.ipv6.is_some() || r.error.is_some())
    }
}

/// Print the report in the specified format
pub fn print_report(report: &Report, format: &str) -> Result<()> {
    print!("{}", render(report, format)?);
    Ok(())
}

pub fn render(report: &Report, format: &str) -> Result<String> {
    // Normalize format string
    let format = format.trim().to_lowercase();
    let out = match format.as_str() {
        "json" | "j" => render_json(report)?,
        "csv" | "c" => render_csv(report),
        "table" | "text" | "t" | "" => render_table(report),
        _ => {
            warn!("Unknown format '{}', using default table format", format);
            render_table(report)
        }
    };
    Ok(out)
}

fn render_table(report: &Report) -> String {
    let mut out = String::new();
    if report.hosts.is_empty() {
        out.push_str("\nNo hosts to display.\n");
    } else {
        let resolved = report.resolved();
        let _ = writeln!(out, "\n{:-<80}", "");
        if resolved {
            let _ = writeln!(out, "{:<10} {:<40} {:<28}", "TYPE", "HOST", "IPV6");
        } else {
            let _ = writeln!(out, "{:<10} {:<40}", "TYPE", "HOST");
        }
        let _ = writeln!(out, "{:-<80}", "");

        for row in &report.hosts {
            if resolved {
                let ipv6 = match (&row.ipv6, &row.error) {
                    (Some(v6), _) => v6.as_str(),
                    (None, Some(_)) => "unresolved",
                    (None, None) => "-",
                };
                let _ = writeln!(out, "{:<10} {:<40} {:<28}", row.kind, row.value, ipv6);
            } else {
                let _ = writeln!(out, "{:<10} {:<40}", row.kind, row.value);
            }
        }
        let _ = writeln!(out, "{:-<80}", "");
    }

    let _ = writeln!(out, "Hosts: {}  Removed: {}", report.count, report.removed);
    for reason in &report.rejected {
        let _ = writeln!(out, "  rejected: {}", reason);
    }
    out
}

fn render_json(report: &Report) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}

fn render_csv(report: &Report) -> String {
    let mut out = String::from("type,host,ipv6\n");
    for row in &report.hosts {
        let _ = writeln!(
            out,
            "{},{},{}",
            row.kind,
            row.value,
            row.ipv6.as_deref().unwrap_or("")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(spec: &str) -> Report {
        let hosts = Hosts::parse(spec).unwrap();
        let rows = hosts.iter().map(HostRow::new).collect();
        Report::new(rows, &hosts)
    }

    #[test]
    fn csv_lists_every_host() {
        let out = render(&report("10.0.0.1-2,hostA"), "csv").unwrap();
        assert_eq!(out, "type,host,ipv6\nIPv4,10.0.0.1,\nIPv4,10.0.0.2,\nHostname,hostA,\n");
    }

    #[test]
    fn json_carries_counters() {
        let out = render(&report("10.0.0.1,10.0.0.1,bad host"), "JSON").unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["count"], 1);
        assert_eq!(v["removed"], 2);
        assert_eq!(v["hosts"][0]["kind"], "IPv4");
        assert!(v["hosts"][0].get("ipv6").is_none());
        assert_eq!(v["rejected"][0], "Invalid host string: bad host");
    }

    #[test]
    fn table_shows_resolution_column_when_resolved() {
        let host = Host::Ipv4("10.0.0.1".parse().unwrap());
        let hosts = Hosts::parse("10.0.0.1").unwrap();
        let row = HostRow::resolved(&host, Ok("::ffff:10.0.0.1".parse().unwrap()));
        let out = render(&Report::new(vec![row], &hosts), "text").unwrap();
        assert!(out.contains("IPV6"));
        assert!(out.contains("::ffff:10.0.0.1"));
        assert!(out.contains("Hosts: 1  Removed: 0"));
    }

    #[test]
    fn unknown_format_falls_back_to_table() {
        let out = render(&report("hostA"), "yaml").unwrap();
        assert!(out.contains("TYPE"));
        assert!(!out.contains("IPV6"));
    }
}
