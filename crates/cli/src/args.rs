use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vajra")]
#[command(version = "0.1.0")]
#[command(about = "Target specification expander for the Vajra scanner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a target specification into individual hosts
    Hosts(HostsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct HostsArgs {
    /// Targets. Example: 10.0.0.1,192.168.1.0/24,10.0.0.5-20,example.com
    #[arg(short = 't', long, required_unless_present = "targets_file", conflicts_with = "targets_file")]
    pub targets: Option<String>,

    /// Read targets from a file (commas or newlines separate entries)
    #[arg(short = 'f', long)]
    pub targets_file: Option<PathBuf>,

    /// Randomize host order
    #[arg(long)]
    pub shuffle: bool,

    /// Resolve every host to its IPv6 form (IPv4 becomes ::ffff:a.b.c.d)
    #[arg(long)]
    pub resolve: bool,

    /// Name resolver used with --resolve
    #[arg(long, default_value = "system", value_parser = ["system", "dns"])]
    pub resolver: String,

    /// Output format: text, json, csv
    #[arg(short, long, default_value = "text")]
    pub output_format: String,

    /// Fail if any token was invalid or duplicated
    #[arg(long)]
    pub strict: bool,

    /// Largest number of hosts one CIDR block or range may expand to
    #[arg(long, conflicts_with = "allow_large")]
    pub max_range_hosts: Option<u64>,

    /// Expand blocks and ranges of any size
    #[arg(long)]
    pub allow_large: bool,
}
