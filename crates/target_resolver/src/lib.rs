//! Target Resolver - host specification parsing and expansion
//!
//! Takes a comma or newline separated target string and expands it into an
//! ordered, deduplicated collection of host entries. Supported token forms:
//! - single IPv4 address: "1.2.3.4"
//! - single IPv6 address: "2001:db8::1"
//! - CIDR: "192.168.1.0/24" (network and broadcast addresses excluded)
//! - short range: "192.168.1.1-10"
//! - long range: "192.168.1.1-192.168.2.10"
//! - hostname: "example.com"
//!
//! ```no_run
//! use vajra_target_resolver::{Hosts, HostResolveExt};
//!
//! let mut hosts = Hosts::parse("10.0.0.1-3, scanme.example.org").unwrap();
//! hosts.shuffle();
//! while let Some(host) = hosts.next_host() {
//!     println!("{} {} {:?}", host.kind(), host, host.to_ipv6());
//! }
//! ```

pub mod config;
pub mod expand;
pub mod forms;
pub mod hosts;
pub mod resolve;
pub mod validate;

pub use config::HostsConfig;
pub use expand::{expand, expand_into};
pub use forms::{classify, parse_target, AddrRange, Target};
pub use hosts::Hosts;
pub use resolve::{to_ipv6_async, DnsResolver, HostResolveExt, SystemResolver};
pub use validate::{is_hostname, is_ipv4, is_ipv6};

pub use vajra_common::{AddressFamily, Host, HostForm, HostKind, VajraError, VajraResult};
