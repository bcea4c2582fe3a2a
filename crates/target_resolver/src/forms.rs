//! Compound-form parsers and the token classifier.
//!
//! Supported token forms, tried in this order:
//! - single IPv4 address: "1.2.3.4"
//! - single IPv6 address: "fe80::1"
//! - CIDR: "192.168.1.0/24" (prefix 1..=30)
//! - short range: "192.168.1.5-40"
//! - long range: "192.168.1.1-192.168.2.10"
//! - hostname: "example.com"
//!
//! Numeric compound forms must be tried before hostnames because the hostname
//! alphabet also admits digits, dots and dashes.

use ipnet::Ipv4Net;
use std::net::{Ipv4Addr, Ipv6Addr};
use vajra_common::{Host, HostForm, VajraError, VajraResult};

use crate::validate::{is_hostname, is_ipv4, is_ipv6, parse_ipv4};

/// Smallest and largest accepted CIDR prefix. /31 and /32 leave no usable
/// host once network and broadcast are reserved.
pub const MIN_CIDR_PREFIX: u8 = 1;
pub const MAX_CIDR_PREFIX: u8 = 30;

/// Inclusive IPv4 interval produced by a compound form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl AddrRange {
    #[inline]
    #[must_use]
    pub const fn new(first: Ipv4Addr, last: Ipv4Addr) -> Self {
        Self { first, last }
    }

    /// First address numerically above last.
    #[inline]
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        u32::from(self.first) > u32::from(self.last)
    }

    /// Number of addresses in the interval, 0 when inverted.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            u64::from(u32::from(self.last)) - u64::from(u32::from(self.first)) + 1
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_inverted()
    }

    /// Ascending addresses from first to last inclusive.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        (u32::from(self.first)..=u32::from(self.last)).map(Ipv4Addr::from)
    }
}

/// A classified token, before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Single(Host),
    Range { form: HostForm, range: AddrRange },
}

impl Target {
    #[must_use]
    pub fn form(&self) -> HostForm {
        match self {
            Target::Single(Host::Hostname(_)) => HostForm::Hostname,
            Target::Single(Host::Ipv4(_)) => HostForm::Ipv4,
            Target::Single(Host::Ipv6(_)) => HostForm::Ipv6,
            Target::Range { form, .. } => *form,
        }
    }
}

/// Parse an unsigned decimal of at most `max_digits` digits. Signs,
/// whitespace and trailing garbage are rejected.
fn decimal(s: &str, max_digits: usize) -> Option<u32> {
    if s.is_empty() || s.len() > max_digits || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// "<ipv4>/<n>" with n in 1..=30.
#[must_use]
pub fn parse_cidr(token: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, block) = token.split_once('/')?;
    let addr = parse_ipv4(addr)?;
    let block = decimal(block, 2)?;
    let block = u8::try_from(block).ok()?;
    (MIN_CIDR_PREFIX..=MAX_CIDR_PREFIX)
        .contains(&block)
        .then_some((addr, block))
}

#[inline]
#[must_use]
pub fn is_cidr_block(token: &str) -> bool {
    parse_cidr(token).is_some()
}

/// Usable hosts of a CIDR block: network address + 1 through broadcast - 1.
///
/// Host bits of `addr` are ignored, so "192.168.1.77/24" covers the same
/// hosts as "192.168.1.0/24".
#[must_use]
pub fn cidr_range(addr: Ipv4Addr, prefix: u8) -> Option<AddrRange> {
    if !(MIN_CIDR_PREFIX..=MAX_CIDR_PREFIX).contains(&prefix) {
        return None;
    }
    let net = Ipv4Net::new(addr, prefix).ok()?;
    let first = u32::from(net.network()) + 1;
    let last = u32::from(net.broadcast()) - 1;
    Some(AddrRange::new(Ipv4Addr::from(first), Ipv4Addr::from(last)))
}

/// "<ipv4>-<end>" with end in 0..=255.
#[must_use]
pub fn parse_short_range(token: &str) -> Option<(Ipv4Addr, u8)> {
    let (addr, end) = token.split_once('-')?;
    let addr = parse_ipv4(addr)?;
    let end = decimal(end, 3)?;
    let end = u8::try_from(end).ok()?;
    Some((addr, end))
}

#[inline]
#[must_use]
pub fn is_short_range(token: &str) -> bool {
    parse_short_range(token).is_some()
}

/// The base address through the same /24 with its last octet set to `end`.
/// The result is inverted when `end` is below the base's last octet.
#[must_use]
pub fn short_range(addr: Ipv4Addr, end: u8) -> AddrRange {
    let last = (u32::from(addr) & 0xffff_ff00) | u32::from(end);
    AddrRange::new(addr, Ipv4Addr::from(last))
}

/// "<ipv4>-<ipv4>".
#[must_use]
pub fn parse_long_range(token: &str) -> Option<AddrRange> {
    let (first, last) = token.split_once('-')?;
    Some(AddrRange::new(parse_ipv4(first)?, parse_ipv4(last)?))
}

#[inline]
#[must_use]
pub fn is_long_range(token: &str) -> bool {
    parse_long_range(token).is_some()
}

/// Tag a stripped token with its form. `None` if no rule matches.
#[must_use]
pub fn classify(token: &str) -> Option<HostForm> {
    if token.is_empty() {
        None
    } else if is_ipv4(token) {
        Some(HostForm::Ipv4)
    } else if is_ipv6(token) {
        Some(HostForm::Ipv6)
    } else if is_cidr_block(token) {
        Some(HostForm::CidrBlock)
    } else if is_short_range(token) {
        Some(HostForm::ShortRange)
    } else if is_long_range(token) {
        Some(HostForm::LongRange)
    } else if is_hostname(token) {
        Some(HostForm::Hostname)
    } else {
        None
    }
}

/// Classify a stripped token and decompose it into a single host or an
/// address interval. Inverted intervals are returned as-is; rejecting them is
/// the expander's job.
pub fn parse_target(token: &str) -> VajraResult<Target> {
    let invalid = || VajraError::InvalidSyntax(token.to_string());
    let form = classify(token).ok_or_else(invalid)?;

    let target = match form {
        HostForm::Ipv4 => Target::Single(Host::Ipv4(parse_ipv4(token).ok_or_else(invalid)?)),
        HostForm::Ipv6 => Target::Single(Host::Ipv6(
            token.parse::<Ipv6Addr>().map_err(|_| invalid())?,
        )),
        HostForm::Hostname => Target::Single(Host::Hostname(token.to_string())),
        HostForm::CidrBlock => {
            let (addr, prefix) = parse_cidr(token).ok_or_else(invalid)?;
            Target::Range {
                form,
                range: cidr_range(addr, prefix).ok_or_else(invalid)?,
            }
        }
        HostForm::ShortRange => {
            let (addr, end) = parse_short_range(token).ok_or_else(invalid)?;
            Target::Range {
                form,
                range: short_range(addr, end),
            }
        }
        HostForm::LongRange => Target::Range {
            form,
            range: parse_long_range(token).ok_or_else(invalid)?,
        },
    };
    Ok(target)
}
