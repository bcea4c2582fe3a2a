//! Syntactic validators for single-address and hostname tokens.
//!
//! These are pure predicates; no lookup happens here.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Longest accepted hostname, in bytes.
pub const MAX_HOSTNAME_LEN: usize = 255;

/// Dotted-quad IPv4 literal. Partial forms ("10.1") and octets with leading
/// zeros ("010.0.0.1") are rejected.
#[inline]
#[must_use]
pub fn is_ipv4(token: &str) -> bool {
    parse_ipv4(token).is_some()
}

/// IPv6 literal in presentation format, including `::` compression and
/// embedded dotted-quad tails.
#[inline]
#[must_use]
pub fn is_ipv6(token: &str) -> bool {
    token.parse::<Ipv6Addr>().is_ok()
}

/// ASCII alphanumerics plus `-`, `_` and `.`, at most 255 bytes.
#[must_use]
pub fn is_hostname(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_HOSTNAME_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[inline]
pub(crate) fn parse_ipv4(token: &str) -> Option<Ipv4Addr> {
    token.parse::<Ipv4Addr>().ok()
}
