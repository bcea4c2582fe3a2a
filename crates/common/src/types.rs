//! Core data types for the Vajra target engine
//!
//! A `Host` is a single expanded entry of a target specification. Compound
//! forms (CIDR blocks and ranges) never survive as entries; they are expanded
//! into individual `Host::Ipv4` values before they reach a collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{VajraError, VajraResult};
use crate::traits::NameResolver;

/// Kind of a single host entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostKind {
    Hostname,
    Ipv4,
    Ipv6,
}

impl HostKind {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            HostKind::Hostname => "Hostname",
            HostKind::Ipv4 => "IPv4",
            HostKind::Ipv6 => "IPv6",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntactic form of one token in a target specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostForm {
    Hostname,
    Ipv4,
    Ipv6,
    CidrBlock,
    ShortRange,
    LongRange,
}

impl HostForm {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            HostForm::Hostname => "Hostname",
            HostForm::Ipv4 => "IPv4",
            HostForm::Ipv6 => "IPv6",
            HostForm::CidrBlock => "IPv4 CIDR block",
            HostForm::ShortRange => "IPv4 short range",
            HostForm::LongRange => "IPv4 long range",
        }
    }

    /// Compound forms expand into several IPv4 entries.
    #[inline]
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(
            self,
            HostForm::CidrBlock | HostForm::ShortRange | HostForm::LongRange
        )
    }
}

impl fmt::Display for HostForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address family requested from a name resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
        }
    }

    #[inline]
    #[must_use]
    pub const fn matches(&self, ip: &IpAddr) -> bool {
        matches!(
            (self, ip),
            (AddressFamily::Ipv4, IpAddr::V4(_)) | (AddressFamily::Ipv6, IpAddr::V6(_))
        )
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single host entry.
///
/// Equality is kind-aware: two entries are equal only when their kinds match
/// and their payloads are identical. Hostnames compare byte-for-byte, so
/// `Example.com` and `example.com` are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Host {
    Hostname(String),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
}

impl Host {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> HostKind {
        match self {
            Host::Hostname(_) => HostKind::Hostname,
            Host::Ipv4(_) => HostKind::Ipv4,
            Host::Ipv6(_) => HostKind::Ipv6,
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Literal address of this entry, `None` for hostnames.
    #[inline]
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Host::Hostname(_) => None,
            Host::Ipv4(v4) => Some(IpAddr::V4(*v4)),
            Host::Ipv6(v6) => Some(IpAddr::V6(*v6)),
        }
    }

    /// Canonical IPv6 form of this entry.
    ///
    /// IPv6 entries pass through, IPv4 entries become `::ffff:a.b.c.d`, and
    /// hostnames are resolved to an IPv4 address first. Resolution blocks for
    /// as long as the resolver does.
    pub fn to_ipv6_with<R>(&self, resolver: &R) -> VajraResult<Ipv6Addr>
    where
        R: NameResolver + ?Sized,
    {
        match self {
            Host::Ipv6(v6) => Ok(*v6),
            Host::Ipv4(v4) => Ok(ipv4_mapped(*v4)),
            Host::Hostname(name) => match resolver.resolve(name, AddressFamily::Ipv4)? {
                IpAddr::V4(v4) => Ok(ipv4_mapped(v4)),
                IpAddr::V6(_) => Err(VajraError::resolution_failed(
                    name,
                    "resolver returned an IPv6 address for an IPv4 request",
                )),
            },
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Hostname(name) => f.write_str(name),
            Host::Ipv4(v4) => write!(f, "{}", v4),
            Host::Ipv6(v6) => write!(f, "{}", v6),
        }
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => Host::Ipv4(v4),
            IpAddr::V6(v6) => Host::Ipv6(v6),
        }
    }
}

/// IPv4-mapped IPv6 address: 80 zero bits, 16 one bits, then the IPv4 value.
#[inline]
#[must_use]
pub const fn ipv4_mapped(v4: Ipv4Addr) -> Ipv6Addr {
    v4.to_ipv6_mapped()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedResolver(IpAddr);

    impl NameResolver for FixedResolver {
        fn resolve(&self, _name: &str, _family: AddressFamily) -> VajraResult<IpAddr> {
            Ok(self.0)
        }
    }

    struct FailingResolver;

    impl NameResolver for FailingResolver {
        fn resolve(&self, name: &str, _family: AddressFamily) -> VajraResult<IpAddr> {
            Err(VajraError::resolution_failed(name, "not found"))
        }
    }

    #[test]
    fn kind_strings() {
        assert_eq!(Host::Hostname("a".into()).kind_str(), "Hostname");
        assert_eq!(Host::Ipv4(Ipv4Addr::LOCALHOST).kind_str(), "IPv4");
        assert_eq!(Host::Ipv6(Ipv6Addr::LOCALHOST).kind_str(), "IPv6");
        assert_eq!(HostForm::ShortRange.to_string(), "IPv4 short range");
        assert!(HostForm::CidrBlock.is_compound());
        assert!(!HostForm::Ipv6.is_compound());
    }

    #[test]
    fn equality_is_kind_aware_and_case_sensitive() {
        assert_eq!(Host::Hostname("host".into()), Host::Hostname("host".into()));
        assert_ne!(Host::Hostname("Host".into()), Host::Hostname("host".into()));
        // same 32 bits, different kinds
        let v4 = Ipv4Addr::new(10, 0, 0, 1);
        assert_ne!(Host::Ipv4(v4), Host::Ipv6(v4.to_ipv6_mapped()));
    }

    #[test]
    fn display_uses_presentation_format() {
        assert_eq!(Host::Ipv4(Ipv4Addr::new(192, 168, 1, 2)).to_string(), "192.168.1.2");
        let v6: Ipv6Addr = "0:0:0:0:0:0:0:1".parse().unwrap();
        assert_eq!(Host::Ipv6(v6).to_string(), "::1");
        assert_eq!(Host::Hostname("db_01.lan".into()).to_string(), "db_01.lan");
    }

    #[test]
    fn literal_addresses_round_trip_through_ip() {
        let ip: IpAddr = "fe80::1".parse().unwrap();
        let host = Host::from(ip);
        assert_eq!(host.kind(), HostKind::Ipv6);
        assert_eq!(host.ip(), Some(ip));
        assert_eq!(Host::Hostname("a".into()).ip(), None);
    }

    #[test]
    fn ipv4_maps_into_ffff_prefix() {
        let mapped = ipv4_mapped(Ipv4Addr::new(192, 168, 10, 20));
        let o = mapped.octets();
        assert_eq!(&o[..10], &[0u8; 10]);
        assert_eq!(&o[10..12], &[0xff, 0xff]);
        assert_eq!(&o[12..], &[192, 168, 10, 20]);
        assert_eq!(mapped.to_string(), "::ffff:192.168.10.20");
    }

    #[test]
    fn to_ipv6_per_kind() {
        let resolver = FixedResolver(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)));

        let v6: Ipv6Addr = "2001:db8::1".parse().unwrap();
        assert_eq!(Host::Ipv6(v6).to_ipv6_with(&resolver).unwrap(), v6);

        let v4 = Host::Ipv4(Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(
            v4.to_ipv6_with(&resolver).unwrap(),
            "::ffff:1.2.3.4".parse::<Ipv6Addr>().unwrap()
        );

        let name = Host::Hostname("printer".into());
        assert_eq!(
            name.to_ipv6_with(&resolver).unwrap(),
            "::ffff:10.1.2.3".parse::<Ipv6Addr>().unwrap()
        );
    }

    #[test]
    fn resolution_failure_is_reported() {
        let r = Host::Hostname("nohost.invalid".into()).to_ipv6_with(&FailingResolver);
        assert!(matches!(r, Err(VajraError::ResolutionFailed { .. })));

        // literals never touch the resolver
        assert!(Host::Ipv4(Ipv4Addr::LOCALHOST).to_ipv6_with(&FailingResolver).is_ok());
    }

    #[test]
    fn serde_tagged_representation() {
        let json = serde_json::to_string(&Host::Ipv4(Ipv4Addr::new(10, 0, 0, 1))).unwrap();
        assert_eq!(json, r#"{"kind":"ipv4","value":"10.0.0.1"}"#);

        let back: Host = serde_json::from_str(r#"{"kind":"hostname","value":"hostA"}"#).unwrap();
        assert_eq!(back, Host::Hostname("hostA".into()));
    }
}
