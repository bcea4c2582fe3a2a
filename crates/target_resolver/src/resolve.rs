//! Name resolution and IPv6 canonicalization of host entries.
//!
//! `SystemResolver` asks the operating system (getaddrinfo via
//! `ToSocketAddrs`); its async form runs the lookup inside
//! `tokio::task::spawn_blocking` to avoid blocking the async runtime.
//! `DnsResolver` queries DNS directly through trust-dns. Neither imposes a
//! timeout beyond what the underlying resolver does.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv6Addr, ToSocketAddrs};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;
use vajra_common::{
    ipv4_mapped, AddressFamily, AsyncNameResolver, Host, NameResolver, VajraError, VajraResult,
};

/// Operating-system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }

    fn lookup(name: &str, family: AddressFamily) -> VajraResult<IpAddr> {
        let addrs = (name, 0)
            .to_socket_addrs()
            .map_err(|e| VajraError::resolution_failed(name, e))?;
        addrs
            .map(|a| a.ip())
            .find(|ip| family.matches(ip))
            .ok_or_else(|| VajraError::resolution_failed(name, format!("no {} address", family)))
    }
}

impl NameResolver for SystemResolver {
    fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr> {
        Self::lookup(name, family)
    }

    fn name(&self) -> &str {
        "system"
    }
}

#[async_trait]
impl AsyncNameResolver for SystemResolver {
    async fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr> {
        let owned = name.to_string();
        tokio::task::spawn_blocking(move || Self::lookup(&owned, family))
            .await
            .map_err(|e| VajraError::resolution_failed(name, format!("blocking lookup failed: {}", e)))?
    }

    fn name(&self) -> &str {
        "system"
    }
}

/// DNS resolver backed by trust-dns.
pub struct DnsResolver {
    inner: TokioAsyncResolver,
}

impl DnsResolver {
    /// Resolver using trust-dns' default upstream configuration.
    pub fn new() -> Self {
        Self {
            inner: TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
        }
    }

    /// Resolver using the host's resolv.conf.
    pub fn from_system_conf() -> Result<Self> {
        let inner = TokioAsyncResolver::tokio_from_system_conf()
            .context("Failed to load system DNS configuration")?;
        Ok(Self { inner })
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AsyncNameResolver for DnsResolver {
    async fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr> {
        let lookup = self
            .inner
            .lookup_ip(name)
            .await
            .map_err(|e| VajraError::resolution_failed(name, e))?;
        lookup
            .iter()
            .find(|ip| family.matches(ip))
            .ok_or_else(|| VajraError::resolution_failed(name, format!("no {} address", family)))
    }

    fn name(&self) -> &str {
        "dns"
    }
}

/// Resolution helpers for host entries.
pub trait HostResolveExt {
    /// Canonical IPv6 form, resolving hostnames through the OS resolver.
    fn to_ipv6(&self) -> VajraResult<Ipv6Addr>;

    /// One address of `family` for this entry. Hostnames are resolved with
    /// `resolver`; literals are returned when their family matches.
    fn resolve_with<R: NameResolver + ?Sized>(
        &self,
        family: AddressFamily,
        resolver: &R,
    ) -> VajraResult<IpAddr>;
}

impl HostResolveExt for Host {
    fn to_ipv6(&self) -> VajraResult<Ipv6Addr> {
        self.to_ipv6_with(&SystemResolver)
    }

    fn resolve_with<R: NameResolver + ?Sized>(
        &self,
        family: AddressFamily,
        resolver: &R,
    ) -> VajraResult<IpAddr> {
        match self {
            Host::Hostname(name) => resolver.resolve(name, family),
            literal => literal
                .ip()
                .filter(|ip| family.matches(ip))
                .ok_or_else(|| {
                    VajraError::resolution_failed(
                        &literal.to_string(),
                        format!("{} literal is not an {} address", literal.kind(), family),
                    )
                }),
        }
    }
}

/// Async counterpart of [`Host::to_ipv6_with`].
pub async fn to_ipv6_async(host: &Host, resolver: &dyn AsyncNameResolver) -> VajraResult<Ipv6Addr> {
    match host {
        Host::Ipv6(v6) => Ok(*v6),
        Host::Ipv4(v4) => Ok(ipv4_mapped(*v4)),
        Host::Hostname(name) => match resolver.resolve(name, AddressFamily::Ipv4).await? {
            IpAddr::V4(v4) => Ok(ipv4_mapped(v4)),
            IpAddr::V6(_) => Err(VajraError::resolution_failed(
                name,
                "resolver returned an IPv6 address for an IPv4 request",
            )),
        },
    }
}
