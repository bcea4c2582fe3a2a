//! Core traits for Vajra target components
//!
//! Name resolution is the only place the engine talks to the environment, so
//! it sits behind a trait. Tests plug in fixed resolvers; the CLI picks the
//! OS resolver or a DNS client.

use crate::error::VajraResult;
use crate::types::AddressFamily;
use async_trait::async_trait;
use std::net::IpAddr;

/// Blocking name resolver.
pub trait NameResolver {
    /// Resolve `name` to one address of the requested family.
    fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr>;

    /// Resolver name/identifier
    fn name(&self) -> &str {
        "resolver"
    }
}

/// Async name resolver for use inside a tokio runtime.
#[async_trait]
pub trait AsyncNameResolver: Send + Sync {
    /// Resolve `name` to one address of the requested family.
    async fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr>;

    /// Resolver name/identifier
    fn name(&self) -> &str {
        "resolver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VajraError;
    use std::net::{Ipv4Addr, Ipv6Addr};

    struct MockResolver;

    #[async_trait]
    impl AsyncNameResolver for MockResolver {
        async fn resolve(&self, name: &str, family: AddressFamily) -> VajraResult<IpAddr> {
            match (name, family) {
                ("localhost", AddressFamily::Ipv4) => Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)),
                ("localhost", AddressFamily::Ipv6) => Ok(IpAddr::V6(Ipv6Addr::LOCALHOST)),
                _ => Err(VajraError::resolution_failed(name, "unknown")),
            }
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_async_resolver_trait() {
        let resolver = MockResolver;
        let ip = resolver.resolve("localhost", AddressFamily::Ipv4).await.unwrap();
        assert!(AddressFamily::Ipv4.matches(&ip));
        assert!(resolver.resolve("other", AddressFamily::Ipv4).await.is_err());
        assert_eq!(AsyncNameResolver::name(&resolver), "mock");
    }
}
