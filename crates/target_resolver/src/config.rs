//! Expansion limits for compound target forms.
//!
//! The library default is unbounded. Callers that take target strings from
//! users (the CLI) load the limit from the environment instead:
//! - `VAJRA_ALLOW_LARGE_CIDR=1` disables the limit
//! - `VAJRA_MAX_RANGE_HOSTS=<n>` sets it
//! - otherwise `DEFAULT_MAX_RANGE_HOSTS` applies

use tracing::warn;

pub const ENV_ALLOW_LARGE: &str = "VAJRA_ALLOW_LARGE_CIDR";
pub const ENV_MAX_RANGE_HOSTS: &str = "VAJRA_MAX_RANGE_HOSTS";

/// A /16 worth of hosts.
pub const DEFAULT_MAX_RANGE_HOSTS: u64 = 65_536;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostsConfig {
    /// Largest number of hosts a single CIDR block or range may expand to.
    pub max_range_hosts: Option<u64>,
}

impl HostsConfig {
    #[inline]
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_range_hosts: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_max_range_hosts(mut self, limit: u64) -> Self {
        self.max_range_hosts = Some(limit);
        self
    }

    /// Load limits from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load limits through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(ENV_ALLOW_LARGE).map(|v| v == "1").unwrap_or(false) {
            return Self::unbounded();
        }

        let limit = match lookup(ENV_MAX_RANGE_HOSTS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) => n,
                Err(_) => {
                    warn!(
                        "Ignoring {}={:?}: not a number, using {}",
                        ENV_MAX_RANGE_HOSTS, raw, DEFAULT_MAX_RANGE_HOSTS
                    );
                    DEFAULT_MAX_RANGE_HOSTS
                }
            },
            None => DEFAULT_MAX_RANGE_HOSTS,
        };
        Self::default().with_max_range_hosts(limit)
    }

    /// True if an expansion of `hosts` addresses stays within the limit.
    #[inline]
    #[must_use]
    pub fn allows(&self, hosts: u64) -> bool {
        self.max_range_hosts.map_or(true, |limit| hosts <= limit)
    }
}
