//! Vajra Common - Shared types and traits
//!
//! This crate provides the host entry type, the error taxonomy, and the
//! name-resolution traits used across the Vajra target engine and CLI.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{VajraError, VajraResult};
pub use traits::{AsyncNameResolver, NameResolver};
pub use types::{ipv4_mapped, AddressFamily, Host, HostForm, HostKind};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
