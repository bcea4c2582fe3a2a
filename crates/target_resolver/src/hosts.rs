//! Host collection built from a target specification string.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};
use vajra_common::{Host, VajraError, VajraResult};

use crate::config::HostsConfig;
use crate::expand::expand_into;

/// An ordered, deduplicated collection of host entries.
///
/// Entries keep the order in which they appear in the specification until
/// [`Hosts::shuffle`] is called. The collection carries its own cursor for
/// [`Hosts::next_host`]; shuffling or deduplicating moves that cursor back to
/// the first entry. Use [`Hosts::iter`] for iteration that cannot be
/// disturbed by mutation.
#[derive(Debug)]
pub struct Hosts {
    orig_str: String,
    hosts: Vec<Host>,
    current: usize,
    removed: usize,
    rejected: Vec<VajraError>,
}

impl Hosts {
    /// Parse a comma/newline separated specification with no expansion limit.
    pub fn parse(spec: &str) -> VajraResult<Self> {
        Self::parse_with(spec, &HostsConfig::default())
    }

    /// Parse a comma/newline separated specification.
    ///
    /// Malformed, inverted, and over-limit tokens are skipped, logged, and
    /// counted in [`Hosts::removed`]. Only a blank specification is an error.
    pub fn parse_with(spec: &str, config: &HostsConfig) -> VajraResult<Self> {
        if spec.trim().is_empty() {
            return Err(VajraError::EmptyInput);
        }

        let mut hosts = Self {
            orig_str: spec.to_string(),
            hosts: Vec::new(),
            current: 0,
            removed: 0,
            rejected: Vec::new(),
        };

        let normalized = spec.replace('\n', ",");
        for token in normalized.split(',') {
            let t = token.trim();
            if t.is_empty() {
                continue;
            }

            match expand_into(t, config, &mut hosts.hosts) {
                Ok(form) => debug!("{} -> {}", t, form),
                Err(e) if e.is_token_error() => {
                    warn!("{}", e);
                    hosts.removed += 1;
                    hosts.rejected.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        let duplicates = hosts.remove_duplicates();
        debug!(
            "Parsed {} host(s) from target string ({} duplicate(s), {} invalid)",
            hosts.count(),
            duplicates,
            hosts.rejected.len()
        );

        Ok(hosts)
    }

    /// Next entry at the cursor, advancing it. Keeps returning `None` once
    /// the collection is exhausted.
    pub fn next_host(&mut self) -> Option<&Host> {
        let host = self.hosts.get(self.current)?;
        self.current += 1;
        Some(host)
    }

    /// Move the cursor back to the first entry.
    #[inline]
    pub fn reset(&mut self) {
        self.current = 0;
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.hosts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Tokens dropped as invalid, inverted, over the limit, or duplicate.
    #[inline]
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Per-token errors in input order. Duplicates are counted in
    /// [`Hosts::removed`] but are not errors.
    #[inline]
    #[must_use]
    pub fn rejected(&self) -> &[VajraError] {
        &self.rejected
    }

    /// The specification exactly as given.
    #[inline]
    #[must_use]
    pub fn orig_str(&self) -> &str {
        &self.orig_str
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Host> {
        self.hosts.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Host] {
        &self.hosts
    }

    /// Drop every entry equal to an earlier one, keeping first occurrences in
    /// place. Returns the number of entries dropped and resets the cursor.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.hosts.len();
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(before);
            self.hosts.iter().map(|h| seen.insert(h)).collect()
        };
        let mut keep = keep.into_iter();
        self.hosts.retain(|_| keep.next().unwrap_or(true));

        let dropped = before - self.hosts.len();
        self.removed += dropped;
        self.current = 0;
        dropped
    }

    /// Randomize entry order. Resets the cursor.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Randomize entry order with the given generator. Resets the cursor.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hosts.shuffle(rng);
        self.current = 0;
    }
}

impl IntoIterator for Hosts {
    type Item = Host;
    type IntoIter = std::vec::IntoIter<Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Hosts {
    type Item = &'a Host;
    type IntoIter = std::slice::Iter<'a, Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
