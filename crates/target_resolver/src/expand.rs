//! Token expansion: one classified token into one or more host entries.

use vajra_common::{Host, HostForm, VajraError, VajraResult};

use crate::config::HostsConfig;
use crate::forms::{parse_target, Target};

/// Classify `token` and append its host entries to `out`.
///
/// Single forms append one entry. Compound forms append every address from
/// first to last inclusive, ascending. Nothing is appended on error.
pub fn expand_into(token: &str, config: &HostsConfig, out: &mut Vec<Host>) -> VajraResult<HostForm> {
    let target = parse_target(token)?;
    let form = target.form();
    match target {
        Target::Single(host) => {
            out.push(host);
            Ok(form)
        }
        Target::Range { range, .. } => {
            if range.is_inverted() {
                return Err(VajraError::InvertedRange(token.to_string()));
            }

            let hosts = range.len();
            if !config.allows(hosts) {
                return Err(VajraError::RangeTooLarge {
                    token: token.to_string(),
                    hosts,
                    limit: config.max_range_hosts.unwrap_or_default(),
                });
            }

            out.reserve(usize::try_from(hosts).unwrap_or(0));
            out.extend(range.iter().map(Host::Ipv4));
            Ok(form)
        }
    }
}

/// Expand a single token into a fresh vector.
pub fn expand(token: &str, config: &HostsConfig) -> VajraResult<Vec<Host>> {
    let mut out = Vec::new();
    expand_into(token, config, &mut out)?;
    Ok(out)
}
