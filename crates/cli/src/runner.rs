// runner.rs
use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use vajra_common::AsyncNameResolver;
use vajra_target_resolver::{to_ipv6_async, DnsResolver, Hosts, HostsConfig, SystemResolver};

use crate::args::HostsArgs;
use crate::output::{print_report, HostRow, Report};

pub async fn run_hosts(args: HostsArgs) -> Result<()> {
    let spec = load_spec(&args).await?;
    let config = build_config(&args, HostsConfig::from_env());

    info!("Targets: {}", spec.trim());
    match config.max_range_hosts {
        Some(limit) => info!("Range limit: {} host(s)", limit),
        None => info!("Range limit: none"),
    }

    let mut hosts = Hosts::parse_with(&spec, &config).context("Failed to parse targets")?;
    info!("Found {} host(s), {} removed", hosts.count(), hosts.removed());

    if args.strict && hosts.removed() > 0 {
        let reasons: Vec<String> = hosts.rejected().iter().map(|e| e.to_string()).collect();
        bail!(
            "{} target token(s) removed (invalid or duplicate){}{}",
            hosts.removed(),
            if reasons.is_empty() { "" } else { ": " },
            reasons.join("; ")
        );
    }

    if args.shuffle {
        hosts.shuffle();
    }

    let resolver: Option<Box<dyn AsyncNameResolver>> = if args.resolve {
        Some(pick_resolver(&args.resolver))
    } else {
        None
    };

    let mut rows = Vec::with_capacity(hosts.count());
    while let Some(host) = hosts.next_host() {
        let row = match &resolver {
            Some(resolver) => {
                let ipv6 = to_ipv6_async(host, resolver.as_ref()).await;
                if let Err(e) = &ipv6 {
                    warn!("{}", e);
                }
                HostRow::resolved(host, ipv6)
            }
            None => HostRow::new(host),
        };
        rows.push(row);
    }

    let report = Report::new(rows, &hosts);
    print_report(&report, &args.output_format)?;
    Ok(())
}

async fn load_spec(args: &HostsArgs) -> Result<String> {
    match (&args.targets, &args.targets_file) {
        (Some(targets), _) => Ok(targets.clone()),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read targets file {}", path.display())),
        (None, None) => bail!("No targets specified"),
    }
}

/// CLI flags win over the environment.
fn build_config(args: &HostsArgs, from_env: HostsConfig) -> HostsConfig {
    if args.allow_large {
        HostsConfig::unbounded()
    } else if let Some(limit) = args.max_range_hosts {
        HostsConfig::default().with_max_range_hosts(limit)
    } else {
        from_env
    }
}

fn pick_resolver(name: &str) -> Box<dyn AsyncNameResolver> {
    match name {
        "dns" => match DnsResolver::from_system_conf() {
            Ok(r) => Box::new(r),
            Err(e) => {
                warn!("{:#}; falling back to default DNS servers", e);
                Box::new(DnsResolver::new())
            }
        },
        _ => Box::new(SystemResolver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(targets: &str) -> HostsArgs {
        HostsArgs {
            targets: Some(targets.to_string()),
            targets_file: None,
            shuffle: false,
            resolve: false,
            resolver: "system".to_string(),
            output_format: "text".to_string(),
            strict: false,
            max_range_hosts: None,
            allow_large: false,
        }
    }

    #[test]
    fn flags_override_env_limits() {
        let env = HostsConfig::default().with_max_range_hosts(10);

        assert_eq!(build_config(&args("a"), env), env);

        let mut a = args("a");
        a.max_range_hosts = Some(500);
        assert_eq!(build_config(&a, env).max_range_hosts, Some(500));

        let mut a = args("a");
        a.allow_large = true;
        assert_eq!(build_config(&a, env), HostsConfig::unbounded());
    }

    #[tokio::test]
    async fn loads_spec_from_file() {
        let path = std::env::temp_dir().join(format!("vajra-targets-{}.txt", std::process::id()));
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "10.0.0.1\n10.0.0.2-3").unwrap();
        }
        let mut a = args("unused");
        a.targets = None;
        a.targets_file = Some(path.clone());
        let spec = load_spec(&a).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(Hosts::parse(&spec).unwrap().count(), 3);
    }

    #[tokio::test]
    async fn strict_mode_rejects_dirty_input() {
        let mut a = args("10.0.0.1,10.0.0.1");
        a.strict = true;
        let err = run_hosts(a).await.unwrap_err();
        assert!(err.to_string().contains("1 target token(s) removed"));

        let mut a = args("10.0.0.5-2");
        a.strict = true;
        let err = run_hosts(a).await.unwrap_err();
        assert!(err.to_string().contains("Inverted limits"));
    }

    #[tokio::test]
    async fn blank_targets_fail() {
        assert!(run_hosts(args("   ")).await.is_err());
    }
}
