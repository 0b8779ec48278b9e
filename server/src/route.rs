//! Maps the `via` query parameter, which may name a network device, to a
//! local source address by scraping the system routing table.

use anyhow::{anyhow, bail, Context, Result};
use tokio::process::Command;

/// Resolves `via` into a `host:port` string suitable for UDP address
/// lookup. When `via` names a device, the kernel route's source address
/// for that device replaces it; otherwise `via` comes back unchanged for
/// the caller to treat as a literal address.
pub async fn resolve_source(via: &str) -> Result<String> {
    if via.is_empty() {
        return Ok(String::new());
    }

    let (host, port) = split_host_port(via);

    let output = Command::new("ip")
        .args(["route", "show", "proto", "kernel", "dev", host])
        .output()
        .await
        .context("ip route show")?;

    if !output.status.success() {
        // iproute2 reports an unknown device on stdout or stderr
        // depending on the version; either way `via` is not a device.
        if output.stdout.starts_with(b"Cannot find device")
            || output.stderr.starts_with(b"Cannot find device")
        {
            return Ok(via.to_string());
        }
        bail!(
            "ip route show: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let routes = String::from_utf8_lossy(&output.stdout);
    let src = parse_src(&routes).ok_or_else(|| anyhow!("no src selector in {routes:?}"))?;

    Ok(format!("{}:{}", src, port.unwrap_or("0")))
}

/// Extracts the first source address from `ip route show` output.
fn parse_src(routes: &str) -> Option<&str> {
    let (_, rest) = routes.split_once(" src ")?;
    rest.split_whitespace().next()
}

/// Splits a trailing `:port` off `addr`, stripping brackets from an IPv6
/// host part.
fn split_host_port(addr: &str) -> (&str, Option<&str>) {
    match addr.rsplit_once(':') {
        Some((host, port)) => (
            host.trim_start_matches('[').trim_end_matches(']'),
            Some(port),
        ),
        None => (addr, None),
    }
}
