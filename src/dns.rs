//! Best-effort DNS resolution for the probe.

use anyhow::{Error, Result};
use hickory_resolver::TokioAsyncResolver;
use std::collections::HashSet;

/// Resolves a hostname to its unique IPv4 addresses.
///
/// IPv6 results are discarded; the diagnostic report only carries A records.
/// Address order is not meaningful.
///
/// # Errors
///
/// Returns an error if DNS resolution fails. Callers treat this as
/// informational: the probe swallows it and leaves `ip_addresses` empty.
pub async fn resolve_ipv4(host: &str, resolver: &TokioAsyncResolver) -> Result<Vec<String>, Error> {
    let response = resolver.lookup_ip(host).await.map_err(Error::new)?;

    let mut seen = HashSet::new();
    let mut addresses = Vec::new();
    for ip in response.iter().filter(|ip| ip.is_ipv4()) {
        let addr = ip.to_string();
        if seen.insert(addr.clone()) {
            addresses.push(addr);
        }
    }
    Ok(addresses)
}
