//! Host intelligence lookups.
//!
//! Enrichment is purely additive: it runs after the scan, and any failure
//! here degrades to a warning.

mod shodan;

pub use shodan::ShodanClient;

use crate::error::{IntelError, IntelResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// What a third-party service knows about a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    pub ip: IpAddr,
    pub org: Option<String>,
    pub os: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub hostnames: Vec<String>,
    /// Ports the service has observed open, ascending.
    pub ports: Vec<u16>,
    /// Known vulnerability identifiers, ascending.
    pub vulns: Vec<String>,
}

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            org: None,
            os: None,
            city: None,
            country: None,
            hostnames: Vec::new(),
            ports: Vec::new(),
            vulns: Vec::new(),
        }
    }
}

/// Narrow interface to a host-intelligence provider.
#[async_trait]
pub trait HostIntel: Send + Sync {
    /// Check that the credential is accepted. `Ok` means lookups may proceed.
    async fn verify_credential(&self) -> IntelResult<()>;

    async fn lookup(&self, ip: IpAddr) -> IntelResult<HostInfo>;
}

/// Resolve a scan target to the address handed to the provider.
pub async fn resolve_target(target: &str) -> IntelResult<IpAddr> {
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    tokio::net::lookup_host((target, 0))
        .await
        .map_err(|_| IntelError::Resolve(target.to_string()))?
        .map(|addr| addr.ip())
        .next()
        .ok_or_else(|| IntelError::Resolve(target.to_string()))
}
