//! Shodan REST API client.

use super::{HostInfo, HostIntel};
use crate::error::{IntelError, IntelResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.shodan.io";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Host record as returned by `/shodan/host/{ip}`. Only the fields we
/// display are decoded.
#[derive(Debug, Deserialize)]
struct HostRecord {
    ip_str: Option<String>,
    org: Option<String>,
    os: Option<String>,
    city: Option<String>,
    country_name: Option<String>,
    #[serde(default)]
    hostnames: Vec<String>,
    #[serde(default)]
    ports: Vec<u16>,
    #[serde(default)]
    vulns: Value,
}

impl HostRecord {
    fn into_host_info(self, queried: IpAddr) -> HostInfo {
        let ip = self
            .ip_str
            .and_then(|s| s.parse().ok())
            .unwrap_or(queried);

        let mut ports = self.ports;
        ports.sort_unstable();
        ports.dedup();

        HostInfo {
            ip,
            org: self.org,
            os: self.os,
            city: self.city,
            country: self.country_name,
            hostnames: self.hostnames,
            ports,
            vulns: vuln_ids(self.vulns),
        }
    }
}

/// `vulns` arrives either as a list of ids or an object keyed by id.
fn vuln_ids(value: Value) -> Vec<String> {
    let mut ids: Vec<String> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Value::Object(map) => map.into_iter().map(|(k, _)| k).collect(),
        _ => Vec::new(),
    };
    ids.sort();
    ids
}

/// Client for the Shodan API.
pub struct ShodanClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ShodanClient {
    pub fn new(api_key: impl Into<String>) -> IntelResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("banscan/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get(&self, path: &str) -> IntelResult<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "shodan request");

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        check_status(response).await
    }
}

/// Map a non-success response to an [`IntelError`], using the API's
/// `error` field as the message when present.
async fn check_status(response: Response) -> IntelResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    Err(status_error(status, message))
}

fn status_error(status: StatusCode, message: String) -> IntelError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IntelError::InvalidCredential(message),
        _ => IntelError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl HostIntel for ShodanClient {
    async fn verify_credential(&self) -> IntelResult<()> {
        self.get("/api-info").await.map(|_| ())
    }

    async fn lookup(&self, ip: IpAddr) -> IntelResult<HostInfo> {
        let record: HostRecord = self.get(&format!("/shodan/host/{}", ip)).await?.json().await?;
        Ok(record.into_host_info(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_JSON: &str = r#"{
        "ip_str": "93.184.216.34",
        "org": "Edgecast Inc.",
        "os": null,
        "city": "Norwell",
        "country_name": "United States",
        "hostnames": ["example.com"],
        "ports": [443, 80, 80],
        "vulns": ["CVE-2023-44487", "CVE-2021-23017"],
        "data": [{"port": 80, "transport": "tcp"}]
    }"#;

    #[test]
    fn test_host_record_decoding() {
        let record: HostRecord = serde_json::from_str(HOST_JSON).unwrap();
        let info = record.into_host_info("127.0.0.1".parse().unwrap());

        assert_eq!(info.ip, "93.184.216.34".parse::<IpAddr>().unwrap());
        assert_eq!(info.org.as_deref(), Some("Edgecast Inc."));
        assert_eq!(info.os, None);
        assert_eq!(info.country.as_deref(), Some("United States"));
        assert_eq!(info.hostnames, vec!["example.com"]);
        assert_eq!(info.ports, vec![80, 443]);
        assert_eq!(info.vulns, vec!["CVE-2021-23017", "CVE-2023-44487"]);
    }

    #[test]
    fn test_sparse_host_record() {
        let record: HostRecord = serde_json::from_str("{}").unwrap();
        let queried: IpAddr = "198.51.100.4".parse().unwrap();
        let info = record.into_host_info(queried);

        assert_eq!(info.ip, queried);
        assert!(info.hostnames.is_empty());
        assert!(info.ports.is_empty());
        assert!(info.vulns.is_empty());
    }

    #[test]
    fn test_vulns_as_object() {
        let value = serde_json::json!({
            "CVE-2019-0211": {"cvss": 7.2},
            "CVE-2017-7679": {"cvss": 7.5}
        });
        assert_eq!(vuln_ids(value), vec!["CVE-2017-7679", "CVE-2019-0211"]);
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            IntelError::InvalidCredential(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "No information available".to_string()),
            IntelError::Api { status: 404, .. }
        ));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ShodanClient::new("key")
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
