//! The scan pipeline behind the command line.
//!
//! Validate the range, scan, report, persist, then enrich. Only an invalid
//! range or a failure to write the reports ends the run with an error.

use super::Cli;
use crate::error::IntelError;
use crate::intel::{resolve_target, HostInfo, HostIntel, ShodanClient};
use crate::output::{self, ConsoleObserver};
use crate::scanner::{ScanEngine, ScanRequest, TcpConnector};
use anyhow::Context;
use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

impl Cli {
    /// Run a complete scan as described by the arguments.
    pub async fn execute(&self) -> anyhow::Result<()> {
        let request = ScanRequest::parse(&self.target, &self.ports)
            .with_context(|| format!("cannot scan port range '{}'", self.ports))?;
        let settings = self.settings().context("failed to load settings")?;

        output::print_scan_header(request.target(), request.range());

        let observer = Arc::new(if self.progress {
            ConsoleObserver::with_progress(request.range())
        } else {
            ConsoleObserver::new()
        });
        let engine = ScanEngine::new(TcpConnector::new(), settings.scan_options())
            .with_observer(observer.clone());

        let outcome = engine.scan(&request).await;
        observer.finish();
        output::print_summary(&outcome)?;

        let written_at = Local::now();
        let text = output::save_text(&settings.results_dir, &outcome, written_at)
            .context("failed to write text report")?;
        output::print_success(&format!("Scan complete. Results saved to: {}", text.display()));

        if self.json {
            let json = output::save_json(&settings.results_dir, &outcome, written_at)
                .context("failed to write JSON report")?;
            output::print_success(&format!("JSON results saved to: {}", json.display()));
        }

        if self.no_intel {
            return Ok(());
        }

        let client = match self.api_key().map(ShodanClient::new).transpose() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "could not build Shodan client");
                output::print_warning(&format!("Skipping Shodan lookup: {}", e));
                return Ok(());
            }
        };
        let intel = client.as_ref().map(|c| c as &dyn HostIntel);
        report_enrichment(&enrich(intel, request.target()).await);

        Ok(())
    }
}

/// How the host-intelligence step ended.
#[derive(Debug)]
pub enum Enrichment {
    NoCredential,
    CredentialRejected(IntelError),
    Unresolved(IntelError),
    LookupFailed(IntelError),
    Found(HostInfo),
}

/// Look the target up with `intel`, if one is configured and its credential
/// verifies. Never fails: every problem becomes a non-`Found` variant.
pub async fn enrich(intel: Option<&dyn HostIntel>, target: &str) -> Enrichment {
    let Some(intel) = intel else {
        return Enrichment::NoCredential;
    };

    if let Err(e) = intel.verify_credential().await {
        warn!(error = %e, "host intelligence credential rejected");
        return Enrichment::CredentialRejected(e);
    }

    let ip = match resolve_target(target).await {
        Ok(ip) => ip,
        Err(e) => {
            warn!(error = %e, "cannot resolve target for host intelligence");
            return Enrichment::Unresolved(e);
        }
    };

    match intel.lookup(ip).await {
        Ok(info) => {
            info!(%ip, "host intelligence retrieved");
            Enrichment::Found(info)
        }
        Err(e) => {
            warn!(%ip, error = %e, "host intelligence lookup failed");
            Enrichment::LookupFailed(e)
        }
    }
}

fn report_enrichment(enrichment: &Enrichment) {
    match enrichment {
        Enrichment::NoCredential => output::print_warning(
            "No Shodan API key found in environment or .env file. Skipping Shodan lookup.",
        ),
        Enrichment::CredentialRejected(e) => {
            output::print_warning(&format!("Shodan API error: {}", e));
            output::print_warning("Skipping Shodan lookup: invalid API key or no credits.");
        }
        Enrichment::Unresolved(e) => {
            output::print_warning(&format!("Skipping Shodan lookup: {}", e))
        }
        Enrichment::LookupFailed(e) => output::print_warning(&format!("Shodan API error: {}", e)),
        Enrichment::Found(info) => output::print_host_info(info),
    }
}
