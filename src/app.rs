//! Command Dispatch
//!
//! Resolve credentials, open the Cloudflare client, run either the zone
//! listing or the record query, then render. The client lives only for the
//! query phase and is dropped before anything is printed, on every path.

use std::io::Write;

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::cloudflare::{CloudflareClient, DnsApi, DnsRecord};
use crate::credentials::Credentials;
use crate::error::CheckError;
use crate::presenter::{render_records, render_zone_list};
use crate::zones::{fetch_records, list_zone_names, resolve_zone_id};

/// What a successful invocation prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// No zone requested: every zone on the account
    Zones {
        api_email: String,
        names: Vec<String>,
    },
    /// Records of the requested zone
    Records(Vec<DnsRecord>),
}

impl Report {
    pub fn render(&self) -> String {
        match self {
            Report::Zones { api_email, names } => render_zone_list(api_email, names),
            Report::Records(records) => render_records(records),
        }
    }
}

/// Run the request sequence against `api`.
///
/// With no zone this lists zones and stops; otherwise it resolves the zone
/// ID and fetches its records. At most two requests are made, in order.
pub async fn query<A>(api: &A, api_email: &str, zone: Option<&str>) -> Result<Report, CheckError>
where
    A: DnsApi + ?Sized,
{
    match zone {
        None => {
            info!("No zone given, listing zones for {}", api_email);
            let names = list_zone_names(api).await?;
            Ok(Report::Zones {
                api_email: api_email.to_string(),
                names,
            })
        }
        Some(zone) => {
            info!("Retrieving DNS records for zone: {}", zone);
            let zone_id = resolve_zone_id(api, zone).await?;
            let records = fetch_records(api, &zone_id).await?;
            info!("Retrieved {} records", records.len());
            Ok(Report::Records(records))
        }
    }
}

/// Full invocation after argument parsing
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CheckError> {
    let credentials = Credentials::load(cli.api_key.clone(), cli.api_email.clone())?;

    let report = {
        let client = CloudflareClient::new(&credentials, &cli.api_url)
            .context("Failed to build Cloudflare API client")?;
        debug!("Using Cloudflare API at {}", client.base_url());

        query(&client, credentials.api_email(), cli.zone_name()).await?
    };

    out.write_all(report.render().as_bytes())
        .context("Failed to write output")?;
    out.flush().context("Failed to write output")?;

    Ok(())
}
