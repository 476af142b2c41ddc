//! Command-Line Interface
//!
//! Every setting the tool reads is declared here. Credentials fall back to
//! the `CF_API_KEY` / `CF_API_EMAIL` environment variables.

use clap::{ArgAction, Parser};

use crate::cloudflare::CLOUDFLARE_API;
use crate::credentials::{API_EMAIL_VAR, API_KEY_VAR};

/// Print DNS records for a given Cloudflare zone.
///
/// Without a zone, lists the zones visible to the account instead.
///
/// Credentials are accepted via the two environment variables CF_API_KEY and CF_API_EMAIL.
#[derive(Parser, Debug)]
#[command(name = "cf-check-dns", version)]
pub struct Cli {
    /// Cloudflare zone (e.g., example.com)
    #[arg(value_name = "ZONE")]
    pub zone: Option<String>,

    /// Cloudflare zone, as an option
    #[arg(short = 'z', long = "zone", value_name = "ZONE", conflicts_with = "zone")]
    pub zone_option: Option<String>,

    /// Cloudflare global API key
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Cloudflare account email
    #[arg(long, env = API_EMAIL_VAR)]
    pub api_email: Option<String>,

    /// Cloudflare API base URL
    #[arg(long, env = "CF_API_URL", default_value = CLOUDFLARE_API)]
    pub api_url: String,

    /// Repeat for extra visibility
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Requested zone, from either the positional argument or `--zone`
    pub fn zone_name(&self) -> Option<&str> {
        self.zone.as_deref().or(self.zone_option.as_deref())
    }
}
