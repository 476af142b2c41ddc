//! Cloudflare DNS Check Library
//!
//! Lists the zones on a Cloudflare account and prints the DNS records of a
//! zone, authenticating with the global API key and account email.

pub mod app;
pub mod cli;
pub mod cloudflare;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod zones;

pub use cloudflare::{CloudflareClient, DnsApi, DnsRecord, Zone};
pub use credentials::Credentials;
pub use error::CheckError;
