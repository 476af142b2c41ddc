//! Error Taxonomy
//!
//! Every failure the tool can report, and the exit status each one maps to.

use std::process::ExitCode;

use thiserror::Error;

use crate::cloudflare::ApiError;
use crate::credentials::CredentialError;

/// Exit status for missing or malformed credentials.
pub const EXIT_CREDENTIALS: u8 = 5;

/// Exit status when the requested zone is not visible to the account.
pub const EXIT_ZONE_NOT_FOUND: u8 = 4;

/// Exit status for provider request failures and anything else.
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced to the command front-end
#[derive(Debug, Error)]
pub enum CheckError {
    /// CF_API_KEY / CF_API_EMAIL absent or malformed
    #[error(
        "Cloudflare credentials are not set or are invalid: {0}\n\
         Please set the CF_API_KEY and CF_API_EMAIL environment variables."
    )]
    Credentials(#[from] CredentialError),

    /// Listing zones failed at the transport or API level
    #[error("Unable to retrieve zone ID for {zone}\nError details: {source}")]
    ZoneLookup {
        zone: String,
        #[source]
        source: ApiError,
    },

    /// Zones were listed but none is named exactly `zone`
    #[error("Zone \"{zone}\" not found")]
    ZoneNotFound { zone: String },

    /// Fetching the records of a resolved zone failed
    #[error("Unable to retrieve DNS records for zone ID {zone_id}\nError details: {source}")]
    RecordLookup {
        zone_id: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CheckError {
    /// Numeric process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            CheckError::Credentials(_) => EXIT_CREDENTIALS,
            CheckError::ZoneNotFound { .. } => EXIT_ZONE_NOT_FOUND,
            CheckError::ZoneLookup { .. }
            | CheckError::RecordLookup { .. }
            | CheckError::Other(_) => EXIT_FAILURE,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// User-facing message, including the full cause chain of `Other`
    pub fn report(&self) -> String {
        format!("{:#}", self)
    }
}
