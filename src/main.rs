//! Cloudflare DNS Check
//!
//! Prints the DNS records of a Cloudflare zone, or the zones on the account
//! when no zone is given.
//!
//! # Usage
//! ```bash
//! export CF_API_KEY=... CF_API_EMAIL=ops@example.com
//!
//! # List zones
//! cf-check-dns
//!
//! # Show records, with info logging
//! cf-check-dns -v example.com
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use cf_check_dns::app;
use cf_check_dns::cli::Cli;
use cf_check_dns::error::EXIT_FAILURE;
use cf_check_dns::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    debug!("Parsed arguments: {:?}", cli.zone_name());

    match app::run(&cli, &mut io::stdout()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.report());
            eprintln!();
            err.exit_code()
        }
    }
}
