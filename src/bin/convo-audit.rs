//! The convo-audit executable prints every conversation stored in a Redis server.
//!
//! `convo-audit`
//!
//!     Connect to the store, scan for `<namespace>:conversations:<id>:messages` keys and print
//!     the messages of each conversation to STDOUT as it is found.
//!     All settings come from environment variables, see `convo-audit --help`.
//!     Print an error to STDERR and return a non-zero exit code if the configuration is invalid,
//!     the connection or authentication fails, or the scan fails part way through.
//!
//! `convo-audit -V`
//!
//!     Print the version.

use std::process::exit;

use clap::{crate_version, App};
use convo_audit::{audit, AuditError, Config};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// log level used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "warn";

const ENV_HELP: &str = "ENVIRONMENT:
    HOST               store hostname [default: localhost]
    PORT               store port [default: 6379]
    USER               username to authenticate with
    PASSWORD           password to authenticate with
    AUDIT_NAMESPACE    namespace of the conversation keys [default: *]
    RUST_LOG           log filter for STDERR diagnostics [default: warn]

    HOST, PORT, USER and PASSWORD may also be given with a REDIS_ prefix.";

fn main() {
    // configure a subscriber that will log messages to STDERR
    subscriber_config();

    App::new("convo-audit")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("prints the chat transcripts stored in a redis key-value store")
        .after_help(ENV_HELP)
        .get_matches();

    if let Err(e) = run() {
        debug!("audit failed: {:?}", e);
        eprintln!("Error: {}", e);
        exit(e.exit_code());
    }
}

fn run() -> Result<(), AuditError> {
    let config = Config::from_env()?;
    let summary = audit(&config)?;
    info!(
        "printed {} conversations ({} messages)",
        summary.conversations, summary.messages
    );
    Ok(())
}

/// configures a tracing subscriber that will log to STDERR, filtered by `RUST_LOG`
fn subscriber_config() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        // log to stderr, stdout carries the transcript
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
