use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use b12_submit::config::{Config, DEFAULT_ENDPOINT};
use b12_submit::payload::SystemClock;
use b12_submit::submitter::Submitter;
use b12_submit::transport::ReqwestTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config; a missing variable aborts here, before any request
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing on stderr so stdout carries only the submission report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .with_writer(std::io::stderr)
        .init();

    let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))
        .expect("Failed to build HTTP client");
    let submitter = Submitter::new(transport, DEFAULT_ENDPOINT);

    let code = submitter
        .run(
            &config,
            &SystemClock,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )
        .await;

    ExitCode::from(code)
}
