use anyhow::Result;
use clap::Parser;
use hydra_client::HydraClient;
use room_task::config::{Cli, Params};
use room_task::{report, runner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::resolve(Cli::parse())?;

    // Diagnostics go to stderr; stdout is reserved for the report.
    let default_filter = if params.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut client = HydraClient::new(params.token.clone());
    if let Some(base_url) = &params.base_url {
        client = client.with_base_url(base_url.clone());
    }
    if params.insecure {
        client = client.danger_accept_invalid_certs(true)?;
    }

    let outcome = runner::run(&client, &params).await;
    let (line, code) = report::render(&outcome);
    println!("{line}");
    std::process::exit(code);
}
