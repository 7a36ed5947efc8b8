//! Invocation parameters, from CLI arguments with environment fallback.

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use std::env;

/// Ensure a Hydra room exists, optionally adding a member and posting a
/// message or file reference to it.
#[derive(Debug, Parser)]
#[command(name = "room-task", version)]
pub struct Cli {
    /// Room title to locate or create. Matching is by substring against
    /// existing room titles; the first match wins.
    #[arg(long)]
    pub room: String,

    /// Hydra access token. Falls back to the HYDRA_TOKEN environment
    /// variable.
    #[arg(long)]
    pub token: Option<String>,

    /// Text message to post to the room.
    #[arg(long)]
    pub text: Option<String>,

    /// File reference (URL) to post to the room.
    #[arg(long)]
    pub file: Option<String>,

    /// Email address of a member to add to the room.
    #[arg(long)]
    pub members: Option<String>,

    /// API base URL override.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Skip TLS certificate verification.
    #[arg(long)]
    pub insecure: bool,

    /// Verbose diagnostics on stderr.
    #[arg(long)]
    pub debug: bool,
}

/// Resolved parameters for one run.
#[derive(Debug, Clone)]
pub struct Params {
    pub room: String,
    pub token: String,
    pub text: Option<String>,
    pub file: Option<String>,
    pub members: Option<String>,
    pub base_url: Option<String>,
    pub insecure: bool,
    pub debug: bool,
}

impl Params {
    /// Resolve CLI arguments against the environment. Loads `.env` if
    /// present, then requires a token from `--token` or `HYDRA_TOKEN`.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let _ = dotenv();

        let token = match cli.token {
            Some(token) => token,
            None => env::var("HYDRA_TOKEN")
                .context("HYDRA_TOKEN must be set when --token is not given")?,
        };

        Ok(Self {
            room: cli.room,
            token,
            text: cli.text,
            file: cli.file,
            members: cli.members,
            base_url: cli.base_url,
            insecure: cli.insecure,
            debug: cli.debug,
        })
    }
}
