//! Safety Router CLI - probe the scoring backend and the hotspot dataset.

use clap::Parser;
use sr_core::config::{API_URL_VAR, DEFAULT_API_URL};

#[derive(Parser)]
#[command(
    name = "sr-cli",
    version,
    about = "Safety Router backend and data toolkit"
)]
struct Cli {
    /// Base URL of the scoring backend
    #[arg(long, global = true, env = API_URL_VAR, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: sr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using backend {}", cli.api_url);
    sr_cmd::run(cli.command, &cli.api_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn box_accepts_negative_longitudes() {
        let cli = Cli::try_parse_from([
            "sr-cli",
            "--api-url",
            "http://scores.test",
            "box",
            "--p1",
            "33.7,-84.4",
            "--p2",
            "32.0,-81.0",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://scores.test");
        assert!(matches!(cli.command, sr_cmd::Command::BoundingBox { .. }));
    }
}
