//! Jobby CLI - Show what a Jobby status service is currently running

mod logging;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use jobby_client::{ClientConfig, StatusClient};
use jobby_core::application::{FormatOutcome, FormatPolicy, StatusViewService};
use jobby_core::port::renderer::{DEFAULT_DATE_PATTERN, DEFAULT_TIME_PATTERN};
use jobby_core::port::{PatternRenderer, SystemTimeProvider, Zone};
use jobby_core::AppError;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "jobby")]
#[command(about = "Running jobs viewer for a Jobby status service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Status service URL
    #[arg(long, global = true, env = "JOBBY_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "JOBBY_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Show times in UTC instead of the local time zone
    #[arg(long, global = true, conflicts_with = "offset_minutes")]
    utc: bool,

    /// Show times at a fixed UTC offset (minutes east of UTC)
    #[arg(long, global = true, allow_negative_numbers = true)]
    offset_minutes: Option<i32>,

    /// strftime pattern for the date part
    #[arg(long, global = true, default_value = DEFAULT_DATE_PATTERN)]
    date_format: String,

    /// strftime pattern for the time part
    #[arg(long, global = true, default_value = DEFAULT_TIME_PATTERN)]
    time_format: String,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    /// Print view records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show currently running jobs with their estimated completion (default)
    Running,

    /// Show recorded runs of jobs whose name starts with a prefix
    History {
        /// Job name prefix (empty for all jobs)
        #[arg(default_value = "")]
        prefix: String,
    },
}

impl Cli {
    fn renderer(&self) -> Result<PatternRenderer> {
        let zone = if self.utc {
            Zone::Utc
        } else if let Some(minutes) = self.offset_minutes {
            Zone::offset_minutes(minutes)?
        } else {
            Zone::Local
        };

        let renderer = PatternRenderer::new(zone)
            .with_patterns(self.date_format.as_str(), self.time_format.as_str())?;
        Ok(renderer)
    }

    fn policy(&self) -> FormatPolicy {
        if self.strict {
            FormatPolicy::Strict
        } else {
            FormatPolicy::SkipInvalid
        }
    }
}

/// Tag network failures so the user sees "status unavailable" first
fn explain(err: AppError) -> anyhow::Error {
    if err.is_unavailable() {
        anyhow::Error::new(err).context("status unavailable")
    } else {
        anyhow::Error::new(err)
    }
}

fn report_skipped<V>(outcome: &FormatOutcome<V>) {
    if outcome.skipped.is_empty() {
        return;
    }
    eprintln!(
        "{}",
        format!("Skipped {} malformed record(s)", outcome.skipped.len()).yellow()
    );
    for err in &outcome.skipped {
        eprintln!("  {} {}", "•".yellow(), err);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging()?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let renderer = cli.renderer().context("Invalid display settings")?;
    let client = StatusClient::new(ClientConfig {
        base_url: cli.url.clone(),
        timeout: Duration::from_secs(cli.timeout_secs),
    })
    .context("Invalid status service settings")?;
    debug!(url = %client.base_url(), "Using status service");

    let service = StatusViewService::new(
        Arc::new(client),
        Arc::new(SystemTimeProvider),
        Arc::new(renderer),
    );

    match cli.command.as_ref().unwrap_or(&Commands::Running) {
        Commands::Running => {
            let outcome = service.running_jobs(cli.policy()).await.map_err(explain)?;
            report_skipped(&outcome);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.views)?);
            } else if outcome.views.is_empty() {
                println!("{}", "No running jobs".yellow());
            } else {
                println!("{}", "Running Jobs".cyan().bold());
                println!();
                println!("{}", render::running_table(&outcome.views));
                println!();
                let summary = render::running_summary(&outcome.views);
                if outcome.views.iter().any(|v| v.is_overdue()) {
                    println!("{}", summary.red());
                } else {
                    println!("{}", summary.green());
                }
            }
        }

        Commands::History { prefix } => {
            let outcome = service
                .history(prefix, cli.policy())
                .await
                .map_err(explain)?;
            report_skipped(&outcome);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.views)?);
            } else if outcome.views.is_empty() {
                println!("{}", format!("No recorded runs for {:?}", prefix).yellow());
            } else {
                println!("{}", format!("History for {:?}", prefix).cyan().bold());
                println!();
                println!("{}", render::history_table(&outcome.views));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_running_and_lenient() {
        let cli = Cli::try_parse_from(["jobby"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.policy(), FormatPolicy::SkipInvalid);
    }

    #[test]
    fn test_history_prefix_and_flags() {
        let cli = Cli::try_parse_from([
            "jobby",
            "history",
            "nightly",
            "--strict",
            "--utc",
            "--url",
            "http://status.local:9000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::History { ref prefix }) if prefix == "nightly"));
        assert_eq!(cli.policy(), FormatPolicy::Strict);
        assert_eq!(cli.url, "http://status.local:9000");
        assert_eq!(cli.renderer().unwrap().zone(), Zone::Utc);
    }

    #[test]
    fn test_negative_offset() {
        let cli = Cli::try_parse_from(["jobby", "--offset-minutes", "-300"]).unwrap();
        assert_eq!(
            cli.renderer().unwrap().zone(),
            Zone::offset_minutes(-300).unwrap()
        );
    }

    #[test]
    fn test_utc_conflicts_with_offset() {
        assert!(Cli::try_parse_from(["jobby", "--utc", "--offset-minutes", "60"]).is_err());
    }

    #[test]
    fn test_bad_time_format_rejected() {
        let cli = Cli::try_parse_from(["jobby", "--time-format", "%Q"]).unwrap();
        assert!(cli.renderer().is_err());
    }
}
