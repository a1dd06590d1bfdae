//! CLI for the PhishGuard URL checker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use phishguard_core::config::{self, Presentation};

use commands::{run_check, run_completions, run_config_path, run_manpage, CheckOptions};

/// Top-level CLI for PhishGuard.
#[derive(Debug, Parser)]
#[command(name = "phishguard")]
#[command(
    about = "PhishGuard: check a link against a URL reputation service before opening it",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Look up a URL and show whether it is genuine.
    Check {
        /// Absolute URL to check (e.g. a link shared from another application).
        url: Option<String>,

        /// Open the link automatically when it is judged genuine.
        #[arg(long, conflicts_with = "manual")]
        auto_redirect: bool,

        /// Always ask before opening the link.
        #[arg(long)]
        manual: bool,

        /// Print the result as JSON and do not offer to open the link.
        #[arg(long)]
        json: bool,

        /// Exit with status 3 when the link is judged malicious.
        #[arg(long)]
        strict: bool,

        /// Answer "yes" to the proceed prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Print the path of the configuration file.
    ConfigPath,

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Render the man page (roff) on stdout.
    Manpage,
}

impl CliCommand {
    /// Returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Check {
                url,
                auto_redirect,
                manual,
                json,
                strict,
                yes,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let presentation = if auto_redirect {
                    Some(Presentation::AutoRedirect)
                } else if manual {
                    Some(Presentation::Manual)
                } else {
                    None
                };
                let opts = CheckOptions {
                    presentation,
                    json,
                    strict,
                    assume_yes: yes,
                };
                run_check(&cfg, url.as_deref(), &opts).await
            }
            CliCommand::ConfigPath => run_config_path().map(|()| 0),
            CliCommand::Completions { shell } => run_completions(shell).map(|()| 0),
            CliCommand::Manpage => run_manpage().map(|()| 0),
        }
    }
}

#[cfg(test)]
mod tests;
