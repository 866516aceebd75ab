//
//  tonicpow
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod advertiser;
mod campaign;
mod config;
mod conversion;
mod goal;
mod link;
mod rate;

pub use advertiser::AdvertiserCommand;
pub use campaign::CampaignCommand;
pub use config::ConfigCommand;
pub use conversion::ConversionCommand;
pub use goal::GoalCommand;
pub use link::LinkCommand;
pub use rate::RateCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{Error, SessionService, TonicPowClient};
use crate::config::Config;
use crate::exit_codes;
use crate::output::{OutputFormat, OutputWriter};

/// tpow - Work with the TonicPow API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "tpow",
    version,
    about = "Work with the TonicPow API from the command line",
    long_about = "tpow is a CLI for the TonicPow advertising API.\n\n\
                  It brings campaigns, goals, links, conversions and rates to your terminal.",
    propagate_version = true,
    after_help = "Use 'tpow <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API environment (live, staging, development)
    #[arg(long, short = 'e', global = true)]
    pub environment: Option<String>,

    /// API key, overriding the config file and TONICPOW_API_KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the config file and applies environment variables, then flags.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        config.apply_env();
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config.client.api_key = Some(key.to_string());
        }
        if let Some(environment) = &self.environment {
            config.client.environment = environment.clone();
        }
        Ok(config)
    }

    /// Builds an API client, opening a session first when configured to.
    pub async fn client(&self) -> Result<TonicPowClient> {
        let config = self.config()?;
        if config.client.api_key.is_none() {
            return Err(Error::Configuration(
                "no API key set; export TONICPOW_API_KEY or run 'tpow config set api_key <key>'"
                    .to_string(),
            )
            .into());
        }

        let client = TonicPowClient::new(config.client_options())?;
        debug!(environment = %client.environment(), "client ready");

        if config.client.session_auth {
            client.create_session().await?;
        }
        Ok(client)
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View and list campaigns
    #[command(visible_alias = "c")]
    Campaign(CampaignCommand),

    /// View advertiser profiles
    #[command(visible_alias = "adv")]
    Advertiser(AdvertiserCommand),

    /// View campaign goals
    Goal(GoalCommand),

    /// Check tracking links
    Link(LinkCommand),

    /// View conversions
    Conversion(ConversionCommand),

    /// Show the current exchange rate for a currency
    Rate(RateCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// Maps a command failure to a process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let Some(api_error) = err.downcast_ref::<Error>() else {
        return exit_codes::ERROR;
    };
    match api_error {
        Error::MissingField(_) | Error::Validation(_) | Error::InvalidSortField(_) => {
            exit_codes::USAGE
        }
        Error::Configuration(_) => exit_codes::AUTH_ERROR,
        Error::Transport(_) => exit_codes::SERVICE_ERROR,
        Error::Decode(_) => exit_codes::ERROR,
        Error::Api(api) => match api.status_code {
            401 | 403 => exit_codes::AUTH_ERROR,
            404 => exit_codes::NOT_FOUND,
            500..=599 => exit_codes::SERVICE_ERROR,
            _ => exit_codes::ERROR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn api_error(status_code: u16) -> anyhow::Error {
        Error::Api(Box::new(ApiError {
            status_code,
            ..ApiError::default()
        }))
        .into()
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::try_parse_from(["tpow", "--json", "-e", "staging", "campaign", "stats"])
            .unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.environment.as_deref(), Some("staging"));
        assert!(matches!(cli.command, Commands::Campaign(_)));
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["tpow", "repo", "list"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Error::MissingField("id").into()), exit_codes::USAGE);
        assert_eq!(
            exit_code(&Error::InvalidSortField("x".into()).into()),
            exit_codes::USAGE
        );
        assert_eq!(
            exit_code(&Error::Configuration("no key".into()).into()),
            exit_codes::AUTH_ERROR
        );
        assert_eq!(exit_code(&api_error(401)), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code(&api_error(404)), exit_codes::NOT_FOUND);
        assert_eq!(exit_code(&api_error(503)), exit_codes::SERVICE_ERROR);
        assert_eq!(exit_code(&api_error(400)), exit_codes::ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), exit_codes::ERROR);
    }
}
