//! `scenario-analyzer` - terminal client for the scenario analysis service

mod config;
mod form;
mod logging;
mod output;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::{AppConfig, OutputFormat};
use form::FormSession;
use scenario_client::HttpTransport;
use scenario_core::{ConstraintList, RequestController, ScenarioInput, SubmissionState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

fn cli() -> Command {
    Command::new("scenario-analyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Describe a scenario and its constraints, get an AI analysis back")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .help("Analysis endpoint URL"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (none by default)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .global(true)
                .value_parser(OutputFormat::NAMES)
                .help("Result output format"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
        .subcommand(Command::new("form").about("Edit and submit a scenario interactively (default)"))
        .subcommand(
            Command::new("analyze")
                .about("Submit one scenario and print the analysis")
                .arg(
                    Arg::new("scenario")
                        .long("scenario")
                        .short('s')
                        .required(true)
                        .help("Scenario description"),
                )
                .arg(
                    Arg::new("constraint")
                        .long("constraint")
                        .short('k')
                        .action(ArgAction::Append)
                        .help("Constraint; repeat for several"),
                ),
        )
}

/// File config with command-line overrides applied
fn resolve_config(matches: &ArgMatches) -> anyhow::Result<AppConfig> {
    let path = matches.get_one::<PathBuf>("config");
    let mut config = AppConfig::load_or_default(path.map(PathBuf::as_path))?;

    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(secs) = matches.get_one::<u64>("timeout-secs") {
        config = config.with_timeout_secs(*secs);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config = config.with_output(format.parse()?);
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;
    logging::init(&config.log_filter, matches.get_flag("log-json"))?;

    let transport =
        HttpTransport::new(&config.client).context("invalid analysis endpoint configuration")?;
    tracing::debug!(endpoint = %transport.endpoint(), "client configured");

    match matches.subcommand() {
        Some(("analyze", args)) => {
            let scenario = args.get_one::<String>("scenario").cloned().unwrap_or_default();
            let constraints: ConstraintList = args
                .get_many::<String>("constraint")
                .into_iter()
                .flatten()
                .cloned()
                .collect();
            let input = ScenarioInput::new()
                .with_scenario(scenario)
                .with_constraints(constraints);

            if let Err(e) = input.check_required() {
                eprintln!("Cannot submit: {e}");
                std::process::exit(2);
            }

            let mut controller = RequestController::new();
            match controller.submit(&transport, &input).await {
                SubmissionState::Failed(message) => {
                    eprintln!("Error: {message}");
                    std::process::exit(1);
                }
                state => print!("{}", output::render(state, config.output)?),
            }
        }
        _ => {
            let mut session = FormSession::new(std::io::stdout(), config.output);
            let stdin = BufReader::new(tokio::io::stdin());
            form::run(stdin, &mut session, Arc::new(transport)).await?;
        }
    }

    Ok(())
}
