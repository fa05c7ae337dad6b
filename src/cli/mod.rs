use crate::{
    config::{PlannerConfig, ServerConfig},
    schemas::inspect_plan,
    server::{self, AppState},
    types::PlanResponse,
    TripPlanner,
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("wandr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("AI travel planner: free-text trip requests in, structured itineraries out")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP service and frontend")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Bind address (or set HOST)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .help("Listen port (or set PORT)"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan one trip and print the JSON response")
                .arg(
                    Arg::new("message")
                        .help("Free-text travel request")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("api-key")
                        .short('k')
                        .long("api-key")
                        .value_name("KEY")
                        .help("Anthropic API key (or set ANTHROPIC_API_KEY)"),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Model name (or set WANDR_MODEL)"),
                )
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Also report where the plan misses its budget or day-count contract"),
                ),
        )
}

/// CLI entry point for the wandr binary
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let matches = command().get_matches();
    match matches.subcommand() {
        Some(("serve", sub)) => run_serve(sub).await,
        Some(("plan", sub)) => run_plan(sub).await,
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_serve(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut server_config = ServerConfig::from_env();
    if let Some(host) = matches.get_one::<String>("host") {
        server_config.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        server_config.port = *port;
    }

    let planner_config = PlannerConfig::from_env();
    info!(model = %planner_config.model, base_url = %planner_config.base_url, "starting wandr");

    server::serve(&server_config, AppState::from_config(&planner_config)).await
}

async fn run_plan(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = PlannerConfig::from_env();
    if let Some(key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(key.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }

    let message = matches
        .get_one::<String>("message")
        .map(String::as_str)
        .unwrap_or_default();
    let planner = TripPlanner::from_config(&config)?;

    let response = match planner.plan(message).await {
        Ok(response) => response,
        Err(err) => {
            error!(code = err.error_code(), "planning failed: {}", err);
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    if matches.get_flag("check") {
        eprintln!("\n{}", check_report(&response));
    }

    Ok(())
}

/// Human-readable `--check` summary: the resolved trip, then any contract misses.
fn check_report(response: &PlanResponse) -> String {
    let intent = response.resolved_intent();
    let mut lines = vec![format!(
        "{} for {} day(s): {:.0} {} total, {:.0} {} per person ({} traveller(s))",
        intent.destination,
        intent.duration_days,
        intent.total_budget,
        intent.currency,
        intent.budget_per_person(),
        intent.currency,
        intent.num_travellers,
    )];

    let issues = inspect_plan(response);
    if issues.is_empty() {
        lines.push("Plan meets its budget and day-count contract.".to_string());
    } else {
        lines.push("Plan issues:".to_string());
        lines.extend(issues.iter().map(|issue| format!("  - {}", issue)));
    }
    lines.join("\n")
}
