use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ctc_engine::api::{AppState, create_router};
use ctc_engine::calculation::{contract_fee, decompose_with_rates};
use ctc_engine::config::ConfigLoader;
use ctc_engine::error::EngineError;
use ctc_engine::models::{CompensationPolicy, EngagementType, FixedAllowances};
use ctc_engine::statement::{annexure_file_name, render_text_with_fee};
use ctc_engine::telemetry::{self, TelemetryError};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ctc-engine",
    about = "Decompose annual CTC into a monthly pay structure",
    version
)]
struct Cli {
    /// Log level/filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Configuration directory holding engine.yaml and rates/
    #[arg(long, global = true, default_value = "./config/india")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service
    Serve(ServeArgs),
    /// Print the annexure for a single policy
    Annexure(AnnexureArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[derive(Args, Debug)]
struct AnnexureArgs {
    /// Employee display name
    #[arg(long)]
    name: String,
    /// Annual CTC
    #[arg(long)]
    ctc: Decimal,
    /// HRA as a percentage of basic
    #[arg(long, default_value = "0")]
    hra: Decimal,
    /// Monthly conveyance allowance
    #[arg(long, default_value = "0")]
    conveyance: Decimal,
    /// Monthly telephone allowance
    #[arg(long, default_value = "0")]
    telephone: Decimal,
    /// Monthly medical allowance
    #[arg(long, default_value = "0")]
    medical: Decimal,
    /// Include provident fund
    #[arg(long)]
    pf: bool,
    /// Include state insurance
    #[arg(long)]
    esi: bool,
    /// Professional tax override (0 uses the default rule)
    #[arg(long, default_value = "0")]
    professional_tax: Decimal,
    /// TDS percentage of gross
    #[arg(long, default_value = "0")]
    tds: Decimal,
    /// Bill as a contract engagement
    #[arg(long)]
    contract: bool,
    /// Date whose statutory rates apply (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    effective_date: Option<NaiveDate>,
    /// Write to this file instead of stdout; a directory gets the default file name
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;
    let loader = ConfigLoader::load(&cli.config)?;

    match cli.command {
        Command::Serve(args) => run_server(loader, args).await,
        Command::Annexure(args) => run_annexure(&loader, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(loader: ConfigLoader, args: ServeArgs) -> Result<(), CliError> {
    let jurisdiction = loader.metadata().name.clone();
    let app = create_router(AppState::new(loader));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, %jurisdiction, "compensation engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_annexure(loader: &ConfigLoader, args: AnnexureArgs) -> Result<(), CliError> {
    let policy = CompensationPolicy {
        annual_ctc: args.ctc,
        hra_percentage: args.hra,
        fixed_monthly_allowances: FixedAllowances {
            conveyance: args.conveyance,
            telephone: args.telephone,
            medical: args.medical,
        },
        include_provident_fund: args.pf,
        include_state_insurance: args.esi,
        professional_tax_override: args.professional_tax,
        tds_percent: args.tds,
        engagement: if args.contract {
            EngagementType::Contract
        } else {
            EngagementType::Employee
        },
    };
    policy.validate()?;

    let date = args
        .effective_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let rates = loader.rates_for(date)?;
    let result = decompose_with_rates(&policy, rates);
    if result.is_infeasible() {
        eprintln!("warning: fixed components exceed the CTC; special allowance clamped to 0");
    }

    let fee = contract_fee(policy.annual_ctc, policy.engagement, rates);
    let text = render_text_with_fee(&args.name, policy.annual_ctc, &result.breakdown, fee.as_ref());

    match args.out {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(annexure_file_name(&args.name))
            } else {
                path
            };
            std::fs::write(&path, &text)?;
            info!(path = %path.display(), "annexure written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
