//! VitaPrev command-line client
//!
//! Signs in with `VITAPREV_EMAIL` / `VITAPREV_PASSWORD`, loads one view and
//! prints it as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitaprev_client::api::{HealthApi, ReqwestHealthApi};
use vitaprev_client::cli::Command;
use vitaprev_client::config::ClientConfig;
use vitaprev_client::error::ClientResult;
use vitaprev_client::services::{
    AuthService, DashboardService, GoalsService, HistoryQuery, MealsService, MetricsService,
};
use vitaprev_client::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ClientConfig::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args[..]).map_err(anyhow::Error::msg)?;

    let email = std::env::var("VITAPREV_EMAIL").context("VITAPREV_EMAIL is not set")?;
    let password = std::env::var("VITAPREV_PASSWORD").context("VITAPREV_PASSWORD is not set")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        ?command,
        "Starting VitaPrev client"
    );

    let api = ReqwestHealthApi::from_config(&config)?;
    let session = AuthService::signin(&api, &email, &password).await?;

    match run(&api, &session, &config, command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) if err.requires_logout() => {
            drop(session);
            warn!("Session rejected by the backend, signed out");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run(
    api: &dyn HealthApi,
    session: &Session,
    config: &ClientConfig,
    command: Command,
) -> ClientResult<serde_json::Value> {
    let today = Local::now().date_naive();
    let value = match command {
        Command::Dashboard => serde_json::to_value(DashboardService::load(api, session, today).await?)?,
        Command::Metrics { page } => {
            let query = HistoryQuery {
                page,
                per_page: config.history.page_size,
                ..HistoryQuery::default()
            };
            serde_json::to_value(MetricsService::history(api, session, &query).await?)?
        }
        Command::Meals { filter } => {
            serde_json::to_value(MealsService::day(api, session, today, filter).await?)?
        }
        Command::Goals { filter } => serde_json::to_value(GoalsService::list(api, session, filter).await?)?,
        Command::Advice => serde_json::to_value(api.latest_advice(session).await?)?,
    };
    Ok(value)
}

/// Initialize tracing/logging on stderr
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if ClientConfig::is_production() {
            "vitaprev_client=info,vitaprev=info".into()
        } else {
            "vitaprev_client=debug,vitaprev=debug,reqwest=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if ClientConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
