//! Checkout runner entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use app::{App, AppError, Config, LogFormat};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(&config.log_level));
    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| AppError::Metrics(e.to_string()))?;

    let scenario_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(AppError::Usage)?;
    let scenario = app::load_scenario(&scenario_path)?;
    let app = App::from_config(&config)?;

    tracing::info!(
        scenario = %scenario_path.display(),
        user_id = %scenario.request.user_id,
        items = scenario.cart.len(),
        "placing order"
    );

    let order = tokio::select! {
        result = app.run_scenario(scenario) => result?,
        _ = signal::ctrl_c() => {
            tracing::info!("received SIGINT, abandoning order");
            return Err(AppError::Interrupted);
        }
    };

    for body in app.sent_confirmations() {
        tracing::debug!(%body, "confirmation email");
    }

    let json = serde_json::to_string_pretty(&order).map_err(AppError::Encode)?;
    println!("{json}");

    tracing::debug!(metrics = %metrics_handle.render(), "run metrics");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "checkout run failed");
            ExitCode::FAILURE
        }
    }
}
