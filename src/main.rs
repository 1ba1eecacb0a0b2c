use autostats::app;
use autostats::config::DashboardConfig;

/// Main entry point for the dashboard server
///
/// Loads the dataset from its compiled-in source and serves the dashboard on
/// the fixed address from [`DashboardConfig`]. A dataset that cannot be
/// loaded aborts startup with a non-zero exit.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    if let Err(e) = app::run(config).await {
        log::error!("Dashboard stopped: {}", e);
        return Err(e);
    }

    Ok(())
}
