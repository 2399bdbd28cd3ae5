//! Application entry point for the growth model dashboard.
//!
//! This binary installs logging, loads the optional dashboard config and
//! hands everything else to [`Viewer`] from the `viewer` module.

mod viewer;

use growth_core::config::Config;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Environment variable holding the path of an optional TOML config.
const CONFIG_ENV: &str = "GROWTH_DASHBOARD_CONFIG";

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("growth_dashboard=info,growth_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

/// Reads the config named by [`CONFIG_ENV`], falling back to defaults.
fn load_config() -> Config {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Config::default();
    };

    match Config::from_file(&path) {
        Ok(cfg) => {
            info!(path = ?path, "loaded dashboard config");
            cfg
        }
        Err(err) => {
            warn!(path = ?path, %err, "using default dashboard config");
            Config::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    init_logger();
    let cfg = load_config();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Biological Growth Models",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
