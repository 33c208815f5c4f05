//! # Depot Console Application
//!
//! Interactive warehouse management console.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        depot (this binary)                          │
//! │                                                                     │
//! │  Operator ───► menu loop ───► depot-services ───► depot-core        │
//! │                    │                                                │
//! │                    ▼                                                │
//! │            exports/ backups/ on disk                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod config;
mod console;
mod input;
mod seed;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with menu output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    info!(
        export_dir = %config.export_dir.display(),
        backup_dir = %config.backup_dir.display(),
        low_stock_threshold = config.low_stock_threshold,
        "configuration loaded"
    );

    let mut app = App::new(config);
    app.run();
    Ok(())
}
