use anyhow::Result;
use leto::config::LetoConfig;
use leto::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

fn main() -> Result<()> {
    // 1. Load the configuration (optional TOML path as the first argument).
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = LetoConfig::load(config_path.as_deref())?;

    // 2. Initialize structured logging.
    leto::logging::init(&config.log_level);

    // 3. Build the configured calendar and report its health.
    let calendar = config.calendar()?;
    info!(
        "{} v{} using calendar \"{}\".",
        leto::ENGINE_NAME,
        leto::VERSION,
        calendar.name()
    );
    if let Some(report) = calendar.check_correctness() {
        warn!("Calendar has defects:\n{}", report);
    }

    // 4. Decompose today and print every period.
    let days = calendar.days_since_epoch(&SystemClock)?;
    let periods = calendar.decompose(days)?;
    info!("Today is day {} since the epoch.", days);
    for period in &periods {
        let structure = period.structure().map_or("-", |s| s.name());
        info!(
            "[{}] number {} | absolute {} | starts at day {} | {}",
            period.period_type().name(),
            period.number(),
            period.absolute_number(),
            period
                .start_at_days_after_epoch()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            structure
        );
    }

    // 5. Add the periods back up.
    info!("Recomposed: {} days.", recompose(&periods)?);

    Ok(())
}
