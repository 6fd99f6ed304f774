//! El País opinion scraper - parallel grid runner
//!
//! Launches one scrape task per capability target, waits for all of them,
//! and prints a completion notice. Credentials come from the environment:
//! - `BS_USER` - BrowserStack username
//! - `BS_KEY`  - BrowserStack access key

use futures::future::join_all;
use tracing::{error, info};

use elpais_scraper::capabilities::capability_matrix;
use elpais_scraper::config::GridConfig;
use elpais_scraper::scrape::run_scrape_task;

#[tokio::main]
async fn main() {
    elpais_scraper::init_logging();

    // Fail-fast: no remote session opens without both credentials.
    let grid = match GridConfig::from_env() {
        Ok(grid) => grid,
        Err(e) => {
            error!("{}", e);
            error!("Export BS_USER and BS_KEY before running");
            std::process::exit(1);
        }
    };
    info!("Credentials loaded from environment");

    let targets = capability_matrix();
    let total = targets.len();
    info!("Starting {} parallel scrape tasks on BrowserStack...", total);

    let mut handles = Vec::with_capacity(total);
    for target in targets {
        let grid = grid.clone();
        handles.push(tokio::spawn(async move {
            run_scrape_task(&grid, target).await
        }));
    }

    // Single barrier: every task finishes, pass or fail, before the
    // completion notice.
    for result in join_all(handles).await {
        if let Err(e) = result {
            error!("Scrape task panicked: {}", e);
        }
    }

    info!("All {} scrape tasks have completed", total);
    info!("Check the Automate dashboard for results and videos");
}
