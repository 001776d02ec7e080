// Main entry point - Dependency injection and hosting shell
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

use std::sync::Arc;

use crate::application::enhancer::PageEnhancer;
use crate::infrastructure::config::load_enhancer_config;
use crate::infrastructure::http_gateway::HttpStatsGateway;
use crate::presentation::virtual_page::VirtualPage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_enhancer_config()?;

    // Create the API gateway (infrastructure layer)
    let gateway = Arc::new(HttpStatsGateway::new(&config.api));

    // Headless stand-in for the server-rendered dashboard page
    let page = Arc::new(VirtualPage::dashboard_template());

    // Create the enhancer (application layer) and run the page-ready pass
    let enhancer = Arc::new(PageEnhancer::new(
        page.clone(),
        gateway,
        config.refresh.interval(),
    ));
    let summary = enhancer.clone().enhance();

    println!(
        "Enhanced dashboard page: {} cards, {} tooltips, {} ajax forms, stats {}",
        summary.cards_faded,
        summary.tooltips_installed,
        summary.ajax_forms_bound,
        if summary.dashboard_wired { "wired" } else { "absent" },
    );

    // Keep refreshing until the shell is asked to shut down
    tokio::signal::ctrl_c().await?;
    enhancer.dispose().await;

    if let Some(at) = enhancer.last_applied() {
        tracing::info!("Last stats refresh applied at {}", at.to_rfc3339());
    }

    Ok(())
}
