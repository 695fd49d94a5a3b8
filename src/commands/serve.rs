use anyhow::{Context, Result};

use reputation::config::Config;
use reputation::metrics;
use reputation::site::SiteServer;

/// Run the microsite until Ctrl-C
pub async fn site(config: Config, bind: Option<String>) -> Result<()> {
    let mut config = config;
    if let Some(bind) = bind {
        config.site.bind_address = bind;
    }

    if let Err(e) = metrics::init_metrics() {
        tracing::warn!(error = %e, "Metrics unavailable, continuing without them");
    }

    let server = SiteServer::new(&config).context("Failed to create microsite server")?;

    println!("Re:putation microsite");
    println!("=====================");
    println!("  Bind:    {}", server.bind_address());
    println!("  Origin:  {}", config.site.origin());
    println!("  API:     {}", config.api.public_base_url);
    println!(
        "  Cache:   hospital {}s, contents {}s",
        config.site.hospital_ttl_secs, config.site.content_ttl_secs
    );
    println!();

    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Microsite server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
