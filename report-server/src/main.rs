use report_server::{build_router, config::Settings, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::load()?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!(
        "reports: {} users, {} invoice items, logo {}",
        settings.reports.user_count,
        settings.reports.invoice_items,
        if settings.logo.enabled { "on" } else { "off" }
    );

    let app = build_router(AppState::new(settings));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Report service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /pdf/users-report");
    tracing::info!("  - GET /pdf/invoice");
    tracing::info!("  - GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    // Records from report-core's `log` calls are forwarded by the subscriber.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,report_server=debug,report_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
