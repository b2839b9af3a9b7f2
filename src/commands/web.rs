use anyhow::Result;
use tracing::info;

use tripstats::metrics::{init_metrics, initialize_stats_metrics, process_metrics_task};
use tripstats::web::{AppState, PgPool, start_web_server};

pub async fn handle_web(pool: PgPool, owner: String, interface: String, port: u16) -> Result<()> {
    init_metrics();
    initialize_stats_metrics();
    tokio::spawn(process_metrics_task());
    info!("Prometheus metrics available at /metrics");

    start_web_server(interface, port, AppState::new(pool, owner)).await
}
