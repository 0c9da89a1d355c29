use tracing_subscriber::{EnvFilter, fmt};

use agrilink::config::AppConfig;
use agrilink::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env();
    server::serve(config).await
}
