use clap::Parser;

use books_api::interface::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing();

    books_api::interface::http::run(config).await
}

/// RUST_LOG 未指定時は books_api を info、tower_http のリクエストログを debug で出す。
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("books_api=info,tower_http=debug,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
