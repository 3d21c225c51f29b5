use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use catalog_cli::CatalogCli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_log();
    let cli = CatalogCli::parse();
    catalog_cli::run(cli).await
}

fn init_log() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("CATALOG_LOG")
                .from_env_lossy(),
        )
        .init();
}
