mod api;
mod middleware;

use std::sync::Arc;

use phonecat_core::Lexicon;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = phonecat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let lexicon = match &config.lexicon_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading lexicon");
            phonecat_core::load_lexicon(path)?
        }
        None => Lexicon::default(),
    };

    let state = AppState {
        shop_data_dir: config.shop_data_dir.clone(),
        comparator_data_dir: config.comparator_data_dir.clone(),
        lexicon: Arc::new(lexicon),
    };
    let app = build_app(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        env = %config.env,
        addr = %config.bind_addr,
        shop_data_dir = %config.shop_data_dir.display(),
        comparator_data_dir = %config.comparator_data_dir.display(),
        "phonecat server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
