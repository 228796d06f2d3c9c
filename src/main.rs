use std::sync::Arc;

use ironprojects::{
    app::{bind_addr, build_app, serve},
    config::AppConfig,
    db::PgStore,
    state::AppState,
    storage::Storage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ironprojects=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);

    let store = Arc::new(PgStore::connect(&config).await?);
    store.migrate().await;

    let storage = Arc::new(Storage::new(&config.storage, "us-east-1").await?);

    let state = AppState::from_parts(store.clone(), config, storage);
    let app = build_app(state)?;

    serve(app, bind_addr()?).await?;

    store.close().await;
    Ok(())
}
