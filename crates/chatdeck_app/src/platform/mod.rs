mod app;
mod config;
mod effects;
mod ui;

use anyhow::Context;
use chatdeck_engine::ChatEngine;
use chatdeck_logging::{chat_info, chat_warn};

use crate::cli::Cli;
use app::Controller;
use config::AppConfig;

pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    let loaded = config::load_config(&cli.config);
    let mut config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    config.apply_cli(&cli);

    chatdeck_logging::initialize(config.log, config.level_filter());
    match loaded {
        Ok(Some(_)) => chat_info!("Loaded config from {:?}", cli.config),
        Ok(None) => chat_info!("Config file {:?} not found; using defaults", cli.config),
        Err(err) => chat_warn!("{}; using defaults", err),
    }

    let connector = config
        .build_connector()
        .context("failed to set up the chat feed")?;
    let engine = ChatEngine::new(connector, config.poll_settings());
    let controller = Controller::start(engine);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let addr = listener.local_addr()?;
    chat_info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, ui::routes::router(controller))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dashboard server failed")?;

    chat_info!("Dashboard shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        chat_warn!("Failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
}
