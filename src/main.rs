use anyhow::Context;
use ident::{
    api::routes::build_app,
    cli::{load_config, show_config, Cli, Commands},
    utils::{config::AppConfig, logging::init_tracing},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    let output = cli.output();

    let config = load_config(&output, &cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command.clone().unwrap_or(Commands::Serve) {
        Commands::Config { validate } => {
            show_config(&output, &config, validate)?;
            Ok(())
        }
        Commands::Serve => serve(config, &output).await,
    }
}

async fn serve(config: AppConfig, output: &ident::cli::output::Output) -> anyhow::Result<()> {
    init_tracing(&config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)
        .await
        .context("Failed to initialize application state")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    output.banner(&addr);
    tracing::info!(%addr, "ident-server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("ident-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
