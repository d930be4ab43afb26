#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::sync::Arc;

use args::{Args, Command};
use clap::Parser;
use pokechat_agent::Agent;
use pokechat_config::Config;
use pokechat_tools::ToolServer;
use pokechat_web::WebServer;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    let _telemetry_guard = pokechat_telemetry::init(&config.telemetry, "info")?;

    tracing::info!(config_path = %args.config.display(), "starting pokechat");

    match args.command {
        Command::Tools => {
            let mut server = ToolServer::new(&config.tools);
            if let Some(listen) = args.listen {
                server = server.with_listen_address(listen);
            }
            server.serve(shutdown_token()).await?;
        }
        Command::Web => {
            config.agent.llm.require_api_key()?;
            let agent = Arc::new(Agent::from_config(&config.agent));

            let mut server = WebServer::new(&config.web, agent);
            if let Some(listen) = args.listen {
                server = server.with_listen_address(listen);
            }
            server.serve(shutdown_token()).await?;
        }
        Command::Ask { message } => {
            config.agent.llm.require_api_key()?;
            let reply = Agent::from_config(&config.agent).respond(&message).await?;
            println!("{reply}");
        }
    }

    tracing::info!("pokechat stopped");
    Ok(())
}

/// Token cancelled on the first shutdown signal
fn shutdown_token() -> CancellationToken {
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        token.cancel();
    });

    shutdown
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
