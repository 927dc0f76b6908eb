//! Formcraft CLI and REST API entry point.
//!
//! Binary name: `formcraft`
//!
//! Parses CLI arguments, initializes tracing, database and services, then
//! dispatches to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,formcraft=debug,formcraft_core=debug,formcraft_infra=debug",
        _ => "trace",
    };
    formcraft_observe::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    formcraft_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Commands that don't need app state
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "formcraft", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Extract { file } => {
            return cli::form::extract(file.as_deref(), cli.json).await;
        }
        _ => {}
    }

    // Initialize application state (config, DB, services)
    let state = AppState::init(&cli.model.overrides()).await?;

    match cli.command {
        Commands::Generate { description, owner } => {
            cli::form::generate_form(&state, &owner.owner, description, cli.json).await?;
        }

        Commands::List {
            owner,
            published,
            drafts,
            limit,
        } => {
            let published = match (published, drafts) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cli::form::list_forms(&state, &owner.owner, published, limit, cli.json).await?;
        }

        Commands::Show { id, owner } => {
            cli::form::show_form(&state, &owner.owner, &id, cli.json).await?;
        }

        Commands::Publish { id, owner } => {
            cli::form::set_published(&state, &owner.owner, &id, true, cli.json).await?;
        }

        Commands::Unpublish { id, owner } => {
            cli::form::set_published(&state, &owner.owner, &id, false, cli.json).await?;
        }

        Commands::Submissions { id, owner, limit } => {
            cli::form::list_submissions(&state, &owner.owner, &id, limit, cli.json).await?;
        }

        Commands::Status { owner } => {
            cli::status::status(&state, &owner.owner, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Formcraft API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}/api/v1")).cyan()
            );
            println!(
                "  {} {} via {}",
                console::style("Model:").dim(),
                console::style(&state.config.model.name).cyan(),
                console::style(&state.config.model.endpoint).dim()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let db_pool = state.db_pool.clone();
            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            db_pool.close().await;
            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } | Commands::Extract { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
