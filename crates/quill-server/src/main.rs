use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tracing::info;

use quill_db::Db;
use quill_server::{Config, app, app_state};

#[derive(Parser)]
#[command(name = "quill-server", about = "Minimal blog server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Clear the existing data and create new tables
    InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=debug,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let db = Db::new(&config.db_path);

    match cli.command.unwrap_or(Command::Serve) {
        Command::InitDb => {
            db.init()?;
            println!("Initialized the database.");
        }
        Command::Serve => {
            let state = app_state(db, &config.secret_key);
            let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
            info!("quill listening on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app(state)).await?;
        }
    }

    Ok(())
}
