use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use folio_core::{application::AppUnitOfWork, database::PostgresDatabase};
use folio_server::{
    AppState,
    app::create_app,
    infra::{
        config::{Config, ConfigLoad, ConfigLoader},
        startup::{ProdStartupHooks, StartupHooks},
    },
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Folio site server with switchable color themes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to folio.toml (overrides FOLIO_CONFIG_PATH)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dotenv file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let database_url = config.database.primary_url.as_deref().context(
        "db migrate needs a PostgreSQL connection; set DATABASE_URL",
    )?;

    let pg = PostgresDatabase::new(
        database_url,
        config.database.max_connections,
    )
    .await
    .context("failed to connect to PostgreSQL for migration")?;
    pg.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = args.config.clone() {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = args.env_file.clone() {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    Ok(config)
}

async fn build_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    if config.uses_ephemeral_store() {
        warn!("Using in-memory theme settings; changes are lost on restart");
        let (unit_of_work, _repo) = AppUnitOfWork::in_memory();
        return Ok(AppState::new(config, Arc::new(unit_of_work), None));
    }

    let database_url = config
        .database
        .primary_url
        .as_deref()
        .context("no PostgreSQL connection configured")?;
    let pg = PostgresDatabase::new(
        database_url,
        config.database.max_connections,
    )
    .await
    .context("failed to connect to PostgreSQL")?;
    pg.initialize_schema()
        .await
        .context("failed to apply database migrations")?;

    let unit_of_work = Arc::new(AppUnitOfWork::from_postgres(&pg));
    Ok(AppState::new(config, unit_of_work, Some(Arc::new(pg))))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);

    // TLS terminates in front of this process, so the forwarded protocol is
    // the only way to tell whether a request arrived over HTTPS.
    if config.security.enforce_https
        && !config.dev_mode
        && !config.security.trust_proxy_headers
    {
        anyhow::bail!(
            "ENFORCE_HTTPS=true requires TRUST_PROXY_HEADERS=true. \
            Folio expects TLS to terminate at a reverse proxy and reads \
            X-Forwarded-Proto to detect HTTPS requests."
        );
    }

    let state = build_state(Arc::clone(&config)).await?;
    ProdStartupHooks.run(&state).await?;

    let addr: SocketAddr =
        format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("invalid server address")?;
    let router = create_app(state, false);

    info!(
        "Starting Folio (HTTP) on {}:{}",
        config.server.host, config.server.port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Folio stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_migrate_subcommand_parses() {
        let cli = Cli::try_parse_from(["folio-server", "db", "migrate"])
            .expect("valid args");
        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Migrate))));
    }

    #[test]
    fn serve_args_override_config_path_and_port() {
        let cli = Cli::try_parse_from([
            "folio-server",
            "--config",
            "/etc/folio/folio.toml",
            "--port",
            "8088",
            "--env-file",
            "deploy/folio.env",
        ])
        .expect("valid args");
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, Some(8088));
        assert_eq!(
            cli.serve.config.as_deref(),
            Some(std::path::Path::new("/etc/folio/folio.toml"))
        );
        assert_eq!(
            cli.serve.env_file.as_deref(),
            Some(std::path::Path::new("deploy/folio.env"))
        );
    }
}
