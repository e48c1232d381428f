use std::env;

use tokio::net::TcpListener;

use meeplelog_server::{bootstrap, config::load_config, jobs, observability};

/// How the configuration path was determined.
#[derive(Debug, Clone, Copy)]
enum ConfigSource {
    /// From --config CLI argument
    CliArgument,
    /// From MEEPLELOG_CONFIG environment variable
    EnvironmentVariable,
    /// Default path (meeplelog.toml), if present
    Default,
    /// No file at all; built-in defaults + environment
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CliArgument => write!(f, "CLI argument (--config)"),
            Self::EnvironmentVariable => write!(f, "environment variable (MEEPLELOG_CONFIG)"),
            Self::Default => write!(f, "default path"),
            Self::BuiltIn => write!(f, "built-in defaults"),
        }
    }
}

fn resolve_config_path() -> (Option<String>, ConfigSource) {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config"
            && let Some(path) = args.next()
        {
            return (Some(path), ConfigSource::CliArgument);
        }
    }

    if let Ok(path) = env::var("MEEPLELOG_CONFIG") {
        return (Some(path), ConfigSource::EnvironmentVariable);
    }

    if std::path::Path::new("meeplelog.toml").exists() {
        return (Some("meeplelog.toml".to_string()), ConfigSource::Default);
    }

    (None, ConfigSource::BuiltIn)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; missing files are fine for deployments that
    // configure through real environment variables.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    let (config_path, source) = resolve_config_path();
    let config = match load_config(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    observability::init_tracing(&config.logging.level);
    tracing::info!(
        path = config_path.as_deref().unwrap_or("<none>"),
        source = %source,
        "Configuration loaded"
    );

    let addr = config
        .server
        .socket_addr()
        .map_err(|e| anyhow::anyhow!(e))?;
    let sweep_interval = config.server.sweep_interval_minutes;
    let retention_days = config.auth.retention_days;
    let bootstrap_config = config.bootstrap.clone();

    let state = meeplelog_server::build_state(config).await?;

    bootstrap::ensure_admin_user(&state.users, &bootstrap_config).await?;

    jobs::spawn_retention_sweep(state.recovery.clone(), retention_days, sweep_interval);

    let app = meeplelog_server::build_router(state);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "meeplelog server listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
