//! # Quickcalc Web Server
//!
//! Serves the calculator API, the site map and the algebra solver over HTTP.
//! Page markup and styling live in the front end; this binary only answers
//! JSON (and `sitemap.xml`).

mod error;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use calc_core::algebra::{AlgebraSolver, OpenAiCompatBackend};
use calc_core::{CalcError, SiteConfig};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::routes::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "Quickcalc web server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "QUICKCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn tracing_init(verbose: u8) {
    let default = match verbose {
        0 => "calc_web=info,calc_core=info,tower_http=info",
        1 => "calc_web=debug,calc_core=debug,tower_http=debug",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run(args: Args) -> Result<(), CalcError> {
    let mut config = SiteConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
        config.validate()?;
    }

    let backend = OpenAiCompatBackend::from_config(&config.model)?;
    let (model, url) = (backend.model().to_string(), backend.base_url().to_string());
    let solver = AlgebraSolver::new(Arc::new(backend));
    info!(backend = solver.backend_name(), %model, %url, "algebra backend configured");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| CalcError::config(format!("invalid listen address: {}", e)))?;

    let state = Arc::new(AppState { config, solver });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CalcError::config(format!("cannot bind {}: {}", addr, e)))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CalcError::Internal { message: format!("server error: {}", e) })
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_init(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
