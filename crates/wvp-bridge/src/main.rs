mod cli;
mod error;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wvp_bridge_api::PlatformClient;
use wvp_bridge_config::ConfigError;
use wvp_bridge_core::{Bridge, LogSink, MemoryVoucherStore};

use crate::cli::Cli;
use crate::error::StartupError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config_error = |source: ConfigError| StartupError::Config {
        path: cli.config.display().to_string(),
        source,
    };

    let config = wvp_bridge_config::load_config(&cli.config).map_err(config_error)?;
    let address: SocketAddr = match cli.listen.as_deref() {
        Some(raw) => raw.parse().map_err(|_| StartupError::ListenAddress {
            address: raw.to_owned(),
        })?,
        None => config.server_address().map_err(config_error)?,
    };

    let platform_settings = config.platform_settings().map_err(config_error)?;
    let platform = PlatformClient::new(&platform_settings, &config.platform_transport())
        .map_err(|source| StartupError::PlatformClient { source })?;

    if cli.check {
        println!("configuration OK: {}", cli.config.display());
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let bridge = Bridge::new(
        config.to_bridge_config(),
        platform,
        Arc::new(MemoryVoucherStore::new()),
        Arc::new(LogSink),
    )
    .with_cancellation(shutdown.child_token());

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })?;
    info!(
        %address,
        platform = %platform_settings.base_url,
        svcr_form = %config.form.svcr_path.display(),
        "wvp-bridge listening"
    );

    axum::serve(listener, server::router(Arc::new(bridge)))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .map_err(|source| StartupError::Serve { source })?;

    info!("wvp-bridge stopped");
    Ok(())
}

/// Resolves on Ctrl-C (or SIGTERM on Unix) and cancels in-flight remote calls.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown requested");
    shutdown.cancel();
}
