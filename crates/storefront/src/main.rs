//! Studio Storefront - headless session driver.
//!
//! Stands in for the page: reads one JSON [`UiEvent`] per line on stdin and
//! writes the resulting [`StorefrontView`] as one JSON line on stdout. Logs go
//! to stderr.
//!
//! ```bash
//! echo '{"event":"add_to_cart","product_id":1,"size":"M"}' | studio-storefront
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use studio_core::Catalog;
use studio_storefront::config::LogFormat;
use studio_storefront::{Storefront, StorefrontConfig, StorefrontError, StorefrontView, UiEvent};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `EnvFilter`, writing to stderr.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "studio_storefront=info,studio_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Storefront session failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &StorefrontConfig) -> Result<(), StorefrontError> {
    match &config.storage_dir {
        Some(dir) => tracing::info!(dir = %dir.display(), key = %config.cart_key, "Using file storage"),
        None => tracing::info!("Using in-memory storage, cart will not survive exit"),
    }

    let mut storefront = Storefront::with_toast_duration(
        Arc::new(Catalog::studio()),
        config.cart_storage(),
        config.toast_duration,
    );

    let mut stdout = tokio::io::stdout();
    emit(&mut stdout, &storefront.view()).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<UiEvent>(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparseable event");
                continue;
            }
        };

        let view = match storefront.handle(event) {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(error = %e, "Event rejected");
                storefront.view()
            }
        };
        emit(&mut stdout, &view).await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

/// Write `view` as a single JSON line.
async fn emit(stdout: &mut tokio::io::Stdout, view: &StorefrontView) -> Result<(), StorefrontError> {
    let mut line = serde_json::to_vec(view).map_err(std::io::Error::from)?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
