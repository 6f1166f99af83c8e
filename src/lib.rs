//! A dashboard backend for a store's product sales.
//!
//! The record collection is seeded from a third-party JSON feed, kept in a
//! local JSON file and served through a small JSON API: a searchable listing
//! plus monthly statistics, price range counts and category counts. The same
//! views are rendered as an HTML dashboard page.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod api;
mod app_state;
mod dashboard;
mod endpoints;
mod error;
mod html;
mod logging;
mod month;
mod not_found;
mod pagination;
mod query;
mod record;
mod routing;
mod seed;
mod store;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, DEFAULT_COMBINED_TIMEOUT};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use record::{Record, RecordId, SaleDate};
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, HttpSeedProvider, SeedProvider};
pub use store::{InMemoryStore, JsonFileStore, RecordStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
