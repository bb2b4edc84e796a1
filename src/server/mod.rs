//! HTTP routes for the dashboard
//!
//! Thin JSON handlers over [`MarketService`]. A provider error that the cache
//! could not absorb becomes a 500 with an error body, and malformed query
//! strings become a 400 with the same body shape.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::cache::CacheStats;
use crate::client::MarketDataProvider;
use crate::client::models::{CoinDetail, CoinMarket, GlobalStats, MarketChart, SearchResults};
use crate::error::{ConfigError, Error, ProviderError, Result};
use crate::market::{CoinId, HistoryRange, Interval, MarketService, Overview};

type SharedService<P> = Arc<MarketService<P>>;

/// Error body returned to the browser
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    /// Status the provider answered with, when it answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

/// Failure of a route handler
#[derive(Debug)]
pub enum RouteError {
    BadRequest(String),
    Provider(ProviderError),
}

impl From<ProviderError> for RouteError {
    fn from(err: ProviderError) -> Self {
        RouteError::Provider(err)
    }
}

impl From<Error> for RouteError {
    fn from(err: Error) -> Self {
        match err {
            Error::Provider(e) => RouteError::Provider(e),
            other => RouteError::BadRequest(other.to_string()),
        }
    }
}

impl From<QueryRejection> for RouteError {
    fn from(rejection: QueryRejection) -> Self {
        RouteError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RouteError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    upstream_status: None,
                },
            ),
            RouteError::Provider(err) => {
                if err.is_rate_limited() {
                    log::warn!("Rate limited on a key with nothing cached: {}", err);
                } else {
                    log::error!("Provider failure with no cached fallback: {}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        upstream_status: err.status(),
                        error: err.to_string(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

type RouteResult<T> = std::result::Result<Json<T>, RouteError>;

#[derive(Debug, Deserialize)]
struct CoinsQuery {
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    days: Option<String>,
    interval: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    cache: CacheStats,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    cleared: usize,
    cache: CacheStats,
}

async fn global_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
) -> RouteResult<GlobalStats> {
    Ok(Json(svc.global_stats().await?))
}

async fn coins_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
    params: std::result::Result<Query<CoinsQuery>, QueryRejection>,
) -> RouteResult<Vec<CoinMarket>> {
    let Query(params) = params?;
    let page = params.page.unwrap_or(1);
    if page == 0 {
        return Err(RouteError::BadRequest("page starts at 1".to_string()));
    }
    Ok(Json(svc.coins(page).await?))
}

async fn coin_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
    Path(id): Path<String>,
) -> RouteResult<CoinDetail> {
    let id = CoinId::parse(&id)?;
    Ok(Json(svc.coin(&id).await?))
}

async fn history_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
    Path(id): Path<String>,
    params: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> RouteResult<MarketChart> {
    let Query(params) = params?;
    let id = CoinId::parse(&id)?;
    let range = match params.days.as_deref() {
        Some(days) => days.parse::<HistoryRange>()?,
        None => HistoryRange::default(),
    };
    let interval = Interval::parse_opt(params.interval.as_deref())?;
    Ok(Json(svc.history(&id, range, interval).await?))
}

async fn search_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
    params: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> RouteResult<SearchResults> {
    let Query(params) = params?;
    if params.q.trim().is_empty() {
        return Err(RouteError::BadRequest("q must not be empty".to_string()));
    }
    Ok(Json(svc.search(&params.q).await?))
}

async fn overview_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
) -> RouteResult<Overview> {
    Ok(Json(svc.overview().await?))
}

async fn health_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: svc.cache().stats(),
    })
}

async fn clear_cache_handler<P: MarketDataProvider + 'static>(
    State(svc): State<SharedService<P>>,
) -> Json<ClearResponse> {
    let cleared = svc.cache().clear();
    log::info!("Cleared {} cached responses", cleared);
    Json(ClearResponse {
        cleared,
        cache: svc.cache().stats(),
    })
}

/// Build the API router around a shared service
pub fn router<P: MarketDataProvider + 'static>(service: SharedService<P>) -> Router {
    Router::new()
        .route("/api/global", get(global_handler::<P>))
        .route("/api/coins", get(coins_handler::<P>))
        .route("/api/coins/:id", get(coin_handler::<P>))
        .route("/api/coins/:id/history", get(history_handler::<P>))
        .route("/api/search", get(search_handler::<P>))
        .route("/api/overview", get(overview_handler::<P>))
        .route("/api/health", get(health_handler::<P>))
        .route("/api/cache", delete(clear_cache_handler::<P>))
        .with_state(service)
}

/// Serve the API until Ctrl-C
pub async fn serve<P: MarketDataProvider + 'static>(
    bind: &str,
    service: SharedService<P>,
) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("Invalid bind address '{}': {}", bind, e)))?;

    let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => {
            Error::Other(format!("Failed to bind to {}: address already in use", addr))
        }
        _ => Error::Other(format!("Failed to bind to {}: {}", addr, e)),
    })?;

    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Received shutdown signal");
}
