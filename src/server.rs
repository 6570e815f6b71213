use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::api::{ApiRankRequest, ApiRankResponse, ApiReshuffleRequest, ApiReshuffleResponse};
use ad_ranker::config::RankingConfig;
use ad_ranker::ranking::reshuffle_stats;

#[derive(Clone)]
struct AppState {
    config: RankingConfig,
}

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    init_tracing();

    let (config, _) = RankingConfig::load(args.config.clone())?;
    let state = AppState { config };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/rank", post(rank_handler))
        .route("/api/reshuffle", post(reshuffle_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "ad-ranker listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ad_ranker=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRankRequest>,
) -> Json<ApiRankResponse> {
    let engine = request.engine(&state.config);
    let ads = engine.shuffle_ads_by_tier(&request.ads);
    debug!(count = ads.len(), "ranked flat listing");
    Json(ApiRankResponse {
        count: ads.len(),
        ads,
    })
}

async fn reshuffle_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiReshuffleRequest>,
) -> Json<ApiReshuffleResponse> {
    let engine = request.engine(&state.config);
    let listings = match request.behavior.as_ref() {
        Some(behavior) => engine.smart_reshuffle(&request.listings, behavior),
        None => engine.reshuffle_organized(&request.listings),
    };
    let stats = if request.include_stats.unwrap_or(false) {
        Some(reshuffle_stats(&request.listings, &listings))
    } else {
        None
    };
    debug!(
        subcategories = listings.len(),
        "reshuffled organized listings"
    );
    Json(ApiReshuffleResponse { listings, stats })
}
