use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::system::middleware::request_logger::request_logger;
use crate::system::state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 COINS
        // ========================================
        .route(
            "/api/coins",
            get(handlers::a001_coin::list_all).post(handlers::a001_coin::create),
        )
        .route("/api/coins/search", get(handlers::a001_coin::search))
        .route(
            "/api/coins/advanced-search",
            get(handlers::a001_coin::advanced_search),
        )
        // Statistics
        .route(
            "/api/coins/stats/summary",
            get(handlers::a001_coin::summary_stats),
        )
        .route(
            "/api/coins/stats/by-year",
            get(handlers::a001_coin::stats_by_year),
        )
        .route(
            "/api/coins/stats/by-degree",
            get(handlers::a001_coin::stats_by_degree),
        )
        .route(
            "/api/coins/stats/by-material",
            get(handlers::a001_coin::stats_by_material),
        )
        .route(
            "/api/coins/stats/top-expensive",
            get(handlers::a001_coin::top_expensive),
        )
        .route(
            "/api/coins/:id",
            get(handlers::a001_coin::get_by_id)
                .put(handlers::a001_coin::update)
                .delete(handlers::a001_coin::delete),
        )
        .route(
            "/api/coins/:id/audit",
            get(handlers::a001_coin::get_audit_info),
        )
        // ========================================
        // A002 COLLECTIONS
        // ========================================
        .route(
            "/api/collections",
            get(handlers::a002_coin_collection::list_all)
                .post(handlers::a002_coin_collection::create),
        )
        .route(
            "/api/collections/:id",
            get(handlers::a002_coin_collection::get_by_id)
                .put(handlers::a002_coin_collection::update)
                .delete(handlers::a002_coin_collection::delete),
        )
        .route(
            "/api/collections/:id/coins",
            get(handlers::a002_coin_collection::list_coins),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
