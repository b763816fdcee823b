//! Application router configuration.

use axum::{
    Json, Router,
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_all_transactions_endpoint,
        get_statistics_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<T>(state: AppState<T>) -> Router
where
    T: TransactionStore + Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<T>).delete(delete_all_transactions_endpoint::<T>),
        )
        .route(endpoints::STATISTICS, get(get_statistics_endpoint::<T>))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
