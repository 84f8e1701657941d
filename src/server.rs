//! HTTP boundary: GraphQL over axum.

use crate::graphql::{error_status, AppSchema};
use crate::utils::error::Result;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Create the router; GraphiQL is served on `GET /graphql` when enabled.
pub fn router(schema: AppSchema, graphiql: bool) -> Router {
    let graphql_route = if graphiql {
        get(graphiql_page).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, graphql_route)
        .route("/health", get(health))
        .with_state(schema)
}

async fn graphiql_page() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn health() -> &'static str {
    "ok"
}

/// Errors flagged with a 404 status (missing or ambiguous lookups) turn the
/// whole response into a 404; everything else is answered with 200.
async fn graphql_handler(State(schema): State<AppSchema>, req: GraphQLRequest) -> impl IntoResponse {
    let response = schema.execute(req.into_inner()).await;

    let status = response
        .errors
        .iter()
        .find_map(error_status)
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    if status != StatusCode::OK {
        tracing::info!(
            "GraphQL request failed with {}: {}",
            status,
            response
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    (status, GraphQLResponse::from(response))
}

pub async fn serve(addr: SocketAddr, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 GraphQL endpoint listening on http://{}{}", addr, GRAPHQL_PATH);

    serve_until(listener, app, shutdown_signal()).await
}

/// Serve until `shutdown` resolves; in-flight requests finish before returning.
pub async fn serve_until<F>(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: F,
) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
