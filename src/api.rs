//! REST API server for Votechain
//!
//! Exposes the chain, vote submission, integrity validation and aggregate
//! counters over HTTP. Every handler goes through the shared
//! [`VotingLedger`] lock: submissions take the write half for the whole
//! mine-and-append, everything else reads.

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{self, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use crate::blockchain::Block;
use crate::error::ChainError;
use crate::ledger::{SharedLedger, VotingLedger};
use crate::mempool::SubmitOutcome;
use crate::stats::ChainStats;
use crate::vote::{Vote, VoteRequest};

/// Shared API state
#[derive(Clone)]
pub struct Node {
    pub ledger: SharedLedger,
}

impl Node {
    pub fn new(ledger: VotingLedger) -> Self {
        Self {
            ledger: ledger.into_shared(),
        }
    }

    /// Build an API node over a ledger handle owned elsewhere.
    pub fn new_shared(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// Submit a vote. Mining runs on the blocking pool while the write lock
    /// is held, so readers wait but async workers stay free.
    pub async fn submit_vote(&self, vote: Vote) -> Result<SubmitOutcome, ApiError> {
        let mut guard = self.ledger.clone().write_owned().await;
        let outcome = tokio::task::spawn_blocking(move || guard.submit_vote(vote))
            .await
            .map_err(|e| ApiError::InternalError(format!("Mining task failed: {}", e)))??;
        Ok(outcome)
    }

    pub async fn chain(&self) -> Vec<Block> {
        self.ledger.read().await.snapshot().to_vec()
    }

    pub async fn is_valid(&self) -> bool {
        self.ledger.read().await.validate()
    }

    pub async fn stats(&self) -> ChainStats {
        self.ledger.read().await.report()
    }
}

// ============================================================================
// API Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BlockchainError(ChainError),
    InvalidInput(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BlockchainError(e) => {
                let status = match &e {
                    ChainError::InvalidVote(_) => StatusCode::BAD_REQUEST,
                    ChainError::MiningAborted(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %message, "api.error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        ApiError::BlockchainError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ChainResponse {
    pub blocks: Vec<Block>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub is_valid: bool,
}

// ============================================================================
// Middleware
// ============================================================================

/// Logs method, path, status and duration of every request.
async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "api.request"
    );

    response
}

// ============================================================================
// API Server
// ============================================================================

/// Build the API router with all endpoints
pub fn build_api_router(node: Arc<Node>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            http::Method::GET,
            http::Method::POST,
            http::Method::OPTIONS,
        ])
        .allow_headers(vec![http::header::CONTENT_TYPE]);

    Router::new()
        .route("/blockchain", get(get_blockchain))
        .route("/vote", post(submit_vote))
        .route("/validate", get(validate_blockchain))
        .route("/stats", get(get_stats))
        .route("/health", get(health_check))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(node)
}

/// Bind `addr` and serve until the process exits.
pub async fn run_api_server(
    node: Arc<Node>,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_api_router(node);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_blockchain(State(node): State<Arc<Node>>) -> Json<ChainResponse> {
    Json(ChainResponse {
        blocks: node.chain().await,
    })
}

async fn submit_vote(
    State(node): State<Arc<Node>>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<SubmitOutcome>, ApiError> {
    let Json(request) = payload?;
    let vote = request.into_vote()?;

    let outcome = node.submit_vote(vote).await?;
    if let SubmitOutcome::BlockMined(block) = &outcome {
        tracing::info!(index = block.index, hash = %block.hash, "Vote batch committed");
    }

    Ok(Json(outcome))
}

async fn validate_blockchain(State(node): State<Arc<Node>>) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        is_valid: node.is_valid().await,
    })
}

async fn get_stats(State(node): State<Arc<Node>>) -> Json<ChainStats> {
    Json(node.stats().await)
}
