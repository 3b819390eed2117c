use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{warn, Level};

use common::types::Health;
use models::user::User;
use service::{CreateUserInput, UserRepository, UserService};

use crate::errors::ApiError;
use crate::observability::{self, LOOKUPS_TOTAL, NOT_FOUND_TOTAL, REJECTED_TOTAL, SAVES_TOTAL};

/// Shared handler state. The repository is injected, never global.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService<dyn UserRepository>,
}

impl AppState {
    pub fn new(users: UserService<dyn UserRepository>) -> Self {
        Self { users }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        REJECTED_TOTAL.inc();
        ApiError::bad_request(rejection.body_text())
    })?;

    match state.users.create_user(input) {
        Ok(user) => {
            SAVES_TOTAL.inc();
            Ok((StatusCode::CREATED, Json(user)))
        }
        Err(e) => {
            REJECTED_TOTAL.inc();
            warn!(error = %e, code = e.code(), "create user rejected");
            Err(e.into())
        }
    }
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    LOOKUPS_TOTAL.inc();
    let user = state.users.get_user(&id).map_err(|e| {
        if e.is_not_found() {
            NOT_FOUND_TOTAL.inc();
        }
        ApiError::from(e)
    })?;
    Ok(Json(user))
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list_users())
}

/// Build the full application router: user API, health and metrics.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request, without headers
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
