use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthError, PasswordHasher};
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers::{
    columns, contacts, efforts, health, issues, milestones, posts, projects, sessions, tags, todos, users,
};
use crate::middleware::require_basic_auth;

/// Shared, cheaply cloned handler state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseManager,
    pub passwords: PasswordHasher,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseManager, config: AppConfig) -> Result<Self, AuthError> {
        let passwords = PasswordHasher::new(
            config.security.password_memory_kib,
            config.security.password_iterations,
        )?;
        Ok(Self {
            db,
            passwords,
            config: Arc::new(config),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/v1", api_routes(&state))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config));

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(post_routes(state))
        .merge(todo_routes())
        .merge(contact_routes())
        .merge(board_routes())
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create))
        .route("/sessions", post(sessions::create))
}

/// Reads are public; writes go through the Basic auth gate
fn post_routes(state: &AppState) -> Router<AppState> {
    let gate = from_fn_with_state(state.clone(), require_basic_auth);

    Router::new()
        .route(
            "/posts",
            get(posts::list).merge(post(posts::create).route_layer(gate.clone())),
        )
        .route(
            "/posts/:id",
            get(posts::show).merge(put(posts::update).delete(posts::delete).route_layer(gate)),
        )
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todos",
            get(todos::list).post(todos::create).delete(todos::delete_completed),
        )
        .route(
            "/todos/:id",
            get(todos::show).put(todos::update).delete(todos::delete),
        )
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(contacts::list).post(contacts::create).delete(contacts::delete_selected),
        )
        .route(
            "/contacts/:id",
            get(contacts::show).put(contacts::update).delete(contacts::delete),
        )
}

fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/:id",
            get(projects::show).put(projects::update).delete(projects::delete),
        )
        .route("/issues", get(issues::list).post(issues::create))
        .route(
            "/issues/:id",
            get(issues::show).put(issues::update).delete(issues::delete),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/:id",
            get(tags::show).put(tags::update).delete(tags::delete),
        )
        .route("/milestones", get(milestones::list).post(milestones::create))
        .route(
            "/milestones/:id",
            get(milestones::show).put(milestones::update).delete(milestones::delete),
        )
        .route("/efforts", get(efforts::list).post(efforts::create))
        .route(
            "/efforts/:id",
            get(efforts::show).put(efforts::update).delete(efforts::delete),
        )
        .route("/columns", get(columns::list).post(columns::create))
        .route(
            "/columns/:id",
            get(columns::show).put(columns::update).delete(columns::delete),
        )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
