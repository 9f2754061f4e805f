//! Route definitions for the Agritech Hub platform

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::panic_response;
use crate::handlers::{self, disease::UPLOAD_BODY_LIMIT};
use crate::AppState;

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes());

    with_middleware(router).with_state(state)
}

/// Panic recovery, tracing and CORS, innermost first
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agritech Hub API v1.0"
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-recommendation", post(handlers::recommend_crops))
        .nest("/disease", disease_routes())
        .nest("/forum", forum_routes())
        .route("/schemes", get(handlers::list_schemes))
        .nest("/voice", voice_routes())
        .nest("/weather", weather_routes())
}

/// Disease classifier routes
fn disease_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/predict",
            post(handlers::predict_disease).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/healthz", get(handlers::model_health))
}

/// Forum routes
fn forum_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/posts/:post_id/like", post(handlers::like_post))
        .route("/posts/:post_id/dislike", post(handlers::dislike_post))
        .route("/posts/:post_id/comments", get(handlers::list_comments))
        .route("/posts/:post_id/comment", post(handlers::add_comment))
        .fallback(handlers::forum_not_found)
}

/// Voice assistant routes
fn voice_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::voice_chat))
        .route("/history", get(handlers::voice_history))
        .route("/clear", delete(handlers::clear_voice))
}

/// Weather routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::current_weather))
        .route("/last-city", get(handlers::last_city))
        .route("/save-city", post(handlers::save_city))
}
