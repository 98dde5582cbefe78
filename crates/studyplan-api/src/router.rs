//! Router configuration and server setup.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ApiConfig;
use crate::handlers;
use crate::state::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins));

    Router::new()
        // Health
        .route("/api/health", get(handlers::health))
        // Accounts
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        // Courses
        .route(
            "/api/courses",
            get(handlers::list_courses)
                .post(handlers::create_course)
                .delete(handlers::delete_all_courses),
        )
        .route("/api/courses/:id", axum::routing::delete(handlers::delete_course))
        // Tasks
        .route(
            "/api/tasks",
            get(handlers::list_tasks)
                .post(handlers::create_task)
                .delete(handlers::delete_all_tasks),
        )
        .route(
            "/api/tasks/:id",
            get(handlers::get_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/complete", post(handlers::toggle_task_complete))
        // Plans
        .route("/api/plans/generate", post(handlers::generate_plan))
        .route("/api/plans/:task_id", get(handlers::get_plan))
        .route("/api/day-tasks/:id/complete", post(handlers::toggle_day_task))
        // Weekly timeline
        .route("/api/weekly", get(handlers::weekly_timeline))
        // Reset
        .route("/api/reset", post(handlers::reset))
        .layer(middleware)
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(config: ApiConfig, state: AppState) -> Result<(), std::io::Error> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);
    axum::serve(listener, create_router(state)).await
}
