use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use gamevault::auth::{AuthApiState, AuthService, JwtService, auth_api_router};
use gamevault::config::Config;
use gamevault::db::{self, GameRepository, NewsRepository, PgPool, UserRepository};
use gamevault::games::{GameApiState, game_api_router};
use gamevault::news::{NewsApiState, news_api_router};

#[tokio::main]
async fn main() {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load application config from environment variables
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to the store and apply migrations
    let pool = match db::create_pool_with_migrations(&config.db).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database setup failed: {}", e);
            std::process::exit(1);
        }
    };

    let jwt_service = JwtService::new(config.jwt.clone());
    let auth_service = AuthService::new(UserRepository::new(pool.clone()), jwt_service.clone());

    let health_router = Router::new()
        .route("/api/health", get(health_handler))
        .with_state(pool.clone());

    // The SPA is served separately; the API is open to it via CORS
    let app = Router::new()
        .merge(auth_api_router(AuthApiState { auth_service }))
        .merge(game_api_router(GameApiState {
            game_repo: GameRepository::new(pool.clone()),
            jwt_service: jwt_service.clone(),
        }))
        .merge(news_api_router(NewsApiState {
            news_repo: NewsRepository::new(pool),
            jwt_service,
        }))
        .merge(health_router)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", &config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

/// GET /api/health
/// Report whether the store is reachable
async fn health_handler(State(pool): State<PgPool>) -> Response {
    match db::health_check(&pool).await {
        Ok(()) => {
            (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
        }
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
                .into_response()
        }
    }
}
