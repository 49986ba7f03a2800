mod identity;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use identity::Identity;
use modelcraft_app::domain::{ToggleSummary, User};
use modelcraft_app::{AppContext, Settings};
use modelcraft_errors::AppError;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");
    let ctx = AppContext::new(&settings)
        .await
        .expect("Failed to initialize application context");

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/profile", get(profile))
        .route("/premium", post(set_premium))
        .route(
            "/liked-models/{model_id}",
            put(toggle_liked_model).post(toggle_liked_model),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CompressionLayer::new())
        .with_state(ctx);

    tracing::info!("Listening on http://{}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

async fn healthz() -> &'static str {
    "ok"
}

async fn profile(
    State(ctx): State<AppContext>,
    identity: Identity,
) -> Result<Json<User>, AppError> {
    let user = ctx
        .users
        .get_user(identity.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(user))
}

async fn set_premium(
    State(ctx): State<AppContext>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut user = ctx
        .users
        .get_user(identity.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    user.premium_user = true;
    ctx.users.save_user(&user).await?;

    Ok(Json(
        serde_json::json!({ "message": "Premium status updated." }),
    ))
}

async fn toggle_liked_model(
    State(ctx): State<AppContext>,
    identity: Identity,
    Path(model_id): Path<uuid::Uuid>,
) -> Result<Json<ToggleSummary>, AppError> {
    ctx.rate_limiter
        .check(identity.user_id)
        .map_err(|e| AppError::RateLimited(e.retry_after_secs()))?;

    // Detached task: once the remote call is in flight, a client disconnect
    // must not abort the local write or the compensating call.
    let toggle = ctx.toggle_like.clone();
    let user_id = identity.user_id;
    let summary = tokio::spawn(async move {
        toggle.execute(user_id, model_id, &identity.bearer).await
    })
    .await
    .map_err(|e| AppError::Internal(format!("toggle task failed: {}", e)))??;

    Ok(Json(summary))
}
