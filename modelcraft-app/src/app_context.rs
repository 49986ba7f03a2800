use crate::application::{ToggleLike, UserStore};
use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::db::{create_connection, run_migrations, UserRepository};
use crate::infrastructure::model_service::ModelServiceClient;
use crate::infrastructure::security::RateLimiter;
use modelcraft_errors::AppError;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const DEFAULT_MODEL_SERVICE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub struct Settings {
    pub database_url: String,
    pub model_service_url: Url,
    pub model_service_timeout: Duration,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = require_env("DATABASE_URL")?;
        let jwt_secret = require_env("JWT_SECRET")?;

        let model_service_url = require_env("MODEL_SERVICE_URL")?;
        let model_service_url = Url::parse(&model_service_url)
            .map_err(|e| AppError::Config(format!("MODEL_SERVICE_URL is not a valid URL: {}", e)))?;

        let model_service_timeout = match std::env::var("MODEL_SERVICE_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config("MODEL_SERVICE_TIMEOUT_SECS must be an integer".to_string())
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_MODEL_SERVICE_TIMEOUT_SECS),
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            database_url,
            model_service_url,
            model_service_timeout,
            jwt_secret,
            bind_addr,
        })
    }
}

fn require_env(name: &str) -> Result<String, AppError> {
    std::env::var(name).map_err(|_| AppError::Config(format!("{} must be set", name)))
}

#[derive(Clone)]
pub struct AppContext {
    pub toggle_like: Arc<ToggleLike>,
    pub users: Arc<dyn UserStore>,
    pub token_verifier: TokenVerifier,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub async fn new(settings: &Settings) -> Result<Self, AppError> {
        let db = create_connection(&settings.database_url)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        run_migrations(&db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        tracing::info!("Database connected, migrations applied");

        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db));
        let model_service = ModelServiceClient::new(
            settings.model_service_url.clone(),
            settings.model_service_timeout,
        )?;

        Ok(Self {
            toggle_like: Arc::new(ToggleLike::new(users.clone(), model_service)),
            users,
            token_verifier: TokenVerifier::new(&settings.jwt_secret),
            rate_limiter: RateLimiter::new(),
        })
    }
}
