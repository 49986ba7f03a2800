use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use modelcraft_app::AppContext;
use modelcraft_errors::AppError;

/// Caller identity resolved from the `Authorization: Bearer <jwt>` header.
/// Keeps the raw token so outbound calls can forward the credential
/// unchanged.
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub bearer: String,
}

impl FromRequestParts<AppContext> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?;

        let claims = state.token_verifier.verify(token)?;

        Ok(Self {
            user_id: claims.user_id,
            bearer: token.to_string(),
        })
    }
}
