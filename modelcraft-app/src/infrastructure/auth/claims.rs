use jsonwebtoken::{DecodingKey, Validation};
use modelcraft_errors::AppError;
use serde::{Deserialize, Serialize};

/// Claims carried by the session token. Tokens are minted by the auth
/// subsystem; this service only validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: uuid::Uuid,
    pub email: String,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token_for(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let claims = Claims {
            user_id: uuid::Uuid::new_v4(),
            email: "ana@example.com".into(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = token_for(&claims, "secret");

        let verified = TokenVerifier::new("secret").verify(&token).unwrap();
        assert_eq!(verified.user_id, claims.user_id);
        assert_eq!(verified.email, claims.email);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let claims = Claims {
            user_id: uuid::Uuid::new_v4(),
            email: "ana@example.com".into(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = token_for(&claims, "secret");

        let err = TokenVerifier::new("other").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let claims = Claims {
            user_id: uuid::Uuid::new_v4(),
            email: "ana@example.com".into(),
            exp: chrono::Utc::now().timestamp() - 3600,
        };
        let token = token_for(&claims, "secret");

        let err = TokenVerifier::new("secret").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
