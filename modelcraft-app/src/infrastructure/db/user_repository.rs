use super::entities::user;
use crate::application::UserStore;
use crate::domain::User;
use async_trait::async_trait;
use modelcraft_errors::AppError;
use sea_orm::{entity::*, DatabaseConnection, EntityTrait};
use std::collections::BTreeSet;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn to_domain(row: user::Model) -> User {
        // Entries that are not UUIDs are dropped; the set type re-establishes
        // the no-duplicates invariant on load.
        let liked_models: BTreeSet<uuid::Uuid> =
            serde_json::from_value(row.liked_models).unwrap_or_default();

        User {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            premium_user: row.premium_user,
            train_limit: row.train_limit,
            liked_models,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_user(&self, id: uuid::Uuid) -> Result<Option<User>, AppError> {
        let row = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(row.map(Self::to_domain))
    }

    async fn save_user(&self, user_data: &User) -> Result<(), AppError> {
        let row = user::Entity::find_by_id(user_data.id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or(AppError::UserNotFound)?;

        let liked_models = serde_json::to_value(&user_data.liked_models)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut active: user::ActiveModel = row.into();
        active.email = Set(user_data.email.clone());
        active.full_name = Set(user_data.full_name.clone());
        active.premium_user = Set(user_data.premium_user);
        active.train_limit = Set(user_data.train_limit);
        active.liked_models = Set(liked_models);
        active.updated_at = Set(Some(chrono::Utc::now()));

        active
            .update(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
