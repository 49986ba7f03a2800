use crate::domain::User;
use async_trait::async_trait;
use modelcraft_errors::AppError;

/// Durable storage for user rows. Saves are last-write-wins: the surrounding
/// system exposes no optimistic-concurrency token, so two concurrent writers
/// for the same user simply race.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: uuid::Uuid) -> Result<Option<User>, AppError>;

    async fn save_user(&self, user: &User) -> Result<(), AppError>;
}
