use super::LikeState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub premium_user: bool,
    /// Remaining free training runs. Unrelated to liked models,
    /// decremented elsewhere when a non-premium user trains.
    pub train_limit: i32,
    /// Membership here is the local source of truth for "liked".
    /// A set type keeps the no-duplicates invariant structural.
    pub liked_models: BTreeSet<uuid::Uuid>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub fn new(email: String, full_name: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            email,
            full_name,
            premium_user: false,
            train_limit: 5,
            liked_models: BTreeSet::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn has_liked(&self, model_id: uuid::Uuid) -> bool {
        self.liked_models.contains(&model_id)
    }

    pub fn apply_like(&mut self, model_id: uuid::Uuid, state: LikeState) {
        match state {
            LikeState::Like => {
                self.liked_models.insert(model_id);
            }
            LikeState::Dislike => {
                self.liked_models.remove(&model_id);
            }
        }
    }
}
