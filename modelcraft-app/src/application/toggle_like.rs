use super::UserStore;
use crate::domain::{ToggleIntent, ToggleSummary};
use crate::infrastructure::model_service::{
    ModelServiceClient, RemoteOutcome, TransportFailureKind,
};
use modelcraft_errors::AppError;
use std::sync::Arc;

/// Coordinates one like toggle across the two stores: the remote model
/// service (authoritative for the model's counters) and the local user row
/// (authoritative for membership, and for toggle direction).
///
/// There is no shared transaction between the stores. The protocol is a
/// two-step saga: remote update first, local write second, and on a failed
/// local write exactly one compensating call to restore the prior remote
/// state. Two concurrent toggles for the same (user, model) pair can still
/// read the same membership and pick the same direction; that race is
/// accepted. Closing it would take a serialization point keyed by
/// (user_id, model_id), not a different coordinator.
pub struct ToggleLike {
    users: Arc<dyn UserStore>,
    model_service: ModelServiceClient,
}

impl ToggleLike {
    pub fn new(users: Arc<dyn UserStore>, model_service: ModelServiceClient) -> Self {
        Self {
            users,
            model_service,
        }
    }

    pub async fn execute(
        &self,
        user_id: uuid::Uuid,
        model_id: uuid::Uuid,
        credential: &str,
    ) -> Result<ToggleSummary, AppError> {
        let mut user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let intent = ToggleIntent::from_membership(model_id, user.has_liked(model_id));

        // Remote first: a failed remote call must never corrupt local state.
        // The credential is forwarded unchanged; the model service
        // re-authorizes on its own.
        match self
            .model_service
            .set_like_state(model_id, intent.target, credential)
            .await
        {
            RemoteOutcome::Success { .. } => {}
            RemoteOutcome::NotFound => return Err(AppError::ModelNotFound),
            RemoteOutcome::Forbidden => {
                return Err(AppError::Forbidden(
                    "model service rejected the credential".to_string(),
                ))
            }
            RemoteOutcome::TransportFailure {
                kind: TransportFailureKind::Timeout,
                ..
            } => return Err(AppError::RemoteTimeout),
            RemoteOutcome::TransportFailure { detail, .. } => {
                return Err(AppError::RemoteUnavailable(detail))
            }
            RemoteOutcome::OtherServerError { status, body } => {
                return Err(AppError::RemoteRejected { status, body })
            }
        }

        user.apply_like(model_id, intent.target);

        if let Err(save_error) = self.users.save_user(&user).await {
            tracing::warn!(
                %user_id,
                %model_id,
                error = %save_error,
                "local save failed after remote update, compensating"
            );
            return Err(self.compensate(user_id, model_id, &intent, credential).await);
        }

        tracing::info!(
            %user_id,
            %model_id,
            action = intent.target.as_str(),
            total = user.liked_models.len(),
            "liked-model toggle applied"
        );

        Ok(ToggleSummary {
            action: intent.target,
            model_id,
            total_liked_models: user.liked_models.len(),
        })
    }

    /// One rollback attempt with the inverse state, never more. Whether it
    /// works or not the request has failed; the distinction the caller gets
    /// is "rolled back cleanly" versus "stores are divergent".
    async fn compensate(
        &self,
        user_id: uuid::Uuid,
        model_id: uuid::Uuid,
        intent: &ToggleIntent,
        credential: &str,
    ) -> AppError {
        let outcome = self
            .model_service
            .set_like_state(model_id, intent.target.inverse(), credential)
            .await;

        let compensation_failed = !matches!(outcome, RemoteOutcome::Success { .. });
        if compensation_failed {
            tracing::error!(
                %user_id,
                %model_id,
                requested = intent.target.as_str(),
                "compensating call failed, stores need manual reconciliation"
            );
        }

        AppError::LikeSaveFailed {
            compensation_failed,
        }
    }
}
