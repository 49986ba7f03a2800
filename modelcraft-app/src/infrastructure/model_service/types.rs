use crate::domain::LikeState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SetLikeStateRequest {
    pub state: LikeState,
}

/// Response envelope of the model service's like-state endpoint. Fields are
/// optional: only the aggregate count is of interest here and older service
/// revisions omit parts of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SetLikeStateResponse {
    pub message: Option<String>,
    pub state: Option<String>,
    pub data: Option<ModelLikeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelLikeRecord {
    pub id: Option<uuid::Uuid>,
    pub likes: Option<i64>,
}
