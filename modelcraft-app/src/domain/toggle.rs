use serde::{Deserialize, Serialize};

/// The two-valued flag the remote model service accepts for a
/// (user, model) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    Like,
    Dislike,
}

impl LikeState {
    pub fn inverse(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Per-request toggle decision. Lives only for one coordination attempt,
/// never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ToggleIntent {
    pub model_id: uuid::Uuid,
    pub previous_membership: bool,
    pub target: LikeState,
}

impl ToggleIntent {
    /// Direction comes from local membership alone: a model already in the
    /// set toggles off, anything else toggles on. The remote service owns
    /// the counters but never decides direction.
    pub fn from_membership(model_id: uuid::Uuid, previous_membership: bool) -> Self {
        let target = if previous_membership {
            LikeState::Dislike
        } else {
            LikeState::Like
        };
        Self {
            model_id,
            previous_membership,
            target,
        }
    }
}

/// Result of a completed toggle, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSummary {
    pub action: LikeState,
    pub model_id: uuid::Uuid,
    pub total_liked_models: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_membership() {
        let model_id = uuid::Uuid::new_v4();
        assert_eq!(
            ToggleIntent::from_membership(model_id, false).target,
            LikeState::Like
        );
        assert_eq!(
            ToggleIntent::from_membership(model_id, true).target,
            LikeState::Dislike
        );
    }

    #[test]
    fn inverse_is_an_involution() {
        assert_eq!(LikeState::Like.inverse(), LikeState::Dislike);
        assert_eq!(LikeState::Dislike.inverse().inverse(), LikeState::Dislike);
    }

    #[test]
    fn serializes_to_wire_strings() {
        assert_eq!(serde_json::to_string(&LikeState::Like).unwrap(), "\"like\"");
        assert_eq!(
            serde_json::to_string(&LikeState::Dislike).unwrap(),
            "\"dislike\""
        );
    }
}
