mod toggle;
mod user;

pub use toggle::{LikeState, ToggleIntent, ToggleSummary};
pub use user::User;
