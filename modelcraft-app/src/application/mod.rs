mod toggle_like;
mod user_store;

pub use toggle_like::ToggleLike;
pub use user_store::UserStore;
