mod client;
mod types;

pub use client::{ModelServiceClient, RemoteOutcome, TransportFailureKind};
pub use types::{ModelLikeRecord, SetLikeStateRequest, SetLikeStateResponse};
